//! Serial weighing scale transport using the `serialport` crate.
//!
//! Feature-gated behind the `serial` Cargo feature (enabled by default).
//! Each reading opens the port, waits for one complete line, and closes the
//! port again, so unplugging the scale between readings is harmless. Stale
//! input is flushed on open and the partial line the port joined in the
//! middle of is discarded.

use serialport::ClearBuffer;
use tracing::{debug, warn};

use crate::line::{parse_weight, read_complete_line};
use crate::{DeviceError, PortEnumerator, ScaleReader, ScaleSettings};

/// A weighing scale attached to a serial port (RS-232 or USB-serial).
#[derive(Debug, Clone, Default)]
pub struct SerialScale {
    settings: ScaleSettings,
}

impl SerialScale {
    /// Create a scale reader with the given serial settings.
    pub fn new(settings: ScaleSettings) -> Self {
        Self { settings }
    }

    /// The serial settings used for each reading.
    pub fn settings(&self) -> &ScaleSettings {
        &self.settings
    }

    /// List available serial port names on the system.
    ///
    /// Returns port paths like `/dev/ttyUSB0` or `COM3`.
    ///
    /// **Note:** On Linux, this crate is built with `serialport`'s default
    /// features disabled (no `libudev`). Enumeration still works via a sysfs
    /// fallback but may return fewer details.
    pub fn list_ports() -> Vec<String> {
        serialport::available_ports()
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.port_name)
            .collect()
    }
}

impl ScaleReader for SerialScale {
    fn read_weight(&mut self, port: &str) -> Result<f64, DeviceError> {
        let mut handle = serialport::new(port, self.settings.baud)
            .timeout(self.settings.read_timeout)
            .open()
            .map_err(|e| DeviceError::PortUnavailable {
                port: port.to_string(),
                details: e.to_string(),
            })?;

        if let Err(e) = handle.clear(ClearBuffer::Input) {
            warn!(port, error = %e, "could not flush scale input");
        }

        let raw =
            read_complete_line(&mut handle, self.settings.read_timeout, self.settings.max_line)?;
        let line = String::from_utf8_lossy(&raw);
        debug!(port, line = %line, "scale reading");
        parse_weight(&line)
    }
}

/// Enumerates ports through [`SerialScale::list_ports`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPorts;

impl PortEnumerator for SystemPorts {
    fn list_ports(&self) -> Vec<String> {
        SerialScale::list_ports()
    }
}
