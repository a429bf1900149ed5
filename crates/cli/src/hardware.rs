//! Scale and port collaborators for the binary, depending on which
//! transports were compiled in.

use carton_label_devices::{PortEnumerator, ScaleReader, ScaleSettings};

#[cfg(feature = "serial")]
pub(crate) fn scale(settings: ScaleSettings) -> impl ScaleReader {
    carton_label_devices::SerialScale::new(settings)
}

#[cfg(feature = "serial")]
pub(crate) fn ports() -> impl PortEnumerator {
    carton_label_devices::SystemPorts
}

#[cfg(not(feature = "serial"))]
pub(crate) fn scale(_settings: ScaleSettings) -> impl ScaleReader {
    NoSerial
}

#[cfg(not(feature = "serial"))]
pub(crate) fn ports() -> impl PortEnumerator {
    NoSerial
}

/// Stand-in when the binary is built without serial support.
#[cfg(not(feature = "serial"))]
struct NoSerial;

#[cfg(not(feature = "serial"))]
impl ScaleReader for NoSerial {
    fn read_weight(
        &mut self,
        _port: &str,
    ) -> Result<f64, carton_label_devices::DeviceError> {
        Err(carton_label_devices::DeviceError::Unsupported(
            "serial scale",
        ))
    }
}

#[cfg(not(feature = "serial"))]
impl PortEnumerator for NoSerial {
    fn list_ports(&self) -> Vec<String> {
        Vec::new()
    }
}
