//! Device transports for carton labels: network printers and serial scales.
//!
//! Supports TCP (port 9100) label printers and serial weighing scales. The
//! API is synchronous (`std::net`, blocking serial reads), with no async
//! runtime required.
mod addr;
mod config;
mod error;
mod line;
#[cfg(feature = "serial")]
mod scale;
#[cfg(feature = "tcp")]
mod tcp;

pub use addr::{DEFAULT_PORT, resolve_printer_addr};
pub use config::{DEFAULT_BAUD, DEFAULT_MAX_LINE, PrinterConfig, PrinterTimeouts, ScaleSettings};
pub use error::DeviceError;
pub use line::{parse_weight, read_complete_line, read_line};
#[cfg(feature = "serial")]
pub use scale::{SerialScale, SystemPorts};
#[cfg(feature = "tcp")]
pub use tcp::TcpPrinter;

// ── Traits ──────────────────────────────────────────────────────────────

/// Send data to a printer. All printer transports implement this.
pub trait Printer: Send {
    /// Send raw bytes to the printer.
    fn send_raw(&mut self, data: &[u8]) -> Result<(), DeviceError>;

    /// Send a ZPL string to the printer (convenience wrapper over `send_raw`).
    fn send_zpl(&mut self, zpl: &str) -> Result<(), DeviceError> {
        self.send_raw(zpl.as_bytes())
    }
}

/// Read a live weight from a scale attached to a named port.
pub trait ScaleReader {
    /// Take one reading from the scale on `port`.
    fn read_weight(&mut self, port: &str) -> Result<f64, DeviceError>;
}

/// Enumerate the ports a scale may be attached to.
pub trait PortEnumerator {
    /// Port identifiers in the order the system reports them.
    fn list_ports(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingPrinter {
        sent: Vec<Vec<u8>>,
    }

    impl Printer for RecordingPrinter {
        fn send_raw(&mut self, data: &[u8]) -> Result<(), DeviceError> {
            self.sent.push(data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn send_zpl_forwards_bytes() {
        let mut printer = RecordingPrinter { sent: Vec::new() };
        printer.send_zpl("^XA^FDOne^FS^XZ").unwrap();
        assert_eq!(printer.sent, vec![b"^XA^FDOne^FS^XZ".to_vec()]);
    }
}
