//! Errors raised while talking to printers and scales.

use std::io;
use std::time::Duration;

/// Printer and scale failures.
///
/// [`DeviceError::is_connection_problem`] separates "could not reach the
/// device" from "the device answered with something unusable".
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    // ── Printer ──
    /// The printer actively refused the connection (e.g. port not open).
    #[error("printer at {addr} refused the connection")]
    ConnectionRefused {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// TCP connect timed out before the printer responded.
    #[error("printer at {addr} did not answer within {timeout:?}")]
    ConnectionTimeout {
        /// The address that was attempted.
        addr: String,
        /// The configured timeout that elapsed.
        timeout: Duration,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Connection failed for a reason other than refusal or timeout.
    #[error("cannot reach printer at {addr}")]
    ConnectionFailed {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The peer closed the connection unexpectedly.
    #[error("device closed the connection")]
    ConnectionClosed,

    /// The provided printer address string was empty or unusable.
    #[error("invalid printer address: {0:?}")]
    InvalidAddress(String),

    /// DNS resolution found no addresses for the given hostname.
    #[error("printer host {0} did not resolve to any address")]
    NoAddressFound(String),

    /// Writing data to the device failed.
    #[error("sending to printer failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// Reading data from the device failed.
    #[error("reading from scale failed: {0}")]
    ReadFailed(#[source] io::Error),

    /// The device did not answer within the read timeout.
    #[error("read timed out waiting for the scale")]
    ReadTimeout,

    // ── Scale ──
    /// No scale port has been selected yet.
    #[error("no scale port selected")]
    NoPortSelected,

    /// The requested port is not among the enumerated serial ports.
    #[error("invalid port selected: {0}")]
    UnknownPort(String),

    /// The serial port could not be opened.
    #[error("port {port} unavailable: {details}")]
    PortUnavailable {
        /// The port that was attempted.
        port: String,
        /// Description from the serial driver.
        details: String,
    },

    /// A scale line did not contain a numeric weight.
    #[error("no weight found in scale reading {line:?}")]
    MalformedReading {
        /// The line received from the scale (lossy UTF-8).
        line: String,
    },

    /// A scale line exceeded the maximum allowed length.
    #[error("scale reading too long ({size} bytes, max {max})")]
    LineTooLong {
        /// Bytes received before giving up.
        size: usize,
        /// Configured maximum line length in bytes.
        max: usize,
    },

    /// Transport support was not compiled into this build.
    #[error("{0} support was not compiled into this build")]
    Unsupported(&'static str),
}

impl DeviceError {
    /// Returns `true` if the failure is about reaching the device rather
    /// than about the data it sent back.
    pub fn is_connection_problem(&self) -> bool {
        matches!(
            self,
            DeviceError::ConnectionRefused { .. }
                | DeviceError::ConnectionTimeout { .. }
                | DeviceError::ConnectionFailed { .. }
                | DeviceError::ConnectionClosed
                | DeviceError::NoAddressFound(_)
                | DeviceError::PortUnavailable { .. }
                | DeviceError::ReadTimeout
        )
    }
}
