//! Configuration types for printer and scale transports.

use std::time::Duration;

/// Default baud rate for bench scales (9600 8N1).
pub const DEFAULT_BAUD: u32 = 9600;

/// Default maximum length of one scale reading line.
pub const DEFAULT_MAX_LINE: usize = 256;

/// Settings for a network printer connection.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Connect and write timeouts.
    pub timeouts: PrinterTimeouts,
}

/// Printer timeouts. Defaults: 5 s to connect, 30 s per write.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PrinterTimeouts {
    /// Upper bound on establishing the TCP connection.
    pub connect: Duration,
    /// Upper bound on a single blocking write.
    pub write: Duration,
}

impl Default for PrinterTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            write: Duration::from_secs(30),
        }
    }
}

impl PrinterConfig {
    /// Build a config from explicit timeouts.
    pub fn with_timeouts(connect: Duration, write: Duration) -> Self {
        Self {
            timeouts: PrinterTimeouts { connect, write },
        }
    }
}

/// Serial settings used when reading a weighing scale.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ScaleSettings {
    /// Baud rate of the scale's serial output.
    pub baud: u32,
    /// Maximum time to wait for one complete reading line.
    pub read_timeout: Duration,
    /// Maximum bytes accepted for a single line.
    pub max_line: usize,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            baud: DEFAULT_BAUD,
            read_timeout: Duration::from_secs(3),
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl ScaleSettings {
    /// Build settings for the given baud rate and read timeout.
    pub fn new(baud: u32, read_timeout: Duration) -> Self {
        Self {
            baud,
            read_timeout,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}
