//! Line reader and weight parser for serial scale output.
//!
//! Bench scales stream one reading per line, typically in a form such as
//! `ST,GS,+  12.50kg` followed by CR/LF. Lines can split across reads, so the
//! reader works byte-by-byte and tolerates partial reads.

use std::io::Read;
use std::time::{Duration, Instant};

use crate::DeviceError;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Read one CR/LF terminated line from `stream`.
///
/// Leading line breaks (the tail of a previous reading) are skipped. The
/// terminator is not included in the result.
///
/// # Errors
///
/// - [`DeviceError::ReadTimeout`] when no complete line arrives before `timeout`.
/// - [`DeviceError::ConnectionClosed`] when the stream ends before a terminator.
/// - [`DeviceError::LineTooLong`] when more than `max_line` bytes arrive.
pub fn read_line(
    stream: &mut impl Read,
    timeout: Duration,
    max_line: usize,
) -> Result<Vec<u8>, DeviceError> {
    collect_line(stream, deadline_after(timeout), max_line)
}

/// Read the first complete line from a stream joined at an unknown point.
///
/// Everything up to the first CR/LF is discarded, since a scale that
/// streams readings is usually mid-line when the port is opened. The
/// `timeout` covers both the discarded fragment and the line itself.
///
/// # Errors
///
/// As for [`read_line`]; a fragment longer than `max_line` is
/// [`DeviceError::LineTooLong`].
pub fn read_complete_line(
    stream: &mut impl Read,
    timeout: Duration,
    max_line: usize,
) -> Result<Vec<u8>, DeviceError> {
    let deadline = deadline_after(timeout);
    let mut skipped = 0usize;
    loop {
        match next_byte(stream, deadline)? {
            CR | LF => break,
            _ if skipped >= max_line => {
                return Err(DeviceError::LineTooLong {
                    size: skipped + 1,
                    max: max_line,
                });
            }
            _ => skipped += 1,
        }
    }
    collect_line(stream, deadline, max_line)
}

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(86400))
}

fn collect_line(
    stream: &mut impl Read,
    deadline: Instant,
    max_line: usize,
) -> Result<Vec<u8>, DeviceError> {
    let mut line: Vec<u8> = Vec::with_capacity(64);
    loop {
        match next_byte(stream, deadline)? {
            CR | LF if line.is_empty() => {}
            CR | LF => return Ok(line),
            b => {
                if line.len() >= max_line {
                    return Err(DeviceError::LineTooLong {
                        size: line.len() + 1,
                        max: max_line,
                    });
                }
                line.push(b);
            }
        }
    }
}

/// One byte from `stream`, retrying timeouts and would-block until `deadline`.
fn next_byte(stream: &mut impl Read, deadline: Instant) -> Result<u8, DeviceError> {
    let mut byte = [0u8; 1];
    loop {
        if Instant::now() >= deadline {
            return Err(DeviceError::ReadTimeout);
        }
        match stream.read(&mut byte) {
            Ok(0) => return Err(DeviceError::ConnectionClosed),
            Ok(_) => return Ok(byte[0]),
            Err(ref e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::Interrupted =>
            {
                std::thread::sleep(Duration::from_millis(1));
            }
            Err(e) => return Err(DeviceError::ReadFailed(e)),
        }
    }
}

/// Extract the first signed decimal number from a scale line.
///
/// A `+` or `-` sign may be separated from the digits by spaces, as many
/// scales pad the value to a fixed width. A decimal point directly before
/// the first digit belongs to the number (`.50` is half a unit). Units and
/// status prefixes are ignored.
pub fn parse_weight(line: &str) -> Result<f64, DeviceError> {
    let bytes = line.as_bytes();
    let Some(first_digit) = bytes.iter().position(u8::is_ascii_digit) else {
        return Err(DeviceError::MalformedReading {
            line: line.to_string(),
        });
    };
    let leading_dot = first_digit > 0 && bytes[first_digit - 1] == b'.';
    let start = if leading_dot { first_digit - 1 } else { first_digit };

    let mut end = first_digit;
    let mut seen_dot = leading_dot;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    let negative = bytes[..start]
        .iter()
        .rev()
        .find(|b| **b != b' ')
        .is_some_and(|b| *b == b'-');

    let magnitude: f64 = line[start..end]
        .parse()
        .map_err(|_| DeviceError::MalformedReading {
            line: line.to_string(),
        })?;

    Ok(if negative { -magnitude } else { magnitude })
}
