//! Printer address resolution.
//!
//! Operators type printer addresses as `IP`, `IP:PORT`, `hostname`, or
//! `hostname:PORT`. The port defaults to 9100.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::DeviceError;

/// Default raw printing port (JetDirect / RAW).
pub const DEFAULT_PORT: u16 = 9100;

/// Resolve an operator-typed printer address.
///
/// Surrounding whitespace is ignored. Literal IPs never touch DNS; a
/// hostname resolving to several addresses uses the first.
pub fn resolve_printer_addr(input: &str) -> Result<SocketAddr, DeviceError> {
    let address = input.trim();
    if address.is_empty() {
        return Err(DeviceError::InvalidAddress(address.to_string()));
    }
    literal_addr(address)
        .or_else(|| host_addr(address))
        .ok_or_else(|| DeviceError::NoAddressFound(address.to_string()))
}

fn literal_addr(address: &str) -> Option<SocketAddr> {
    match address.parse::<SocketAddr>() {
        Ok(addr) => Some(addr),
        Err(_) => address
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, DEFAULT_PORT)),
    }
}

fn host_addr(address: &str) -> Option<SocketAddr> {
    let first = |addrs: std::io::Result<std::vec::IntoIter<SocketAddr>>| addrs.ok()?.next();
    first(address.to_socket_addrs()).or_else(|| first((address, DEFAULT_PORT).to_socket_addrs()))
}
