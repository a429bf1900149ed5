//! Raw TCP delivery to network label printers.
//!
//! Printers listen on a RAW port (9100 unless configured otherwise) and
//! print whatever ZPL arrives. One [`TcpPrinter`] is one connection; it is
//! shut down when dropped so the printer sees end of job.

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};
use tracing::debug;

use crate::addr::resolve_printer_addr;
use crate::{DeviceError, Printer, PrinterConfig};

const KEEPALIVE_IDLE: Duration = Duration::from_secs(60);

/// An open connection to a network label printer.
pub struct TcpPrinter {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpPrinter {
    /// Open a connection to `address` (`IP`, `IP:PORT`, `hostname`, or
    /// `hostname:PORT`; see [`resolve_printer_addr`]).
    pub fn connect(address: &str, config: &PrinterConfig) -> Result<Self, DeviceError> {
        let peer = resolve_printer_addr(address)?;
        let limit = config.timeouts.connect;
        debug!(%peer, ?limit, "connecting to printer");

        let stream = TcpStream::connect_timeout(&peer, limit)
            .map_err(|source| classify_connect_error(peer, limit, source))?;
        tune(&stream, config.timeouts.write).map_err(|source| DeviceError::ConnectionFailed {
            addr: peer.to_string(),
            source,
        })?;

        Ok(Self { stream, peer })
    }

    /// The socket address the connection went to.
    pub fn remote_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Printer for TcpPrinter {
    fn send_raw(&mut self, data: &[u8]) -> Result<(), DeviceError> {
        self.stream
            .write_all(data)
            .and_then(|()| self.stream.flush())
            .map_err(DeviceError::WriteFailed)?;
        debug!(bytes = data.len(), peer = %self.peer, "label data sent");
        Ok(())
    }
}

impl Drop for TcpPrinter {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

fn classify_connect_error(peer: SocketAddr, limit: Duration, source: io::Error) -> DeviceError {
    let addr = peer.to_string();
    match source.kind() {
        io::ErrorKind::ConnectionRefused => DeviceError::ConnectionRefused { addr, source },
        io::ErrorKind::TimedOut => DeviceError::ConnectionTimeout {
            addr,
            timeout: limit,
            source,
        },
        _ => DeviceError::ConnectionFailed { addr, source },
    }
}

/// Disable Nagle, enable keepalive, and bound how long a write may block.
fn tune(stream: &TcpStream, write_timeout: Duration) -> io::Result<()> {
    stream.set_nodelay(true)?;
    SockRef::from(stream).set_tcp_keepalive(&TcpKeepalive::new().with_time(KEEPALIVE_IDLE))?;
    stream.set_write_timeout(Some(write_timeout))
}
