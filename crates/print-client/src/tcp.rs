//! TCP transport for label printers (port 9100 / JetDirect / RAW).

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use socket2::SockRef;
use tracing::trace;

use crate::addr::resolve_address;
use crate::{PrintError, Printer, PrinterConfig};

/// A synchronous, one-way TCP connection to a label printer.
///
/// Printers accept ZPL on their RAW port and start printing as soon as a
/// complete `^XA` … `^XZ` format arrives; nothing is read back.
pub struct TcpPrinter {
    stream: TcpStream,
    addr: SocketAddr,
}

impl TcpPrinter {
    /// Connect to a printer.
    ///
    /// The address can be any form accepted by [`resolve_address`]. The
    /// connect is bounded by `config.timeouts.connect` and every later write
    /// by `config.timeouts.write`.
    pub fn connect(addr: &str, config: &PrinterConfig) -> Result<Self, PrintError> {
        let addr = resolve_address(addr)?;
        let stream = TcpStream::connect_timeout(&addr, config.timeouts.connect).map_err(|e| {
            match e.kind() {
                io::ErrorKind::ConnectionRefused => PrintError::ConnectionRefused {
                    addr: addr.to_string(),
                    source: e,
                },
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                    PrintError::ConnectionTimeout {
                        addr: addr.to_string(),
                        timeout: config.timeouts.connect,
                        source: e,
                    }
                }
                _ => PrintError::ConnectionFailed {
                    addr: addr.to_string(),
                    source: e,
                },
            }
        })?;

        configure_stream(&stream, config).map_err(|e| PrintError::ConnectionFailed {
            addr: addr.to_string(),
            source: e,
        })?;

        Ok(Self { stream, addr })
    }

    /// The resolved address this printer is connected to.
    pub fn remote_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for TcpPrinter {
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError> {
        trace!(addr = %self.addr, bytes = data.len(), "writing");
        self.stream
            .write_all(data)
            .map_err(PrintError::WriteFailed)?;
        self.stream.flush().map_err(PrintError::WriteFailed)
    }

    /// Half-close the connection so the printer sees end-of-job.
    fn finish(&mut self) -> Result<(), PrintError> {
        self.stream
            .shutdown(Shutdown::Write)
            .map_err(PrintError::WriteFailed)
    }
}

impl Drop for TcpPrinter {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

// ── Helpers ────────────────────────────────────────────────────────────

/// Disable Nagle, bound writes, and bound the close.
///
/// Linger makes the final close wait (up to the write timeout) for queued
/// bytes to reach the printer instead of discarding them.
fn configure_stream(stream: &TcpStream, config: &PrinterConfig) -> io::Result<()> {
    stream.set_nodelay(true)?;
    stream.set_write_timeout(Some(config.timeouts.write))?;
    SockRef::from(stream).set_linger(Some(config.timeouts.write))?;
    Ok(())
}
