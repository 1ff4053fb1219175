//! Label print client: deliver composed jobs to Zebra printers.
//!
//! A job goes out over one raw TCP connection (port 9100): connect, write
//! every byte, close. The API is synchronous (`std::net`). Connecting and
//! writing are bounded by [`PrinterTimeouts`]; hostname lookup is not (see
//! [`resolve_address`]). Failures are reported, never retried; re-sending is
//! the operator's decision.
mod addr;
mod config;
mod dispatch;
mod error;
#[cfg(feature = "tcp")]
mod tcp;

pub use addr::{DEFAULT_PORT, resolve_address};
pub use config::{PrinterConfig, PrinterTimeouts};
#[cfg(feature = "tcp")]
pub use dispatch::TcpConnector;
pub use dispatch::{Connector, DispatchError, DispatchOutcome, Dispatcher, PrinterTarget};
pub use error::PrintError;
#[cfg(feature = "tcp")]
pub use tcp::TcpPrinter;

// ── Traits ──────────────────────────────────────────────────────────────

/// An open connection to a printer.
pub trait Printer: Send {
    /// Send raw bytes to the printer.
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError>;

    /// Signal that the transmission is complete.
    ///
    /// Transports that buffer or need an orderly close do it here. The
    /// default does nothing.
    fn finish(&mut self) -> Result<(), PrintError> {
        Ok(())
    }
}
