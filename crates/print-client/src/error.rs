//! Typed error types for the print client.

use std::io;
use std::time::Duration;

/// Transport failures, categorized by where they happened.
///
/// Each variant carries enough context for an operator-facing message.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    // -- Connection --
    /// The printer actively refused the connection (port not open, or the
    /// printer is busy with another host).
    #[error("connection refused: {addr}")]
    ConnectionRefused {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// TCP connect timed out before the printer responded.
    #[error("connection timed out: {addr} ({timeout:?})")]
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
    #[error("connection failed: {addr}")]
    ConnectionFailed {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    // -- Address --
    /// The address resolved to nothing (bad IP, unknown hostname, empty).
    #[error("no address found for printer: {0}")]
    NoAddressFound(String),

    // -- I/O --
    /// Writing the job to the printer failed or timed out.
    #[error("write failed: {0}")]
    WriteFailed(#[source] io::Error),
}

impl PrintError {
    /// Returns `true` if the failure happened before any byte was sent.
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            PrintError::ConnectionRefused { .. }
                | PrintError::ConnectionTimeout { .. }
                | PrintError::ConnectionFailed { .. }
                | PrintError::NoAddressFound(_)
        )
    }
}
