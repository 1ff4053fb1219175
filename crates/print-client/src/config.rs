//! Configuration types for the print client.

use std::time::Duration;

/// Printer connection settings.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Network timeout settings.
    pub timeouts: PrinterTimeouts,
}

impl PrinterConfig {
    /// Configuration with both timeouts set to `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeouts: PrinterTimeouts::uniform(timeout),
        }
    }
}

/// Timeout settings for printer connections.
///
/// Both default to 5 seconds. Label jobs are small text formats, so a write
/// that takes longer than that means the printer has stopped reading.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterTimeouts {
    /// Maximum time to wait for the TCP connection to establish.
    pub connect: Duration,
    /// Maximum time any single write may block.
    pub write: Duration,
}

impl PrinterTimeouts {
    /// Use the same bound for connecting and writing.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            connect: timeout,
            write: timeout,
        }
    }
}

impl Default for PrinterTimeouts {
    fn default() -> Self {
        Self::uniform(Duration::from_secs(5))
    }
}
