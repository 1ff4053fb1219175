//! Job dispatch: one composed job, one connection, one transmission.

use shiplabel_core::LabelJob;
use tracing::{info, instrument, warn};

use crate::{PrintError, Printer, PrinterConfig};

/// A named printer and the address its raw port listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrinterTarget {
    /// Display name, e.g. `"Dock 3"`.
    pub name: String,
    /// `IP`, `IP:PORT`, `hostname` or `hostname:PORT`.
    #[cfg_attr(feature = "serde", serde(alias = "ip"))]
    pub address: String,
}

impl PrinterTarget {
    /// Create a target.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The job was empty; no connection was opened.
    NothingToPrint,
    /// The whole job was written to the printer.
    Sent {
        /// Labels in the job.
        labels: u32,
        /// Bytes written.
        bytes: usize,
    },
}

/// A transmission failed.
///
/// Names the printer so the operator knows which device to check.
#[derive(Debug, thiserror::Error)]
#[error("could not print to {printer} ({address}): {source}")]
pub struct DispatchError {
    /// Printer display name.
    pub printer: String,
    /// Address that was attempted.
    pub address: String,
    /// Transport failure.
    #[source]
    pub source: PrintError,
}

/// Opens printer connections.
pub trait Connector {
    /// The connection type produced.
    type Connection: Printer;

    /// Connect to `address`, honoring the timeouts in `config`.
    fn connect(&self, address: &str, config: &PrinterConfig)
    -> Result<Self::Connection, PrintError>;
}

/// Connects over raw TCP.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[cfg(feature = "tcp")]
impl Connector for TcpConnector {
    type Connection = crate::TcpPrinter;

    fn connect(
        &self,
        address: &str,
        config: &PrinterConfig,
    ) -> Result<Self::Connection, PrintError> {
        crate::TcpPrinter::connect(address, config)
    }
}

/// Sends label jobs to printers.
#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    connector: C,
    config: PrinterConfig,
}

#[cfg(feature = "tcp")]
impl Dispatcher<TcpConnector> {
    /// A dispatcher that prints over TCP.
    pub fn tcp(config: PrinterConfig) -> Self {
        Self::new(TcpConnector, config)
    }
}

impl<C: Connector> Dispatcher<C> {
    /// Create a dispatcher from a connector and connection settings.
    pub fn new(connector: C, config: PrinterConfig) -> Self {
        Self { connector, config }
    }

    /// Send `job` to `target` in a single transmission.
    ///
    /// An empty job returns [`DispatchOutcome::NothingToPrint`] without
    /// touching the network. Nothing is retried.
    #[instrument(
        skip_all,
        fields(printer = %target.name, address = %target.address, labels = job.label_count())
    )]
    pub fn dispatch(
        &self,
        job: &LabelJob,
        target: &PrinterTarget,
    ) -> Result<DispatchOutcome, DispatchError> {
        if job.is_empty() {
            info!("nothing to print");
            return Ok(DispatchOutcome::NothingToPrint);
        }

        let bytes = job.as_bytes();
        self.transmit(bytes, &target.address).map_err(|source| {
            warn!(error = %source, "print failed");
            DispatchError {
                printer: target.name.clone(),
                address: target.address.clone(),
                source,
            }
        })?;

        info!(bytes = bytes.len(), "job sent");
        Ok(DispatchOutcome::Sent {
            labels: job.label_count(),
            bytes: bytes.len(),
        })
    }

    fn transmit(&self, bytes: &[u8], address: &str) -> Result<(), PrintError> {
        let mut conn = self.connector.connect(address, &self.config)?;
        conn.send_raw(bytes)?;
        conn.finish()
    }
}
