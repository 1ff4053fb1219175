//! Named printer registry (`printers.json`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use shiplabel_print_client::PrinterTarget;

/// Printers the operator can pick by name.
#[derive(Debug, Default)]
pub(crate) struct PrinterRegistry {
    printers: Vec<PrinterTarget>,
}

impl PrinterRegistry {
    /// Read a JSON array of `{"name": ..., "ip": ...}` entries.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read printer registry '{}'", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("invalid printer registry '{}'", path.display()))
    }

    pub(crate) fn from_json(text: &str) -> Result<Self> {
        let printers: Vec<PrinterTarget> = serde_json::from_str(text)?;
        Ok(Self { printers })
    }

    /// Find a printer by name, ignoring case and surrounding whitespace.
    pub(crate) fn lookup(&self, name: &str) -> Result<&PrinterTarget> {
        let wanted = name.trim();
        if let Some(found) = self
            .printers
            .iter()
            .find(|p| p.name.trim().eq_ignore_ascii_case(wanted))
        {
            return Ok(found);
        }
        let known: Vec<&str> = self.printers.iter().map(|p| p.name.as_str()).collect();
        if known.is_empty() {
            bail!("unknown printer '{wanted}' (the registry is empty)");
        }
        bail!("unknown printer '{wanted}' (known: {})", known.join(", "))
    }
}
