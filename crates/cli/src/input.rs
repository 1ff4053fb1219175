//! Loading record files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use shiplabel_core::{OrderRecord, PickLineItem};

/// Read a JSON array of order rows.
pub(crate) fn load_orders(path: &Path) -> Result<Vec<OrderRecord>> {
    load_rows(path, "records")
}

/// Read a JSON array of pick-line rows.
pub(crate) fn load_picks(path: &Path) -> Result<Vec<PickLineItem>> {
    load_rows(path, "pick detail")
}

fn load_rows<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file '{}'", path.display()))?;
    let rows: Vec<T> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {what} file '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded {}", what);
    Ok(rows)
}
