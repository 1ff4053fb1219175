//! Operator-facing output.
//!
//! Every command reports through here so `--output json` always yields one
//! JSON document on stdout, including on failure. Pretty status lines go to
//! stderr; stdout is reserved for listings and dry-run ZPL.

use std::io::{self, IsTerminal};

use serde::Serialize;
use shiplabel_print_client::{DispatchOutcome, PrinterTarget};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human-readable text.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty for a terminal and JSON for a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Listing ─────────────────────────────────────────────────────────────

/// One row of `shiplabel list`.
#[derive(Debug, Serialize)]
pub(crate) struct ListEntry {
    pub(crate) key: String,
    pub(crate) customer_no: String,
    pub(crate) customer: String,
    pub(crate) route: String,
    pub(crate) stop: String,
    pub(crate) invoice: String,
    pub(crate) pick_area: String,
    pub(crate) labels: u32,
}

pub(crate) fn print_listing(format: Format, entries: &[ListEntry]) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": true,
                "records": entries,
                "total_labels": entries.iter().map(|e| u64::from(e.labels)).sum::<u64>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!(
                "{:<8} {:<28} {:<8} {:<10} {:<6} {:>6}",
                "KEY", "CUSTOMER", "RT/ST", "INVOICE", "PICK", "LABELS"
            );
            for e in entries {
                println!(
                    "{:<8} {:<28} {:<8} {:<10} {:<6} {:>6}",
                    e.key,
                    truncate(&e.customer, 28),
                    format!("{}/{}", e.route, e.stop),
                    e.invoice,
                    e.pick_area,
                    e.labels
                );
            }
            if entries.is_empty() {
                eprintln!("no records");
            }
        }
    }
    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

// ── Delivery ────────────────────────────────────────────────────────────

pub(crate) fn nothing_to_print(format: Format) {
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "success": true,
                "printed": false,
                "labels": 0,
                "message": "nothing to print",
            })
        ),
        Format::Pretty => eprintln!("nothing to print"),
    }
}

/// Dry-run jobs put ZPL on stdout, so the summary always goes to stderr.
pub(crate) fn dry_run_summary(labels: u32, bytes: usize) {
    eprintln!("dry run: {labels} label(s), {bytes} bytes, not sent");
}

pub(crate) fn dispatched(format: Format, target: &PrinterTarget, outcome: DispatchOutcome) {
    match outcome {
        DispatchOutcome::NothingToPrint => nothing_to_print(format),
        DispatchOutcome::Sent { labels, bytes } => match format {
            Format::Json => println!(
                "{}",
                serde_json::json!({
                    "success": true,
                    "printed": true,
                    "printer": target.name,
                    "address": target.address,
                    "labels": labels,
                    "bytes": bytes,
                })
            ),
            Format::Pretty => eprintln!("Sent {labels} label(s) to {}", target.name),
        },
    }
}

// ── Errors ──────────────────────────────────────────────────────────────

pub(crate) fn command_failed(format: Format, err: &anyhow::Error) {
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            })
        ),
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}
