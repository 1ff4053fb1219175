mod input;
mod registry;
mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use shiplabel_core::{
    BatchComposer, HIGH_VOLUME_CUSTOMER, LabelJob, LabelRenderer, OrderRecord, PickLabelCounts,
    PickLineItem, PolicyTable, QuantityPolicy, QuantityResolver, RecordSource, Region, Selection,
    candidate_keys, group_by_region, sample_record,
};
use shiplabel_print_client::{Dispatcher, PrinterConfig, PrinterTarget};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::registry::PrinterRegistry;
use crate::render::{Format, ListEntry};

/// Environment variable holding the log filter (`tracing` directives).
const LOG_ENV: &str = "SHIPLABEL_LOG";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "shiplabel",
    version,
    about = "Compose and print warehouse shipping and pick-list labels on Zebra printers"
)]
struct Cli {
    /// Output mode: "pretty" for terminal text, "json" for machine-readable
    /// JSON. Defaults to "pretty" when stdout is a TTY, "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List candidate records with their selection keys and label counts.
    List {
        /// JSON array of order rows.
        records: PathBuf,
        /// Where the records came from; decides how they are keyed.
        #[arg(long, default_value = "batch")]
        source: RecordSource,
        /// JSON array of pick-line rows, for pick-derived quantities.
        #[arg(long)]
        picks: Option<PathBuf>,
    },

    /// Print shipping labels for selected records.
    Labels {
        /// JSON array of order rows.
        records: PathBuf,
        /// Where the records came from; decides how they are keyed.
        #[arg(long, default_value = "batch")]
        source: RecordSource,
        /// Selection keys to print (see `list`).
        #[arg(
            long,
            value_name = "KEY",
            num_args = 1..,
            value_delimiter = ',',
            required_unless_present = "all",
            conflicts_with = "all"
        )]
        select: Vec<String>,
        /// Print every record.
        #[arg(long)]
        all: bool,
        /// Label count override for one key. Values that are not a positive
        /// whole number are ignored; counts above 999 are clamped.
        #[arg(long = "qty", value_name = "KEY=N")]
        qty: Vec<String>,
        /// JSON array of pick-line rows, for pick-derived quantities.
        #[arg(long)]
        picks: Option<PathBuf>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print pick lists for one customer, one page set per region.
    PickList {
        /// JSON array of pick-line rows.
        picks: PathBuf,
        /// Customer whose lines to print.
        #[arg(long, default_value = HIGH_VOLUME_CUSTOMER)]
        customer: String,
        /// Only print this region (e.g. "C", or "MW" for the overflow region).
        #[arg(long)]
        region: Option<Region>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print one sample label to check a printer.
    TestPrint {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Where a job goes.
#[derive(Args, Debug)]
struct TargetArgs {
    /// Printer name from the registry.
    #[arg(
        long,
        conflicts_with = "address",
        required_unless_present_any = ["address", "dry_run"]
    )]
    printer: Option<String>,
    /// Printer registry: JSON array of {"name", "ip"} entries.
    #[arg(long, value_name = "FILE", default_value = "printers.json")]
    printers: PathBuf,
    /// Printer address (`IP`, `IP:PORT`, `hostname`, `hostname:PORT`).
    #[arg(long, value_name = "HOST[:PORT]")]
    address: Option<String>,
    /// Connect and write timeout in seconds.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
    /// Write the ZPL to stdout instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

impl TargetArgs {
    fn resolve(&self) -> Result<PrinterTarget> {
        if let Some(address) = &self.address {
            let address = address.trim();
            return Ok(PrinterTarget::new(address, address));
        }
        let Some(name) = &self.printer else {
            bail!("no printer given; use --printer NAME or --address HOST[:PORT]");
        };
        let registry = PrinterRegistry::load(&self.printers)?;
        Ok(registry.lookup(name)?.clone())
    }

    fn config(&self) -> PrinterConfig {
        PrinterConfig::with_timeout(Duration::from_secs(self.timeout))
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli.cmd, format) {
        render::command_failed(format, &err);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::List {
            records,
            source,
            picks,
        } => cmd_list(&records, source, picks.as_deref(), format),
        Cmd::Labels {
            records,
            source,
            select,
            all,
            qty,
            picks,
            target,
        } => cmd_labels(
            &records,
            source,
            &select,
            all,
            &qty,
            picks.as_deref(),
            &target,
            format,
        ),
        Cmd::PickList {
            picks,
            customer,
            region,
            target,
        } => cmd_pick_list(&picks, &customer, region, &target, format),
        Cmd::TestPrint { target } => cmd_test_print(&target, format),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_list(
    records_path: &Path,
    source: RecordSource,
    picks_path: Option<&Path>,
    format: Format,
) -> Result<()> {
    let records = input::load_orders(records_path)?;
    let picks = picks_path.map(input::load_picks).transpose()?;
    let policies = PolicyTable::default();
    warn_if_picks_missing(&policies, &records, picks.is_some());
    let composer = composer(&policies, picks.as_deref());

    let keys = candidate_keys(source, &records);
    let everything = Selection::with_keys(keys.iter().cloned());
    let entries: Vec<ListEntry> = composer
        .plan(&records, source, &everything)
        .into_iter()
        .map(|planned| ListEntry {
            key: keys[planned.index].clone(),
            customer_no: planned.record.customer_no.clone(),
            customer: planned.record.customer.clone(),
            route: planned.record.route.clone(),
            stop: planned.record.stop.clone(),
            invoice: planned.record.invoice_no.clone(),
            pick_area: planned.record.pick_area.clone(),
            labels: planned.quantity.get(),
        })
        .collect();

    render::print_listing(format, &entries)
}

#[allow(clippy::too_many_arguments)]
fn cmd_labels(
    records_path: &Path,
    source: RecordSource,
    select: &[String],
    all: bool,
    qty: &[String],
    picks_path: Option<&Path>,
    target: &TargetArgs,
    format: Format,
) -> Result<()> {
    let records = input::load_orders(records_path)?;
    let picks = picks_path.map(input::load_picks).transpose()?;
    let policies = PolicyTable::default();
    warn_if_picks_missing(&policies, &records, picks.is_some());

    let keys = candidate_keys(source, &records);
    let mut selection = if all {
        Selection::with_keys(keys.iter().cloned())
    } else {
        for key in select {
            if !keys.iter().any(|k| k == key.trim()) {
                warn!(key = %key.trim(), "selection key matches no record");
            }
        }
        Selection::with_keys(select.iter().cloned())
    };
    for arg in qty {
        let Some((key, raw)) = arg.split_once('=') else {
            bail!("--qty expects KEY=N, got '{arg}'");
        };
        selection.set_override(key, raw);
    }

    let job = composer(&policies, picks.as_deref()).compose(&records, source, &selection);
    deliver(&job, target, format)
}

fn cmd_pick_list(
    picks_path: &Path,
    customer: &str,
    region: Option<Region>,
    target: &TargetArgs,
    format: Format,
) -> Result<()> {
    let customer = customer.trim();
    let items = input::load_picks(picks_path)?;
    let mut grouped = group_by_region(items.into_iter().filter(|i| i.customer_no == customer));
    if let Some(region) = region {
        grouped.retain(|r, _| *r == region);
    }

    let policies = PolicyTable::default();
    let job = composer(&policies, None).compose_pick_lists(&grouped);
    deliver(&job, target, format)
}

fn cmd_test_print(target: &TargetArgs, format: Format) -> Result<()> {
    let records = [sample_record()];
    let policies = PolicyTable::default();
    let job = composer(&policies, None).compose(
        &records,
        RecordSource::RouteBatch,
        &Selection::with_keys(["0"]),
    );
    deliver(&job, target, format)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn composer<'a>(policies: &'a PolicyTable, picks: Option<&[PickLineItem]>) -> BatchComposer<'a> {
    let mut resolver = QuantityResolver::new(policies);
    if let Some(items) = picks {
        resolver = resolver.with_pick_counts(PickLabelCounts::from_items(items));
    }
    BatchComposer::new(resolver, LabelRenderer::new(policies))
}

/// Pick-derived customers fall back to one label without pick detail.
fn warn_if_picks_missing(policies: &PolicyTable, records: &[OrderRecord], have_picks: bool) {
    if have_picks {
        return;
    }
    for customer in policies.customers_with(QuantityPolicy::PickDerived) {
        if records.iter().any(|r| r.customer_no == customer) {
            warn!(%customer, "no --picks file; pick-derived label counts default to 1");
        }
    }
}

fn deliver(job: &LabelJob, target: &TargetArgs, format: Format) -> Result<()> {
    if job.is_empty() {
        render::nothing_to_print(format);
        return Ok(());
    }

    if target.dry_run {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(job.as_bytes())
            .and_then(|()| stdout.flush())
            .context("failed to write ZPL to stdout")?;
        render::dry_run_summary(job.label_count(), job.as_bytes().len());
        return Ok(());
    }

    let printer = target.resolve()?;
    let outcome = Dispatcher::tcp(target.config()).dispatch(job, &printer)?;
    render::dispatched(format, &printer, outcome);
    Ok(())
}
