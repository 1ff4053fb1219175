//! Batch composition: selected records in, one print job out.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::job::LabelJob;
use crate::picklist::PickListPaginator;
use crate::quantity::{QuantityResolver, parse_override};
use crate::record::{OrderRecord, PickLineItem};
use crate::region::Region;
use crate::render::{LabelRenderer, RenderLabel};

// ── Sources and keys ────────────────────────────────────────────────────

/// Which candidate pool a record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSource {
    /// A route (optionally one department) of batch labels. The same invoice
    /// shows up once per department, so records are keyed by position.
    RouteBatch,
    /// A customer search over batch labels, keyed by invoice.
    Search,
    /// The one-off last-stop lookup, keyed by customer.
    OneOff,
}

impl RecordSource {
    /// Stable lower-case name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::RouteBatch => "batch",
            RecordSource::Search => "search",
            RecordSource::OneOff => "oneoff",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised source name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record source: {0} (expected batch, search, or oneoff)")]
pub struct UnknownSource(pub String);

impl FromStr for RecordSource {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batch" | "route" => Ok(RecordSource::RouteBatch),
            "search" | "vbatch_labels" => Ok(RecordSource::Search),
            "oneoff" | "one-off" => Ok(RecordSource::OneOff),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}

/// How selection keys are derived for a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keying {
    /// Zero-based position in the candidate set.
    Position,
    /// Invoice reference.
    Invoice,
    /// Customer identifier.
    Customer,
}

impl Keying {
    /// The key kind a source would use if its keys were unique.
    pub fn natural(source: RecordSource) -> Self {
        match source {
            RecordSource::RouteBatch => Keying::Position,
            RecordSource::Search => Keying::Invoice,
            RecordSource::OneOff => Keying::Customer,
        }
    }

    /// The key kind to use for `records`.
    ///
    /// Falls back to [`Keying::Position`] when natural keys collide, so two
    /// records can never answer to the same key.
    pub fn for_candidates(source: RecordSource, records: &[OrderRecord]) -> Self {
        let natural = Self::natural(source);
        if natural == Keying::Position {
            return natural;
        }
        let mut seen = HashSet::with_capacity(records.len());
        let collision = records
            .iter()
            .enumerate()
            .map(|(i, r)| natural.key_for(i, r))
            .find(|key| !seen.insert(key.clone()));
        match collision {
            Some(key) => {
                warn!(%source, %key, "duplicate selection key; keying candidates by position");
                Keying::Position
            }
            None => natural,
        }
    }

    /// Key of the record at `index`.
    pub fn key_for(&self, index: usize, record: &OrderRecord) -> String {
        match self {
            Keying::Position => index.to_string(),
            Keying::Invoice => record.invoice_no.trim().to_string(),
            Keying::Customer => record.customer_no.trim().to_string(),
        }
    }
}

/// Selection keys for every candidate, in order.
pub fn candidate_keys(source: RecordSource, records: &[OrderRecord]) -> Vec<String> {
    let keying = Keying::for_candidates(source, records);
    records
        .iter()
        .enumerate()
        .map(|(i, r)| keying.key_for(i, r))
        .collect()
}

// ── Selection ───────────────────────────────────────────────────────────

/// The operator's selection: which keys to print, and any quantity overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: HashSet<String>,
    overrides: HashMap<String, NonZeroU32>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every key in `keys`.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sel = Self::new();
        for key in keys {
            sel.select(key);
        }
        sel
    }

    /// Mark `key` for printing.
    pub fn select(&mut self, key: impl Into<String>) -> &mut Self {
        self.keys.insert(key.into().trim().to_string());
        self
    }

    /// Record a raw override for `key`. Text that is not a positive integer
    /// is dropped; the default quantity rule then applies.
    pub fn set_override(&mut self, key: impl Into<String>, raw: &str) -> &mut Self {
        let key = key.into().trim().to_string();
        match parse_override(raw) {
            Some(n) => {
                self.overrides.insert(key, n);
            }
            None => {
                debug!(%key, raw, "ignoring quantity override");
                self.overrides.remove(&key);
            }
        }
        self
    }

    /// Returns `true` if `key` is selected.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Override for `key`, if a valid one was given.
    pub fn override_for(&self, key: &str) -> Option<NonZeroU32> {
        self.overrides.get(key).copied()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ── Composer ────────────────────────────────────────────────────────────

/// One selected record and the number of labels it will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRecord<'r> {
    /// Position in the candidate set.
    pub index: usize,
    /// The record.
    pub record: &'r OrderRecord,
    /// Resolved label count.
    pub quantity: NonZeroU32,
}

/// Turns selections into print jobs.
#[derive(Debug, Clone)]
pub struct BatchComposer<'a, R = LabelRenderer<'a>> {
    resolver: QuantityResolver<'a>,
    renderer: R,
    paginator: PickListPaginator,
}

impl<'a, R: RenderLabel> BatchComposer<'a, R> {
    /// A composer using the given quantity resolver and renderer.
    pub fn new(resolver: QuantityResolver<'a>, renderer: R) -> Self {
        Self {
            resolver,
            renderer,
            paginator: PickListPaginator::new(),
        }
    }

    /// The selected records in candidate order, with their quantities.
    pub fn plan<'r>(
        &self,
        records: &'r [OrderRecord],
        source: RecordSource,
        selection: &Selection,
    ) -> Vec<PlannedRecord<'r>> {
        if selection.is_empty() {
            return Vec::new();
        }
        let keying = Keying::for_candidates(source, records);
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let key = keying.key_for(index, record);
                if !selection.contains(&key) {
                    return None;
                }
                let quantity = self.resolver.resolve(record, selection.override_for(&key));
                Some(PlannedRecord {
                    index,
                    record,
                    quantity,
                })
            })
            .collect()
    }

    /// Compose the shipping labels for the selected records.
    ///
    /// Records print in candidate order, each record's copies together.
    /// Every copy is rendered with its own 1-based index. An empty selection
    /// or one that matches nothing yields an empty job.
    pub fn compose(
        &self,
        records: &[OrderRecord],
        source: RecordSource,
        selection: &Selection,
    ) -> LabelJob {
        let mut job = LabelJob::new();
        for planned in self.plan(records, source, selection) {
            let total = planned.quantity.get();
            for label_index in 1..=total {
                job.push_label(&self.renderer.render(planned.record, label_index, total));
            }
            debug!(
                index = planned.index,
                invoice = %planned.record.invoice_no,
                quantity = total,
                "composed record"
            );
        }
        debug!(labels = job.label_count(), bytes = job.as_bytes().len(), "composed job");
        job
    }

    /// Compose pick-list labels for every region in `grouped`, region by region.
    pub fn compose_pick_lists(&self, grouped: &BTreeMap<Region, Vec<PickLineItem>>) -> LabelJob {
        let mut job = LabelJob::new();
        for (region, items) in grouped {
            let pages = self.paginator.paginate(items, *region);
            debug!(region = %region, items = items.len(), pages = pages.len(), "paginated region");
            for page in &pages {
                job.push_label(page);
            }
        }
        job
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyTable;

    fn record(invoice: &str, customer_no: &str, labels: i64) -> OrderRecord {
        OrderRecord {
            route: "14".into(),
            stop: "1".into(),
            customer_no: customer_no.into(),
            customer: format!("CUSTOMER {invoice}"),
            invoice_no: invoice.into(),
            labels: Some(labels),
            ..Default::default()
        }
    }

    fn count_labels(job: &LabelJob) -> usize {
        String::from_utf8_lossy(job.as_bytes()).matches("^XA").count()
    }

    #[test]
    fn source_names_parse() {
        assert_eq!("batch".parse::<RecordSource>(), Ok(RecordSource::RouteBatch));
        assert_eq!("Search".parse::<RecordSource>(), Ok(RecordSource::Search));
        assert_eq!("oneoff".parse::<RecordSource>(), Ok(RecordSource::OneOff));
        assert!("misc".parse::<RecordSource>().is_err());
    }

    #[test]
    fn keying_falls_back_to_position_on_duplicates() {
        let records = vec![record("100", "1", 1), record("100", "2", 1)];
        assert_eq!(
            Keying::for_candidates(RecordSource::Search, &records),
            Keying::Position
        );
        assert_eq!(candidate_keys(RecordSource::Search, &records), ["0", "1"]);
        let unique = vec![record("100", "1", 1), record("101", "1", 1)];
        assert_eq!(candidate_keys(RecordSource::Search, &unique), ["100", "101"]);
        assert_eq!(candidate_keys(RecordSource::RouteBatch, &unique), ["0", "1"]);
    }

    #[test]
    fn invalid_override_is_dropped() {
        let mut sel = Selection::with_keys(["100"]);
        sel.set_override("100", "5");
        assert_eq!(sel.override_for("100"), NonZeroU32::new(5));
        sel.set_override("100", "zero");
        assert_eq!(sel.override_for("100"), None);
    }

    #[test]
    fn composes_selected_records_in_order() {
        let table = PolicyTable::default();
        let composer =
            BatchComposer::new(QuantityResolver::new(&table), LabelRenderer::new(&table));
        let records = vec![
            record("100", "1", 1),
            record("101", "2", 9),
            record("102", "3", 4),
            record("103", "4", 2),
        ];
        let sel = Selection::with_keys(["103", "100", "102"]);
        let job = composer.compose(&records, RecordSource::Search, &sel);
        assert_eq!(job.label_count(), 7);
        assert_eq!(count_labels(&job), 7);

        let text = String::from_utf8_lossy(job.as_bytes());
        let first = text.find("CUSTOMER 100").unwrap();
        let third = text.find("CUSTOMER 102").unwrap();
        let fourth = text.find("CUSTOMER 103").unwrap();
        assert!(first < third && third < fourth);
        assert!(!text.contains("CUSTOMER 101"));
    }

    #[test]
    fn overrides_apply_by_key() {
        let table = PolicyTable::default();
        let composer =
            BatchComposer::new(QuantityResolver::new(&table), LabelRenderer::new(&table));
        let records = vec![record("100", "1", 1)];
        let mut sel = Selection::with_keys(["0"]);
        sel.set_override("0", "3");
        let job = composer.compose(&records, RecordSource::RouteBatch, &sel);
        assert_eq!(job.label_count(), 3);
    }

    #[derive(Default)]
    struct Recorder {
        calls: std::cell::RefCell<Vec<(String, u32, u32)>>,
    }

    impl RenderLabel for Recorder {
        fn render(&self, record: &OrderRecord, label_index: u32, total_labels: u32) -> Vec<u8> {
            self.calls
                .borrow_mut()
                .push((record.invoice_no.clone(), label_index, total_labels));
            format!("^XA^FD{} {label_index}/{total_labels}^FS^XZ", record.invoice_no).into_bytes()
        }
    }

    #[test]
    fn each_copy_is_rendered_with_its_index() {
        let table = PolicyTable::default();
        let composer = BatchComposer::new(QuantityResolver::new(&table), Recorder::default());
        let records = vec![record("100", "1", 3), record("101", "2", 2)];
        let sel = Selection::with_keys(["100", "101"]);
        let job = composer.compose(&records, RecordSource::Search, &sel);

        let calls = composer.renderer.calls.borrow().clone();
        let expected: Vec<(String, u32, u32)> = [
            ("100", 1, 3),
            ("100", 2, 3),
            ("100", 3, 3),
            ("101", 1, 2),
            ("101", 2, 2),
        ]
        .into_iter()
        .map(|(invoice, i, n)| (invoice.to_string(), i, n))
        .collect();
        assert_eq!(calls, expected);
        assert_eq!(job.label_count(), 5);

        let text = String::from_utf8_lossy(job.as_bytes());
        assert!(text.starts_with("^XA^FD100 1/3^FS^XZ^XA^FD100 2/3^FS^XZ"));
        assert!(text.ends_with("^XA^FD101 1/2^FS^XZ^XA^FD101 2/2^FS^XZ"));
    }

    #[test]
    fn empty_selection_is_empty_job() {
        let table = PolicyTable::default();
        let composer =
            BatchComposer::new(QuantityResolver::new(&table), LabelRenderer::new(&table));
        let records = vec![record("100", "1", 3)];
        let job = composer.compose(&records, RecordSource::Search, &Selection::new());
        assert!(job.is_empty());
        assert!(job.as_bytes().is_empty());
        let job = composer.compose(&records, RecordSource::Search, &Selection::with_keys(["999"]));
        assert!(job.is_empty());
    }

    #[test]
    fn pick_lists_count_pages() {
        let table = PolicyTable::default();
        let composer =
            BatchComposer::new(QuantityResolver::new(&table), LabelRenderer::new(&table));
        let items: Vec<PickLineItem> = (0..14)
            .map(|i| PickLineItem {
                location: if i < 13 { format!("N{i:03}") } else { "A001".into() },
                ..Default::default()
            })
            .collect();
        let grouped = crate::region::group_by_region(items);
        let job = composer.compose_pick_lists(&grouped);
        // DEPT A: 1 page, MW: 2 pages
        assert_eq!(job.label_count(), 3);
        let text = String::from_utf8_lossy(job.as_bytes());
        assert!(text.find("DEPT A").unwrap() < text.find("Main Warehouse").unwrap());
    }
}
