//! Label quantity resolution.
//!
//! Order of precedence: an explicit operator override, then the customer's
//! quantity policy. The result is always at least one label.

use std::collections::HashMap;
use std::num::NonZeroU32;

use tracing::warn;

use crate::policy::{PolicyTable, QuantityPolicy};
use crate::record::{OrderRecord, PickLineItem};

/// Units per label for pick lines outside the overflow region.
pub const UNITS_PER_LABEL: u64 = 6;

/// Most labels one record may produce. Larger resolved counts are clamped.
pub const MAX_LABELS_PER_RECORD: u32 = 999;

/// Parse an operator-supplied quantity override.
///
/// Only plain decimal digits naming a positive `u32` are accepted; anything
/// else (signs, fractions, words, zero) yields `None` so the default rule
/// applies.
pub fn parse_override(raw: &str) -> Option<NonZeroU32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().and_then(NonZeroU32::new)
}

/// Label counts computed from pick lines, keyed by customer and invoice.
///
/// Shipped units in the overflow region earn one label each. Every other
/// line earns its shipped units divided by [`UNITS_PER_LABEL`], rounded up
/// per line. An invoice's count is the sum over its lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickLabelCounts {
    by_invoice: HashMap<(String, String), u32>,
}

impl PickLabelCounts {
    /// Aggregate label counts from pick lines.
    ///
    /// Negative shipped quantities count as zero.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a PickLineItem>,
    {
        let mut labels: HashMap<(String, String), u64> = HashMap::new();
        for item in items {
            let shipped = u64::try_from(item.shipped).unwrap_or(0);
            let contribution = if item.region().is_overflow() {
                shipped
            } else {
                shipped.div_ceil(UNITS_PER_LABEL)
            };
            let key = (
                item.customer_no.trim().to_string(),
                item.invoice.trim().to_string(),
            );
            let total = labels.entry(key).or_default();
            *total = total.saturating_add(contribution);
        }

        let by_invoice = labels
            .into_iter()
            .map(|(key, n)| (key, u32::try_from(n).unwrap_or(u32::MAX)))
            .collect();
        Self { by_invoice }
    }

    /// Computed count for an invoice, or `None` if it has no lines or
    /// computed to zero.
    pub fn get(&self, customer_no: &str, invoice: &str) -> Option<NonZeroU32> {
        self.by_invoice
            .get(&(customer_no.trim().to_string(), invoice.trim().to_string()))
            .copied()
            .and_then(NonZeroU32::new)
    }

    /// Number of invoices with computed counts.
    pub fn len(&self) -> usize {
        self.by_invoice.len()
    }

    /// Returns `true` if no pick lines were aggregated.
    pub fn is_empty(&self) -> bool {
        self.by_invoice.is_empty()
    }
}

/// Resolves how many labels a record needs.
#[derive(Debug, Clone)]
pub struct QuantityResolver<'a> {
    policies: &'a PolicyTable,
    pick_counts: PickLabelCounts,
}

impl<'a> QuantityResolver<'a> {
    /// A resolver with no pick-line data. Pick-derived customers resolve to 1.
    pub fn new(policies: &'a PolicyTable) -> Self {
        Self {
            policies,
            pick_counts: PickLabelCounts::default(),
        }
    }

    /// Supply the pick-line counts used by pick-derived customers.
    pub fn with_pick_counts(mut self, counts: PickLabelCounts) -> Self {
        self.pick_counts = counts;
        self
    }

    /// Number of labels to print for `record`, at most
    /// [`MAX_LABELS_PER_RECORD`].
    pub fn resolve(&self, record: &OrderRecord, explicit: Option<NonZeroU32>) -> NonZeroU32 {
        let resolved = explicit.unwrap_or_else(|| self.policy_quantity(record));
        if resolved.get() <= MAX_LABELS_PER_RECORD {
            return resolved;
        }
        warn!(
            invoice = %record.invoice_no,
            customer = %record.customer_no,
            requested = resolved.get(),
            max = MAX_LABELS_PER_RECORD,
            "label count clamped"
        );
        NonZeroU32::new(MAX_LABELS_PER_RECORD).unwrap_or(NonZeroU32::MIN)
    }

    fn policy_quantity(&self, record: &OrderRecord) -> NonZeroU32 {
        match self.policies.policy_for(&record.customer_no).quantity {
            QuantityPolicy::PickDerived => self
                .pick_counts
                .get(&record.customer_no, &record.invoice_no)
                .unwrap_or(NonZeroU32::MIN),
            QuantityPolicy::HintBased => hint_quantity(record.labels),
        }
    }
}

/// Positive hints are used as-is (saturating at `u32::MAX`); anything else is 1.
fn hint_quantity(hint: Option<i64>) -> NonZeroU32 {
    hint.filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN)
}
