//! Warehouse label composition.
//!
//! Decides how many labels each order needs ([`QuantityResolver`]), renders
//! shipping labels as ZPL ([`LabelRenderer`]), spreads pick lists over pages
//! ([`PickListPaginator`]), and assembles selected records into one
//! [`LabelJob`] ([`BatchComposer`]). Nothing here performs I/O; delivering a
//! job is the print client's concern.

#![warn(missing_docs)]

/// Selection keys, selections, and batch composition.
pub mod compose;
/// Hex escape encoding for `^FH` field data.
pub mod hex_escape;
/// The composed print job.
pub mod job;
/// Pick-list pagination and layout.
pub mod picklist;
/// Per-customer layout and quantity policies.
pub mod policy;
/// Label quantity rules.
pub mod quantity;
/// Order and pick-line records.
pub mod record;
/// Pick regions derived from storage locations.
pub mod region;
/// Shipping-label layouts.
pub mod render;
/// Low-level ZPL command writer.
pub mod zpl;

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use compose::{
    BatchComposer, Keying, PlannedRecord, RecordSource, Selection, UnknownSource, candidate_keys,
};
pub use job::LabelJob;
pub use picklist::{PickListPaginator, ROWS_PER_PAGE, page_count};
pub use policy::{
    CustomerPolicy, HIGH_VOLUME_CUSTOMER, LayoutPolicy, PolicyTable, QuantityPolicy,
};
pub use quantity::{
    MAX_LABELS_PER_RECORD, PickLabelCounts, QuantityResolver, UNITS_PER_LABEL, parse_override,
};
pub use record::{OrderRecord, PickLineItem, Row};
pub use region::{Region, RegionParseError, group_by_region};
pub use render::{LabelRenderer, RenderLabel};

/// A standard-layout sample record for test prints.
pub fn sample_record() -> OrderRecord {
    OrderRecord {
        route: "14".into(),
        stop: "03".into(),
        customer: "ACME WHOLESALE FOODS".into(),
        city: "DALLAS".into(),
        state: "TX".into(),
        invoice_no: "123456".into(),
        po_num: "PO-99887".into(),
        pick_area: "DRY".into(),
        ..Default::default()
    }
}
