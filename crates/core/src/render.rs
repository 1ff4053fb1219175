//! Shipping-label layouts (4x6 stock, 203 dpi).

use crate::policy::{LayoutPolicy, PolicyTable};
use crate::record::OrderRecord;
use crate::zpl::ZplWriter;

/// Produces the ZPL for one physical shipping label.
pub trait RenderLabel {
    /// Render label `label_index` (1-based) of `total_labels` for `record`.
    fn render(&self, record: &OrderRecord, label_index: u32, total_labels: u32) -> Vec<u8>;
}

/// Renders one physical shipping label per call.
#[derive(Debug, Clone, Copy)]
pub struct LabelRenderer<'a> {
    policies: &'a PolicyTable,
}

impl<'a> LabelRenderer<'a> {
    /// A renderer that picks layouts from `policies`.
    pub fn new(policies: &'a PolicyTable) -> Self {
        Self { policies }
    }

    /// Render label `label_index` of `total_labels` for `record`.
    ///
    /// Neither layout prints the index yet.
    pub fn render(&self, record: &OrderRecord, label_index: u32, total_labels: u32) -> Vec<u8> {
        let _ = (label_index, total_labels);
        match self.layout_for(record) {
            LayoutPolicy::Standard => standard_label(record),
            LayoutPolicy::PoProminent => po_prominent_label(record),
        }
    }

    /// Layout that [`render`](Self::render) uses for `record`.
    pub fn layout_for(&self, record: &OrderRecord) -> LayoutPolicy {
        self.policies.policy_for(&record.customer_no).layout
    }
}

impl RenderLabel for LabelRenderer<'_> {
    fn render(&self, record: &OrderRecord, label_index: u32, total_labels: u32) -> Vec<u8> {
        LabelRenderer::render(self, record, label_index, total_labels)
    }
}

fn standard_label(record: &OrderRecord) -> Vec<u8> {
    let mut zpl = ZplWriter::new();
    zpl.font(130)
        .text(50, 50, &format!("RT: {}", record.route.trim()))
        .text(450, 50, &format!("ST: {}", record.stop.trim()))
        .rule(50, 200, 700, 4)
        .font(55)
        .text(50, 230, record.customer.trim())
        .font(45)
        .text(50, 310, &record.city_state())
        .rule(50, 380, 700, 4)
        .font(35);

    let invoice = record.invoice_no.trim();
    if !invoice.is_empty() {
        zpl.text(50, 410, &format!("Invoice: {invoice}"));
    }
    let po = record.po_num.trim();
    if !po.is_empty() {
        zpl.text(450, 410, &format!("PO: {po}"));
    }
    let pick_area = record.pick_area.trim();
    if !pick_area.is_empty() {
        zpl.text(50, 460, &format!("Pick: {pick_area}"));
    }

    zpl.rule(50, 520, 700, 4);
    zpl.finish()
}

// Fixed geometry: the pressure-sensitive stock has pre-printed boxes, so
// every slot prints even when empty.
fn po_prominent_label(record: &OrderRecord) -> Vec<u8> {
    let mut zpl = ZplWriter::new();
    zpl.font(80)
        .text(50, 30, &format!("PO: {}", record.po_num.trim()))
        .rule(50, 120, 700, 4)
        .font(100)
        .text(50, 140, &format!("RT: {}", record.route.trim()))
        .text(400, 140, &format!("ST: {}", record.stop.trim()))
        .rule(50, 260, 700, 4)
        .font(50)
        .text(50, 290, record.customer.trim())
        .font(40)
        .text(50, 360, &record.city_state())
        .rule(50, 420, 700, 4)
        .font(35)
        .text(50, 450, &format!("Invoice: {}", record.invoice_no.trim()))
        .text(50, 500, &format!("Pick: {}", record.pick_area.trim()));
    zpl.finish()
}
