//! Order and pick-line records decoded from loosely typed rows.
//!
//! Rows arrive as JSON objects from whatever fetched them. Column names are
//! matched case-insensitively, any value may be a string, a number, or null,
//! and decoding never fails on field content: unusable values become blank
//! text, zero, or "no hint".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::region::Region;

/// A raw row as produced by the data source.
pub type Row = Map<String, Value>;

// ── Order records ───────────────────────────────────────────────────────

/// One shippable unit: a customer's order on a route stop.
///
/// All text is trimmed at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Row")]
pub struct OrderRecord {
    /// Route code.
    pub route: String,
    /// Stop number on the route.
    pub stop: String,
    /// Customer identifier.
    pub customer_no: String,
    /// Customer display name.
    pub customer: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Customer purchase-order reference.
    pub po_num: String,
    /// Invoice reference.
    pub invoice_no: String,
    /// Pick area / department code.
    pub pick_area: String,
    /// Label-count hint carried by the row, if any.
    pub labels: Option<i64>,
}

impl OrderRecord {
    /// Decode a row. Never fails; see the module docs for the coercion rules.
    pub fn from_row(row: &Row) -> Self {
        let row = RowView(row);
        let state = match row.text(&["STATE"]) {
            s if s.is_empty() => row.text(&["STATE_CD"]),
            s => s,
        };
        Self {
            route: row.text(&["ROUTE"]),
            stop: row.text(&["STOP"]),
            customer_no: row.text(&["CUSTOMER_NO", "CUSTNO"]),
            customer: row.text(&["CUSTOMER"]),
            address: row.text(&["ADDRESS"]),
            city: row.text(&["CITY"]),
            state,
            zip: row.text(&["ZIP"]),
            po_num: row.text(&["PO_NUM", "CUSTPO"]),
            invoice_no: row.text(&["INVOICE_NO", "INVOICE"]),
            pick_area: row.text(&["PICK_AREA"]),
            labels: row.int(&["LABELS"]),
        }
    }

    /// `"CITY, STATE"`, or whichever half is present, or empty.
    pub fn city_state(&self) -> String {
        match (self.city.trim(), self.state.trim()) {
            ("", state) => state.to_string(),
            (city, "") => city.to_string(),
            (city, state) => format!("{city}, {state}"),
        }
    }
}

impl From<Row> for OrderRecord {
    fn from(row: Row) -> Self {
        Self::from_row(&row)
    }
}

// ── Pick lines ──────────────────────────────────────────────────────────

/// One line of a customer's pick detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Row")]
pub struct PickLineItem {
    /// Customer identifier.
    #[serde(rename = "custno")]
    pub customer_no: String,
    /// Invoice reference.
    pub invoice: String,
    /// Line number on the invoice.
    #[serde(rename = "lineno")]
    pub line_no: i64,
    /// Customer purchase-order reference.
    #[serde(rename = "custpo")]
    pub customer_po: String,
    /// Stock-keeping code.
    pub sku: String,
    /// Pack quantity, as printed on the case.
    #[serde(rename = "qty2")]
    pub pack_qty: String,
    /// Item size.
    pub size: String,
    /// Item description.
    pub description: String,
    /// Storage slot the item is picked from.
    pub location: String,
    /// Quantity ordered.
    pub ordered: i64,
    /// Quantity shipped.
    pub shipped: i64,
}

impl PickLineItem {
    /// Decode a row. Any stored `REGION` column is ignored; see [`region`](Self::region).
    pub fn from_row(row: &Row) -> Self {
        let row = RowView(row);
        Self {
            customer_no: row.text(&["CUSTNO", "CUSTOMER_NO"]),
            invoice: row.text(&["INVOICE", "INVOICE_NO"]),
            line_no: row.int(&["LINENO"]).unwrap_or(0),
            customer_po: row.text(&["CUSTPO", "PO_NUM"]),
            sku: row.text(&["SKU"]),
            pack_qty: row.text(&["QTY2"]),
            size: row.text(&["SIZE"]),
            description: row.text(&["DESCRIPTION"]),
            location: row.text(&["LOCATION"]),
            ordered: row.int(&["ORDERED"]).unwrap_or(0),
            shipped: row.int(&["SHIPPED"]).unwrap_or(0),
        }
    }

    /// Region derived from the first character of the location.
    pub fn region(&self) -> Region {
        Region::of_location(&self.location)
    }
}

impl From<Row> for PickLineItem {
    fn from(row: Row) -> Self {
        Self::from_row(&row)
    }
}

// ── Value coercion ──────────────────────────────────────────────────────

struct RowView<'a>(&'a Row);

impl RowView<'_> {
    /// First non-null value among `names`, matched case-insensitively.
    fn get(&self, names: &[&str]) -> Option<&Value> {
        names.iter().find_map(|name| {
            self.0
                .iter()
                .find(|(k, v)| k.trim().eq_ignore_ascii_case(name) && !v.is_null())
                .map(|(_, v)| v)
        })
    }

    fn text(&self, names: &[&str]) -> String {
        self.get(names).map(value_text).unwrap_or_default()
    }

    fn int(&self, names: &[&str]) -> Option<i64> {
        self.get(names).and_then(value_int)
    }
}

/// Render a value as trimmed text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                        format!("{}", f as i64)
                    }
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
        // Nested structures never appear in well-formed rows.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Interpret a value as a signed integer, truncating fractions.
pub(crate) fn value_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().and_then(truncate_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_float))
        }
        _ => None,
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    // `as` saturates at the i64 bounds.
    f.is_finite().then(|| f.trunc() as i64)
}
