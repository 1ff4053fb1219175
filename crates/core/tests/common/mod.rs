//! Shared fixtures for `shiplabel_core` integration tests.

#![allow(unreachable_pub)]

use serde_json::json;
use shiplabel_core::{OrderRecord, PickLineItem};

/// A route batch as the data source returns it: padded strings, numeric
/// stops, one invoice repeated across two departments.
#[allow(dead_code)]
pub fn route_batch() -> Vec<OrderRecord> {
    serde_json::from_value(json!([
        {
            "INVOICE_NO": "884510", "CUSTOMER_NO": 10001, "CUSTOMER": "BLUE MOON DINER   ",
            "ADDRESS": "12 ELM ST", "CITY": "TYLER ", "STATE": "TX", "ZIP": "75701",
            "PO_NUM": "", "ROUTE": "14", "STOP": 1, "PICK_AREA": "DRY", "LABELS": 1
        },
        {
            "INVOICE_NO": "884511", "CUSTOMER_NO": 20815, "CUSTOMER": "BIG BOX MARKETS",
            "ADDRESS": "400 COMMERCE", "CITY": "DALLAS", "STATE": "TX", "ZIP": "75201",
            "PO_NUM": "PO-5512", "ROUTE": "14", "STOP": 2, "PICK_AREA": "DRY", "LABELS": 1
        },
        {
            "INVOICE_NO": "884512", "CUSTOMER_NO": 10002, "CUSTOMER": "CORNER CAFE",
            "CITY": "LONGVIEW", "STATE": null, "PO_NUM": "A-77", "ROUTE": "14", "STOP": 3,
            "PICK_AREA": "DRY", "LABELS": "2"
        },
        {
            "INVOICE_NO": "884512", "CUSTOMER_NO": 10002, "CUSTOMER": "CORNER CAFE",
            "CITY": "LONGVIEW", "PO_NUM": "A-77", "ROUTE": "14", "STOP": 3,
            "PICK_AREA": "FRZ", "LABELS": 0
        }
    ]))
    .expect("fixture rows decode")
}

/// Pick lines for the high-volume account across two invoices.
#[allow(dead_code)]
pub fn high_volume_picks() -> Vec<PickLineItem> {
    serde_json::from_value(json!([
        { "CUSTNO": 20815, "INVOICE": "884511", "LINENO": 1, "SKU": "100233",
          "DESCRIPTION": "PAPER TOWEL 12PK", "LOCATION": "N0101", "ORDERED": 3, "SHIPPED": 3 },
        { "CUSTNO": 20815, "INVOICE": "884511", "LINENO": 2, "SKU": "200871",
          "DESCRIPTION": "DICED TOMATO #10", "LOCATION": "C0420", "ORDERED": 12, "SHIPPED": 10 },
        { "CUSTNO": 20815, "INVOICE": "884511", "LINENO": 3, "SKU": "200872",
          "DESCRIPTION": "TOMATO PASTE #10", "LOCATION": "C0421", "ORDERED": 6, "SHIPPED": "4" },
        { "CUSTNO": 20815, "INVOICE": "990001", "LINENO": 1, "SKU": "300100",
          "DESCRIPTION": "NAPKINS", "LOCATION": "R2200", "ORDERED": 1, "SHIPPED": 1, "REGION": "CC" }
    ]))
    .expect("fixture rows decode")
}
