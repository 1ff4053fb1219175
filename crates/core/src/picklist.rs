//! Pick-list labels: one region's pick lines spread over 4x6 portrait pages.
//!
//! The portrait layout with 12 rows per page is the only supported variant.
//! Older landscape and 8/10-row variants are not reproduced.

use crate::record::PickLineItem;
use crate::region::Region;
use crate::zpl::ZplWriter;

/// Pick lines per physical label.
pub const ROWS_PER_PAGE: usize = 12;

/// Vertical distance between rows, in dots.
pub const ROW_HEIGHT: u32 = 80;

/// Y position of the first data row on every page.
const FIRST_ROW_Y: u32 = 150;
const LEFT: u32 = 30;
const CONTENT_WIDTH: u32 = 752;

/// Number of pages needed for `item_count` lines.
pub fn page_count(item_count: usize) -> usize {
    item_count.div_ceil(ROWS_PER_PAGE)
}

#[derive(Debug, Clone, Copy)]
enum Cell {
    LineNo,
    Location,
    Sku,
    Description,
    PackQty,
    Size,
    Ordered,
    Shipped,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    title: &'static str,
    x: u32,
    /// Maximum characters for text cells. Numeric cells are never cut.
    width: usize,
    cell: Cell,
}

const COLUMNS: [Column; 8] = [
    Column { title: "LN", x: 30, width: 3, cell: Cell::LineNo },
    Column { title: "LOC", x: 75, width: 7, cell: Cell::Location },
    Column { title: "SKU", x: 170, width: 8, cell: Cell::Sku },
    Column { title: "DESCRIPTION", x: 280, width: 20, cell: Cell::Description },
    Column { title: "PK", x: 530, width: 4, cell: Cell::PackQty },
    Column { title: "SIZE", x: 590, width: 6, cell: Cell::Size },
    Column { title: "ORD", x: 675, width: 4, cell: Cell::Ordered },
    Column { title: "SHP", x: 735, width: 4, cell: Cell::Shipped },
];

impl Column {
    fn value(&self, item: &PickLineItem) -> String {
        match self.cell {
            Cell::LineNo => item.line_no.to_string(),
            Cell::Ordered => item.ordered.to_string(),
            Cell::Shipped => item.shipped.to_string(),
            Cell::Location => truncate(&item.location, self.width),
            Cell::Sku => truncate(&item.sku, self.width),
            Cell::Description => truncate(&item.description, self.width),
            Cell::PackQty => truncate(&item.pack_qty, self.width),
            Cell::Size => truncate(&item.size, self.width),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.trim().chars().take(width).collect()
}

/// Splits a region's pick lines into pages and renders each as one label.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickListPaginator;

impl PickListPaginator {
    /// Create a paginator.
    pub fn new() -> Self {
        Self
    }

    /// Render `items` (all from `region`, already in print order) as one
    /// label per page. An empty slice produces no labels.
    pub fn paginate(&self, items: &[PickLineItem], region: Region) -> Vec<Vec<u8>> {
        let total = page_count(items.len());
        items
            .chunks(ROWS_PER_PAGE)
            .enumerate()
            .map(|(i, page)| render_page(page, region, i + 1, total))
            .collect()
    }
}

fn render_page(rows: &[PickLineItem], region: Region, page: usize, total: usize) -> Vec<u8> {
    let mut zpl = ZplWriter::new();
    zpl.font(45)
        .text(LEFT, 30, &region.display_name())
        .font(30)
        .text(600, 40, &format!("Page {page}/{total}"))
        .rule(LEFT, 90, CONTENT_WIDTH, 3)
        .font(22);

    for col in &COLUMNS {
        zpl.text(col.x, 105, col.title);
    }
    zpl.rule(LEFT, 135, CONTENT_WIDTH, 2);

    let mut y = FIRST_ROW_Y;
    for item in rows {
        for col in &COLUMNS {
            zpl.text(col.x, y, &col.value(item));
        }
        y += ROW_HEIGHT;
    }
    zpl.finish()
}
