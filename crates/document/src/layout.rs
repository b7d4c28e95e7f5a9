//! Structural shape of the rendered invoice, independent of visual styling.
//!
//! This is the contract consumed by preview renderers and the export backend.
//! Numbers are already formatted to their display precision.

use serde::{Deserialize, Serialize};

use invoicedesk_invoicing::InvoiceTotals;

/// Document title line.
pub const TITLE: &str = "TAX INVOICE";

/// Item table column headings, left to right.
pub const ITEM_COLUMNS: [&str; 5] = ["SN", "ITEM", "UNIT PRICE", "NET WT", "TOTAL"];

/// Width of the label column in the customer block, in points.
pub const CUSTOMER_LABEL_WIDTH: f32 = 60.0;

/// Shown in the invoice-meta block when a value is unset.
pub const NOT_AVAILABLE: &str = "N/A";

/// Right-hand footer caption.
pub const RECEIVER: &str = "Receiver";

/// Suffix appended to the total weight.
pub const WEIGHT_UNIT: &str = "(kg)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCell {
    pub text: String,
    pub align: Align,
    pub emphasized: bool,
}

impl TextCell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
            emphasized: false,
        }
    }

    pub fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// Seller name (emphasized) followed by the seller's address lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub seller_name: String,
    pub address_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledRow {
    pub label: String,
    pub value: String,
}

impl LabeledRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Customer, TRN and Address rows; labels sit in a fixed-width column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBlock {
    pub label_width: f32,
    pub rows: Vec<LabeledRow>,
}

/// Invoice number and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaBlock {
    pub rows: Vec<LabeledRow>,
}

/// Customer block (left) and invoice-meta block (right), side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartiesBlock {
    pub customer: CustomerBlock,
    pub meta: MetaBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TextCell>,
}

/// One page's slice of the line-item table, with its own header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemTable {
    pub header: TableRow,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsRow {
    pub label: String,
    /// Only the `TOTAL` row carries a weight.
    pub weight: Option<String>,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsBlock {
    pub rows: Vec<TotalsRow>,
}

/// Pinned to the bottom of every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum Block {
    Header(HeaderBlock),
    Title(String),
    Parties(PartiesBlock),
    ItemTable(ItemTable),
    Totals(TotalsBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<Block>,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub page_size: PageSize,
    pub pages: Vec<Page>,
    pub totals: InvoiceTotals,
    pub file_name: String,
}

impl RenderedDocument {
    fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    pub fn header(&self) -> Option<&HeaderBlock> {
        self.blocks().find_map(|b| match b {
            Block::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.blocks().find_map(|b| match b {
            Block::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn parties(&self) -> Option<&PartiesBlock> {
        self.blocks().find_map(|b| match b {
            Block::Parties(p) => Some(p),
            _ => None,
        })
    }

    /// Item rows across all pages, in order.
    pub fn item_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.blocks()
            .filter_map(|b| match b {
                Block::ItemTable(t) => Some(t.rows.iter()),
                _ => None,
            })
            .flatten()
    }

    pub fn totals_block(&self) -> Option<&TotalsBlock> {
        self.blocks().find_map(|b| match b {
            Block::Totals(t) => Some(t),
            _ => None,
        })
    }
}
