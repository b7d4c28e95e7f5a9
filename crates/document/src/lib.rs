//! Document projection for the invoice editor.
//!
//! Turns a read-only [`InvoiceRecord`](invoicedesk_invoicing::InvoiceRecord)
//! snapshot into a paginated [`RenderedDocument`]: header, title, customer and
//! invoice-meta blocks, the line-item table, totals and footer. The projection
//! is a pure function of the snapshot; callers re-project after every edit.

pub mod export;
pub mod layout;
pub mod pagination;
pub mod projector;
pub mod settings;
pub mod text;

pub use export::{ExportArtifact, ExportError, ExportRequest, Exporter, export_file_name, export_with};
pub use layout::{
    Align, Block, CustomerBlock, Footer, HeaderBlock, ItemTable, LabeledRow, MetaBlock, Page,
    PageSize, PartiesBlock, RenderedDocument, TableRow, TextCell, TotalsBlock, TotalsRow,
};
pub use pagination::PageSettings;
pub use projector::DocumentProjector;
pub use settings::{DocumentSettings, SettingsError};
pub use text::render_text;
