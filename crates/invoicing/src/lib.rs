//! Invoice editing domain module.
//!
//! This crate owns the editable invoice record and the rules that keep it
//! consistent (line totals, never-empty item list), implemented purely as
//! deterministic domain logic (no IO, no rendering).

pub mod controller;
pub mod form;
pub mod record;
pub mod seller;
pub mod totals;

pub use controller::{FormController, FormInput};
pub use form::{
    AddItem, FieldUpdated, InvoiceCommand, InvoiceEvent, InvoiceForm, ItemAdded, ItemUpdated,
    UpdateField, UpdateItem,
};
pub use record::{FieldChange, InvoiceField, InvoiceRecord, ItemChange, ItemField, LineItem};
pub use seller::{SellerCatalog, SellerEntry, SellerId, SellerProfile};
pub use totals::{InvoiceTotals, VAT_RATE};
