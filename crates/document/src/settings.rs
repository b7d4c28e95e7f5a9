//! Projector configuration, loadable from JSON.
//!
//! Every key is optional; omitted keys take the built-in defaults.
//!
//! ```json
//! {
//!   "pagination": { "firstPageRows": 20, "continuationRows": 34 },
//!   "sellers": [
//!     { "id": "seller1", "displayName": "ACME", "addressLines": ["1 Road"] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use invoicedesk_core::DomainError;
use invoicedesk_invoicing::{SellerCatalog, SellerEntry};

use crate::pagination::PageSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentSettings {
    pub pagination: PageSettings,
    /// Replaces the built-in seller catalog when present.
    pub sellers: Option<Vec<SellerEntry>>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl DocumentSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn seller_catalog(&self) -> Result<SellerCatalog, SettingsError> {
        match &self.sellers {
            Some(entries) => Ok(SellerCatalog::new(entries.clone())?),
            None => Ok(SellerCatalog::builtin()),
        }
    }
}
