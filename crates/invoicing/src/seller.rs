use serde::{Deserialize, Serialize};

use invoicedesk_core::{DomainError, DomainResult, ValueObject};

/// Key of a seller profile (the "company" selected on the form).
///
/// Kept as an open string key rather than a closed enum: whatever the form
/// submits is stored, and unknown keys are resolved by catalog fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

impl SellerId {
    pub const PRIMARY: &'static str = "seller1";
    pub const SECONDARY: &'static str = "seller2";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SellerId {
    fn default() -> Self {
        Self::new(Self::PRIMARY)
    }
}

impl core::fmt::Display for SellerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static reference data printed in the document header and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    pub display_name: String,
    pub address_lines: Vec<String>,
}

impl ValueObject for SellerProfile {}

impl SellerProfile {
    pub fn new<I, S>(display_name: impl Into<String>, address_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            display_name: display_name.into(),
            address_lines: address_lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// One catalog entry, as it appears in settings files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerEntry {
    pub id: SellerId,
    /// Other keys that select this profile, e.g. older form values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<SellerId>,
    #[serde(flatten)]
    pub profile: SellerProfile,
}

impl SellerEntry {
    pub fn new(id: impl Into<String>, profile: SellerProfile) -> Self {
        Self {
            id: SellerId::new(id),
            aliases: Vec::new(),
            profile,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(SellerId::new(alias));
        self
    }

    pub fn matches(&self, id: &SellerId) -> bool {
        &self.id == id || self.aliases.contains(id)
    }

    fn keys(&self) -> impl Iterator<Item = &SellerId> {
        core::iter::once(&self.id).chain(self.aliases.iter())
    }
}

/// Ordered, non-empty lookup of seller profiles.
///
/// The first entry is the fallback for unknown ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerCatalog {
    entries: Vec<SellerEntry>,
}

impl SellerCatalog {
    /// Build a catalog from explicit entries.
    ///
    /// Rejects an empty list and any key (id or alias) used twice.
    pub fn new(entries: Vec<SellerEntry>) -> DomainResult<Self> {
        if entries.is_empty() {
            return Err(DomainError::validation(
                "seller catalog must contain at least one profile",
            ));
        }
        let mut seen: Vec<&SellerId> = Vec::new();
        for key in entries.iter().flat_map(SellerEntry::keys) {
            if seen.contains(&key) {
                return Err(DomainError::validation(format!("duplicate seller id: {key}")));
            }
            seen.push(key);
        }
        Ok(Self { entries })
    }

    /// The two built-in seller profiles.
    ///
    /// `company1`/`company2` are the keys older forms submit.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                SellerEntry::new(
                    SellerId::PRIMARY,
                    SellerProfile::new(
                        "SUMON HANIF SCRAP AND METAL WASTE TRADING L.L.C.",
                        [
                            "P.O. Box: 5328, Dubai - UAE",
                            "Tel.: +97142677707",
                            "Email: admin.gbs@sumonHanif.com",
                            "TRN No.: 100247745100003",
                        ],
                    ),
                )
                .with_alias("company1"),
                SellerEntry::new(
                    SellerId::SECONDARY,
                    SellerProfile::new(
                        "AL SETOU METAL SCRAP. TR",
                        [
                            "P.O. Box: 1234, Sharjah - UAE",
                            "Tel.: +97112345678",
                            "Email: contact@alsetoumetal.com",
                            "TRN No.: 103208918500003",
                        ],
                    ),
                )
                .with_alias("company2"),
            ],
        }
    }

    pub fn entries(&self) -> &[SellerEntry] {
        &self.entries
    }

    /// Lookup by id or alias, `None` when no entry matches.
    pub fn get(&self, id: &SellerId) -> Option<&SellerProfile> {
        self.entries
            .iter()
            .find(|e| e.matches(id))
            .map(|e| &e.profile)
    }

    /// Lookup with fallback to the first profile. Never fails.
    pub fn resolve(&self, id: &SellerId) -> &SellerProfile {
        // `entries` is non-empty by construction.
        self.get(id).unwrap_or(&self.entries[0].profile)
    }
}

impl Default for SellerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
