//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Malformed numeric input is deliberately *not* an error in this domain: it is
/// substituted with zero at parse time (see [`crate::numeric::parse_lenient`]).
/// What remains here are the few structural failures a caller can cause.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an empty seller catalog).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A snapshot could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A field name did not match any known field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// An item edit referenced a position outside the item list.
    #[error("item index {index} out of range (len={len})")]
    ItemOutOfRange { index: usize, len: usize },

    /// A command was addressed to another editing session.
    #[error("session mismatch")]
    SessionMismatch,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn item_out_of_range(index: usize, len: usize) -> Self {
        Self::ItemOutOfRange { index, len }
    }
}
