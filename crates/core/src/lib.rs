//! `invoicedesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod numeric;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::SessionId;
pub use value_object::ValueObject;
