//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two line items with the same description,
/// price and weight are interchangeable. They are compared by their attribute
/// values and edited by producing a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct SellerProfile {
///     display_name: String,
///     address_lines: Vec<String>,
/// }
///
/// impl ValueObject for SellerProfile {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
