//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their attribute
//! values. In this workspace every value object is validated on construction, so
//! holding one is proof that its input passed the corresponding check.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (an `Iban` is equal to any other `Iban` with the
///   same digits)
/// - **Entity**: has identity (a transfer request is referenced by its transfer code)
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Concept(String);
///
/// impl ValueObject for Concept {}
///
/// let a = Concept("Rent for March".to_string());
/// let b = Concept("Rent for March".to_string());
/// assert_eq!(a, b);  // Equal by value, not identity
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
