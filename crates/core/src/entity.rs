//! Entity trait: records persisted once and referenced by a content-derived id.

/// A record appended to a store exactly once and referenced by its identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Short lowercase name used in log fields and error reasons.
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
