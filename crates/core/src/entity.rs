//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An entity keeps its identity while its attributes change; two records with
/// the same id are the same entity even if every other field differs.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Returns true when both values denote the same entity.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
