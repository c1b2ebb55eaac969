//! Entity traits: identity + continuity across state changes.

use crate::error::DomainError;
use crate::id::SequentialId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity kept in a record store.
///
/// The store assigns identifiers on insert and asks the record whether it
/// clashes with any record already stored (unique SKU, username, ...).
pub trait Record: Entity<Id: SequentialId> + Clone + Send + Sync + 'static {
    /// Overwrite the identifier (store-side numbering).
    fn assign_id(&mut self, id: Self::Id);

    /// Uniqueness check against another stored record.
    ///
    /// Called for every other record on create and update; returning an error
    /// rejects the write.
    fn conflicts_with(&self, _other: &Self) -> Option<DomainError> {
        None
    }
}
