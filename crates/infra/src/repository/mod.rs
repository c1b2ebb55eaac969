//! Record store abstractions.

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use std::sync::Arc;

use mpsystem_core::{DomainResult, Record};

/// Injected record store for one record kind.
///
/// Writes are serialized per store; reads see a consistent snapshot.
pub trait Repository<V: Record>: Send + Sync {
    /// Records passing `filter`, ordered by id.
    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Vec<V>;

    /// Every record, ordered by id.
    fn all(&self) -> Vec<V> {
        self.list(&|_| true)
    }

    fn get(&self, id: V::Id) -> DomainResult<V>;

    /// Assign the next id, check uniqueness and store the record.
    fn create(&self, record: V) -> DomainResult<V>;

    /// Run `change` on a copy of the record and store it if it succeeds and
    /// still satisfies uniqueness.
    fn update(&self, id: V::Id, change: &mut dyn FnMut(&mut V) -> DomainResult<()>) -> DomainResult<V>;

    /// Remove and return the record if `check` accepts it. The check and the
    /// removal happen under one write.
    fn delete_if(&self, id: V::Id, check: &dyn Fn(&V) -> DomainResult<()>) -> DomainResult<V>;

    /// Remove and return the record.
    fn delete(&self, id: V::Id) -> DomainResult<V> {
        self.delete_if(id, &|_| Ok(()))
    }

    fn count(&self) -> usize {
        self.all().len()
    }
}

impl<V, S> Repository<V> for Arc<S>
where
    V: Record,
    S: Repository<V> + ?Sized,
{
    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Vec<V> {
        (**self).list(filter)
    }

    fn all(&self) -> Vec<V> {
        (**self).all()
    }

    fn get(&self, id: V::Id) -> DomainResult<V> {
        (**self).get(id)
    }

    fn create(&self, record: V) -> DomainResult<V> {
        (**self).create(record)
    }

    fn update(&self, id: V::Id, change: &mut dyn FnMut(&mut V) -> DomainResult<()>) -> DomainResult<V> {
        (**self).update(id, change)
    }

    fn delete_if(&self, id: V::Id, check: &dyn Fn(&V) -> DomainResult<()>) -> DomainResult<V> {
        (**self).delete_if(id, check)
    }

    fn delete(&self, id: V::Id) -> DomainResult<V> {
        (**self).delete(id)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}
