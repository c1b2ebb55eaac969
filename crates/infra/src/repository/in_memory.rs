use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use mpsystem_core::{DomainError, DomainResult, Entity, Record, SequentialId};

use super::Repository;

/// In-memory record store for dev/tests and the demo server.
///
/// Ids are handed out as `max + 1` (starting at 1), so ids freed by a delete
/// of the highest record are reused.
#[derive(Debug)]
pub struct InMemoryRepository<V: Record> {
    inner: RwLock<BTreeMap<V::Id, V>>,
}

impl<V: Record> InMemoryRepository<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store records as-is, keeping their ids.
    #[cfg(test)]
    fn with_records(records: impl IntoIterator<Item = V>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.id().clone(), r))
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl<V: Record> Default for InMemoryRepository<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique<'a, V: Record>(
    candidate: &V,
    others: impl Iterator<Item = &'a V>,
) -> DomainResult<()> {
    for other in others {
        if let Some(err) = candidate.conflicts_with(other) {
            return Err(err);
        }
    }
    Ok(())
}

impl<V: Record> Repository<V> for InMemoryRepository<V> {
    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Vec<V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.values().filter(|v| filter(v)).cloned().collect()
    }

    fn get(&self, id: V::Id) -> DomainResult<V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    fn create(&self, mut record: V) -> DomainResult<V> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        check_unique(&record, map.values())?;

        let id = map
            .keys()
            .next_back()
            .map(|last| last.next())
            .unwrap_or_else(|| V::Id::from_raw(1));
        record.assign_id(id);
        map.insert(id, record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: V::Id,
        change: &mut dyn FnMut(&mut V) -> DomainResult<()>,
    ) -> DomainResult<V> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let mut next = map.get(&id).cloned().ok_or(DomainError::NotFound)?;
        change(&mut next)?;
        next.assign_id(id);
        check_unique(&next, map.iter().filter(|(k, _)| **k != id).map(|(_, v)| v))?;

        map.insert(id, next.clone());
        Ok(next)
    }

    fn delete_if(&self, id: V::Id, check: &dyn Fn(&V) -> DomainResult<()>) -> DomainResult<V> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        check(map.get(&id).ok_or(DomainError::NotFound)?)?;
        map.remove(&id).ok_or(DomainError::NotFound)
    }

    fn count(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
