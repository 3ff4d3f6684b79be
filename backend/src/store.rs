//! In-memory entity stores
//!
//! Each domain owns one `Store<T>` injected through `AppState`; nothing is
//! persisted and records live for the process lifetime.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use dashmap::DashMap;
use uuid::Uuid;

/// A concurrent map of records keyed by generated id.
///
/// Cloning yields another handle to the same map. Every read-modify-write
/// of a single record goes through `update_with`, which runs the closure
/// under the entry guard so concurrent counter moves cannot interleave.
#[derive(Debug)]
pub struct Store<T> {
    records: Arc<DashMap<Uuid, T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, id: Uuid, record: T) {
        self.records.insert(id, record);
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.records.contains_key(id)
    }

    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.records.remove(id).map(|(_, record)| record)
    }

    /// Clone out the current record set. Iteration order is the map's
    /// internal order; endpoints that promise an ordering sort afterwards.
    pub fn snapshot(&self) -> Vec<T> {
        self.records
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run `f` on the record under its entry guard, returning its result,
    /// or `None` when the id is unknown.
    pub fn update_with<R>(&self, id: &Uuid, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.records.get_mut(id).map(|mut entry| f(entry.value_mut()))
    }
}

impl<T: Clone> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequential order-number generator: `OC000001`, `OC000002`, ...
#[derive(Debug, Clone)]
pub struct OrderSequence {
    next: Arc<AtomicU64>,
}

impl OrderSequence {
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn next_number(&self) -> String {
        format!("OC{:06}", self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OrderSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let store: Store<String> = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, "uno".to_string());
        assert_eq!(store.get(&id).as_deref(), Some("uno"));
        assert_eq!(store.len(), 1);
        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn update_with_unknown_id_is_none() {
        let store: Store<i64> = Store::new();
        assert!(store.update_with(&Uuid::new_v4(), |v| *v += 1).is_none());
    }

    #[test]
    fn order_numbers_are_sequential() {
        let sequence = OrderSequence::new();
        assert_eq!(sequence.next_number(), "OC000001");
        assert_eq!(sequence.next_number(), "OC000002");
    }
}
