//! # In-Memory Store
//!
//! `DashMap`-backed [`ResourceStore`] for tests, demos, and single-process deployments.
//! The map is sharded, so a compare-and-swap only holds the shard of the key it touches
//! and only for the duration of the swap itself.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::framework::{CasOutcome, LedgerEntity, ResourceRecord, ResourceStore, StoreError};

/// Concurrent in-memory record store. Clone-friendly via `Arc`.
pub struct InMemoryStore<T: LedgerEntity> {
    records: Arc<DashMap<T::Id, ResourceRecord<T>>>,
}

impl<T: LedgerEntity> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: LedgerEntity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerEntity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Synchronous point read, bypassing the async trait.
    pub(crate) fn peek(&self, id: &T::Id) -> Option<ResourceRecord<T>> {
        self.records.get(id).map(|e| e.value().clone())
    }

    /// Unconditional removal, bypassing the async trait.
    pub(crate) fn take(&self, id: &T::Id) -> Option<ResourceRecord<T>> {
        self.records.remove(id).map(|(_, record)| record)
    }

    /// Unconditional write, bypassing version checks.
    pub(crate) fn put(&self, record: ResourceRecord<T>) {
        self.records.insert(record.id.clone(), record);
    }
}

#[async_trait]
impl<T: LedgerEntity> ResourceStore<T> for InMemoryStore<T> {
    async fn get(&self, id: &T::Id) -> Result<Option<ResourceRecord<T>>, StoreError> {
        Ok(self.peek(id))
    }

    async fn insert(&self, record: ResourceRecord<T>) -> Result<(), StoreError> {
        match self.records.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(record.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn compare_and_swap(
        &self,
        id: &T::Id,
        expected_version: u64,
        record: ResourceRecord<T>,
    ) -> Result<CasOutcome, StoreError> {
        let Some(mut current) = self.records.get_mut(id) else {
            return Ok(CasOutcome::Missing);
        };
        if current.version != expected_version {
            return Ok(CasOutcome::Conflict {
                actual_version: current.version,
            });
        }
        *current = record;
        Ok(CasOutcome::Swapped)
    }

    async fn remove_if_version(&self, id: &T::Id, expected_version: u64) -> Result<CasOutcome, StoreError> {
        match self.records.entry(id.clone()) {
            Entry::Vacant(_) => Ok(CasOutcome::Missing),
            Entry::Occupied(slot) if slot.get().version != expected_version => Ok(CasOutcome::Conflict {
                actual_version: slot.get().version,
            }),
            Entry::Occupied(slot) => {
                slot.remove();
                Ok(CasOutcome::Swapped)
            }
        }
    }

    async fn remove(&self, id: &T::Id) -> Result<Option<ResourceRecord<T>>, StoreError> {
        Ok(self.take(id))
    }

    async fn list(&self) -> Result<Vec<ResourceRecord<T>>, StoreError> {
        Ok(self.records.iter().map(|e| e.value().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::test_support::{widget, Widget};

    fn widget_record(id: u32, quantity: u64) -> ResourceRecord<Widget> {
        widget(id, quantity, "syringe")
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = InMemoryStore::<Widget>::new();
        store.insert(widget_record(1, 10)).await.unwrap();

        let found = store.get(&1).await.unwrap().expect("record present");
        assert_eq!(found.quantity, 10);
        assert_eq!(found.version, 1);
        assert!(store.get(&2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = InMemoryStore::<Widget>::new();
        store.insert(widget_record(1, 10)).await.unwrap();
        let err = store.insert(widget_record(1, 99)).await.unwrap_err();
        assert_eq!(err, StoreError::Duplicate("1".to_string()));
        assert_eq!(store.get(&1).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_compare_and_swap_matches_version() {
        let store = InMemoryStore::<Widget>::new();
        let original = widget_record(1, 10);
        store.insert(original.clone()).await.unwrap();

        let next = original.successor(7);
        let outcome = store.compare_and_swap(&1, 1, next).await.unwrap();
        assert_eq!(outcome, CasOutcome::Swapped);

        let stored = store.get(&1).await.unwrap().unwrap();
        assert_eq!((stored.quantity, stored.version), (7, 2));
    }

    #[tokio::test]
    async fn test_compare_and_swap_conflict_leaves_record() {
        let store = InMemoryStore::<Widget>::new();
        let original = widget_record(1, 10);
        store.insert(original.clone()).await.unwrap();
        store
            .compare_and_swap(&1, 1, original.successor(7))
            .await
            .unwrap();

        // Second writer still believes version 1
        let outcome = store
            .compare_and_swap(&1, 1, original.successor(6))
            .await
            .unwrap();
        assert_eq!(outcome, CasOutcome::Conflict { actual_version: 2 });
        assert_eq!(store.get(&1).await.unwrap().unwrap().quantity, 7);
    }

    #[tokio::test]
    async fn test_compare_and_swap_missing() {
        let store = InMemoryStore::<Widget>::new();
        let outcome = store
            .compare_and_swap(&9, 1, widget_record(9, 1))
            .await
            .unwrap();
        assert_eq!(outcome, CasOutcome::Missing);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_remove_if_version() {
        let store = InMemoryStore::<Widget>::new();
        let original = widget_record(1, 4);
        store.insert(original.clone()).await.unwrap();
        store
            .compare_and_swap(&1, 1, original.successor(3))
            .await
            .unwrap();

        // Removal against the version we read before the swap must not happen
        let outcome = store.remove_if_version(&1, 1).await.unwrap();
        assert_eq!(outcome, CasOutcome::Conflict { actual_version: 2 });
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove_if_version(&1, 2).await.unwrap(), CasOutcome::Swapped);
        assert!(store.is_empty());
        assert_eq!(store.remove_if_version(&1, 2).await.unwrap(), CasOutcome::Missing);
    }

    #[tokio::test]
    async fn test_remove_and_list() {
        let store = InMemoryStore::<Widget>::new();
        store.insert(widget_record(1, 1)).await.unwrap();
        store.insert(widget_record(2, 2)).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);

        let removed = store.remove(&1).await.unwrap();
        assert_eq!(removed.map(|r| r.quantity), Some(1));
        assert!(store.remove(&1).await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }
}
