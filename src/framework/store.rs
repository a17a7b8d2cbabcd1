//! # Resource Store
//!
//! The persistence boundary. Backends only need to offer point reads and an atomic
//! compare-and-swap keyed on the record version; conflict handling lives above them in
//! the [`ConflictResolver`](crate::framework::ConflictResolver).

use async_trait::async_trait;

use crate::framework::{LedgerEntity, ResourceRecord, StoreError};

/// Result of a conditional write: [`ResourceStore::compare_and_swap`] or
/// [`ResourceStore::remove_if_version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored version matched and the write (or removal) happened.
    Swapped,
    /// Someone else committed first; nothing was written.
    Conflict { actual_version: u64 },
    /// The record no longer exists.
    Missing,
}

/// Abstract storage for versioned resource records.
#[async_trait]
pub trait ResourceStore<T: LedgerEntity>: Send + Sync + 'static {
    /// Get a record by ID. Returns `None` if not found.
    async fn get(&self, id: &T::Id) -> Result<Option<ResourceRecord<T>>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the ID is taken.
    async fn insert(&self, record: ResourceRecord<T>) -> Result<(), StoreError>;

    /// Replace the record only if its stored version is still `expected_version`.
    async fn compare_and_swap(
        &self,
        id: &T::Id,
        expected_version: u64,
        record: ResourceRecord<T>,
    ) -> Result<CasOutcome, StoreError>;

    /// Remove a record only if its stored version is still `expected_version`.
    async fn remove_if_version(&self, id: &T::Id, expected_version: u64) -> Result<CasOutcome, StoreError>;

    /// Remove a record unconditionally, returning it if it existed.
    async fn remove(&self, id: &T::Id) -> Result<Option<ResourceRecord<T>>, StoreError>;

    /// All stored records, in no particular order.
    async fn list(&self) -> Result<Vec<ResourceRecord<T>>, StoreError>;
}
