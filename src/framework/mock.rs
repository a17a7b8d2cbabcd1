//! # Mock Framework
//!
//! Utilities for testing optimistic-concurrency paths deterministically.
//!
//! Real races are hard to reproduce on demand. [`ScriptedStore`] wraps an
//! [`InMemoryStore`] and consults a queue of expectations on every conditional write
//! (`compare_and_swap` and `remove_if_version`): each expectation can simulate another
//! writer landing between the caller's read and its write, or make the backend fail
//! outright. A second queue, filled through [`ScriptedStore::expect_get`], fails point
//! reads. Calls with no queued expectation pass straight through.
//!
//! # Example
//! ```ignore
//! let store = ScriptedStore::<Medication>::new();
//! store.seed(ResourceRecord::new(id, 10, medication));
//! store.expect_swap().concurrent_delta(-3);
//!
//! let resolver = ConflictResolver::new(Arc::new(store.clone()), 3);
//! resolver.commit(&id, -4).await?; // conflicts once, then lands on 3
//! store.verify(); // Ensures all expectations were consumed
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::framework::{
    delta, CasOutcome, InMemoryStore, LedgerEntity, ResourceRecord, ResourceStore, StoreError,
};

/// What happens on a scripted compare-and-swap.
#[derive(Debug, Clone)]
enum SwapExpectation {
    /// Another writer commits this delta just before our swap.
    ConcurrentDelta(i64),
    /// Another writer removes the record just before our swap.
    ConcurrentRemove,
    /// The backend fails the swap.
    Fail(StoreError),
}

/// A store with expectation queues for read failures and conditional-write interference.
pub struct ScriptedStore<T: LedgerEntity> {
    inner: InMemoryStore<T>,
    expectations: Arc<Mutex<VecDeque<SwapExpectation>>>,
    read_failures: Arc<Mutex<VecDeque<StoreError>>>,
    swap_attempts: Arc<AtomicUsize>,
}

impl<T: LedgerEntity> Clone for ScriptedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            expectations: Arc::clone(&self.expectations),
            read_failures: Arc::clone(&self.read_failures),
            swap_attempts: Arc::clone(&self.swap_attempts),
        }
    }
}

impl<T: LedgerEntity> Default for ScriptedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerEntity> ScriptedStore<T> {
    /// Creates an empty store with no expectations.
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            read_failures: Arc::new(Mutex::new(VecDeque::new())),
            swap_attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Writes a record directly, bypassing expectations and version checks.
    pub fn seed(&self, record: ResourceRecord<T>) {
        self.inner.put(record);
    }

    /// Queues an expectation for the next conditional write.
    pub fn expect_swap(&self) -> SwapExpectationBuilder {
        SwapExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Queues an expectation for the next point read.
    pub fn expect_get(&self) -> GetExpectationBuilder {
        GetExpectationBuilder {
            read_failures: Arc::clone(&self.read_failures),
        }
    }

    /// Number of conditional writes seen so far, scripted or not.
    pub fn swap_attempts(&self) -> usize {
        self.swap_attempts.load(Ordering::SeqCst)
    }

    /// Current stored quantity, read without going through the trait.
    pub fn inner_quantity(&self, id: &T::Id) -> Option<u64> {
        self.inner.peek(id).map(|r| r.quantity)
    }

    /// Panics if any queued expectation was never consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        assert_eq!(remaining, 0, "{remaining} swap expectation(s) not consumed");
        let remaining = lock(&self.read_failures).len();
        assert_eq!(remaining, 0, "{remaining} read expectation(s) not consumed");
    }

    /// Counts the attempt and applies the next scripted interference, if any.
    fn before_write(&self, id: &T::Id) -> Result<(), StoreError> {
        self.swap_attempts.fetch_add(1, Ordering::SeqCst);
        let scripted = lock(&self.expectations).pop_front();
        match scripted {
            Some(expectation) => self.interfere(id, expectation),
            None => Ok(()),
        }
    }

    fn interfere(&self, id: &T::Id, expectation: SwapExpectation) -> Result<(), StoreError> {
        match expectation {
            SwapExpectation::ConcurrentDelta(d) => {
                if let Some(current) = self.inner.peek(id) {
                    let next = delta::apply(&current, d)
                        .map_err(|e| StoreError::Unavailable(format!("scripted writer: {e}")))?;
                    self.inner.put(next);
                }
                Ok(())
            }
            SwapExpectation::ConcurrentRemove => {
                self.inner.take(id);
                Ok(())
            }
            SwapExpectation::Fail(err) => Err(err),
        }
    }
}

#[async_trait]
impl<T: LedgerEntity> ResourceStore<T> for ScriptedStore<T> {
    async fn get(&self, id: &T::Id) -> Result<Option<ResourceRecord<T>>, StoreError> {
        let scripted = lock(&self.read_failures).pop_front();
        if let Some(err) = scripted {
            return Err(err);
        }
        self.inner.get(id).await
    }

    async fn insert(&self, record: ResourceRecord<T>) -> Result<(), StoreError> {
        self.inner.insert(record).await
    }

    async fn compare_and_swap(
        &self,
        id: &T::Id,
        expected_version: u64,
        record: ResourceRecord<T>,
    ) -> Result<CasOutcome, StoreError> {
        self.before_write(id)?;
        self.inner.compare_and_swap(id, expected_version, record).await
    }

    async fn remove_if_version(&self, id: &T::Id, expected_version: u64) -> Result<CasOutcome, StoreError> {
        self.before_write(id)?;
        self.inner.remove_if_version(id, expected_version).await
    }

    async fn remove(&self, id: &T::Id) -> Result<Option<ResourceRecord<T>>, StoreError> {
        self.inner.remove(id).await
    }

    async fn list(&self) -> Result<Vec<ResourceRecord<T>>, StoreError> {
        self.inner.list().await
    }
}

/// Builder for a queued compare-and-swap expectation.
pub struct SwapExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<SwapExpectation>>>,
}

impl SwapExpectationBuilder {
    /// Another writer commits `delta` right before the swap.
    pub fn concurrent_delta(self, delta: i64) {
        self.push(SwapExpectation::ConcurrentDelta(delta));
    }

    /// Another writer deletes the record right before the swap.
    pub fn concurrent_remove(self) {
        self.push(SwapExpectation::ConcurrentRemove);
    }

    /// The backend fails the swap with `err`.
    pub fn fail(self, err: StoreError) {
        self.push(SwapExpectation::Fail(err));
    }

    fn push(self, expectation: SwapExpectation) {
        lock(&self.expectations).push_back(expectation);
    }
}

/// Builder for a queued point-read expectation.
pub struct GetExpectationBuilder {
    read_failures: Arc<Mutex<VecDeque<StoreError>>>,
}

impl GetExpectationBuilder {
    /// The backend fails the read with `err`.
    pub fn fail(self, err: StoreError) {
        lock(&self.read_failures).push_back(err);
    }
}

fn lock<E>(queue: &Mutex<VecDeque<E>>) -> MutexGuard<'_, VecDeque<E>> {
    // A panicking test thread must not hide the queue from verify()
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::test_support::{widget, Widget};
    use crate::framework::{ConflictResolver, LedgerError};

    #[tokio::test]
    async fn test_unscripted_swaps_pass_through() {
        let store = ScriptedStore::<Widget>::new();
        store.seed(widget(1, 5, "tape"));
        let current = store.get(&1).await.unwrap().unwrap();

        let outcome = store
            .compare_and_swap(&1, 1, current.successor(4))
            .await
            .unwrap();
        assert_eq!(outcome, CasOutcome::Swapped);
        assert_eq!(store.swap_attempts(), 1);
        store.verify();
    }

    #[tokio::test]
    async fn test_concurrent_remove_surfaces_not_found() {
        let store = ScriptedStore::<Widget>::new();
        store.seed(widget(1, 5, "tape"));
        store.expect_swap().concurrent_remove();

        let resolver = ConflictResolver::new(Arc::new(store.clone()), 3);
        let err = resolver.commit(&1, -1).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
        assert_eq!(store.inner_quantity(&1), None);
    }

    #[tokio::test]
    async fn test_scripted_read_failure() {
        let store = ScriptedStore::<Widget>::new();
        store.seed(widget(1, 5, "tape"));
        store.expect_get().fail(StoreError::Unavailable("replica down".into()));

        assert_eq!(
            store.get(&1).await.unwrap_err(),
            StoreError::Unavailable("replica down".into())
        );
        // Only the queued read fails
        assert_eq!(store.get(&1).await.unwrap().map(|r| r.quantity), Some(5));
        store.verify();
    }

    #[test]
    #[should_panic(expected = "read expectation(s) not consumed")]
    fn test_verify_panics_on_leftover_read_expectations() {
        let store = ScriptedStore::<Widget>::new();
        store.expect_get().fail(StoreError::Unavailable("x".into()));
        store.verify();
    }

    #[test]
    #[should_panic(expected = "not consumed")]
    fn test_verify_panics_on_leftover_expectations() {
        let store = ScriptedStore::<Widget>::new();
        store.expect_swap().concurrent_delta(1);
        store.verify();
    }
}
