//! # Conflict Resolver
//!
//! Optimistic concurrency control over a [`ResourceStore`]: read the record, compute the
//! successor with a pure transform, and write it back only if the version is unchanged.
//! On a version conflict the whole read-compute-write is replayed against a fresh read,
//! up to `max_retries` extra attempts, before [`LedgerError::StaleWrite`] is surfaced.
//!
//! No lock is held across the read-compute-write span. The only exclusion is whatever the
//! store needs to make a single compare-and-swap atomic.

use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::framework::{delta, CasOutcome, LedgerEntity, LedgerError, ResourceRecord, ResourceStore};

/// Retry bound used when nothing is configured.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Serializes concurrent commits against the same record by version comparison.
pub struct ConflictResolver<T: LedgerEntity, S: ResourceStore<T>> {
    store: Arc<S>,
    max_retries: u32,
    _entity: PhantomData<fn() -> T>,
}

impl<T: LedgerEntity, S: ResourceStore<T>> Clone for ConflictResolver<T, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            max_retries: self.max_retries,
            _entity: PhantomData,
        }
    }
}

impl<T: LedgerEntity, S: ResourceStore<T>> ConflictResolver<T, S> {
    pub fn new(store: Arc<S>, max_retries: u32) -> Self {
        Self {
            store,
            max_retries,
            _entity: PhantomData,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Applies `delta` to the record, retrying on version conflicts.
    pub async fn commit(&self, id: &T::Id, delta: i64) -> Result<ResourceRecord<T>, LedgerError> {
        debug!(entity_type = T::KIND, %id, delta, "Commit delta");
        self.commit_with(id, |record| delta::apply(record, delta)).await
    }

    /// Sets the quantity to `target`, retrying on version conflicts.
    pub async fn set_absolute(
        &self,
        id: &T::Id,
        target: i64,
    ) -> Result<ResourceRecord<T>, LedgerError> {
        debug!(entity_type = T::KIND, %id, target, "Commit absolute");
        self.commit_with(id, |record| delta::set_absolute(record, target))
            .await
    }

    /// Runs an arbitrary transform under the read-compute-CAS loop.
    ///
    /// `transform` must return a record whose version is exactly one more than its input;
    /// it may be called once per attempt.
    pub async fn commit_with<F>(&self, id: &T::Id, transform: F) -> Result<ResourceRecord<T>, LedgerError>
    where
        F: Fn(&ResourceRecord<T>) -> Result<ResourceRecord<T>, LedgerError> + Send + Sync,
    {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let current = self.read(id).await?;
            let next = transform(&current).inspect_err(|e| {
                warn!(entity_type = T::KIND, %id, version = current.version, error = %e, "Rejected");
            })?;

            match self.store.compare_and_swap(id, current.version, next.clone()).await? {
                CasOutcome::Swapped => {
                    info!(
                        entity_type = T::KIND,
                        %id,
                        quantity = next.quantity,
                        version = next.version,
                        attempt,
                        "Committed"
                    );
                    return Ok(next);
                }
                CasOutcome::Missing => {
                    warn!(entity_type = T::KIND, %id, "Removed during commit");
                    return Err(self.not_found(id));
                }
                CasOutcome::Conflict { actual_version } => {
                    if attempt >= max_attempts {
                        warn!(
                            entity_type = T::KIND,
                            %id,
                            expected = current.version,
                            actual = actual_version,
                            attempts = attempt,
                            "Retries exhausted"
                        );
                        return Err(LedgerError::StaleWrite {
                            id: id.to_string(),
                            expected: current.version,
                            actual: actual_version,
                            attempts: attempt,
                        });
                    }
                    debug!(
                        entity_type = T::KIND,
                        %id,
                        expected = current.version,
                        actual = actual_version,
                        attempt,
                        "Version conflict, retrying"
                    );
                    tokio::task::yield_now().await;
                }
            }
        }
    }

    /// Single-shot commit against a record the caller already read. Never retries.
    ///
    /// Fails with [`LedgerError::StaleWrite`] if anyone committed after `snapshot` was taken.
    pub async fn commit_from(
        &self,
        snapshot: &ResourceRecord<T>,
        delta: i64,
    ) -> Result<ResourceRecord<T>, LedgerError> {
        let id = &snapshot.id;
        debug!(entity_type = T::KIND, %id, delta, version = snapshot.version, "Commit from snapshot");
        let next = delta::apply(snapshot, delta)?;

        match self.store.compare_and_swap(id, snapshot.version, next.clone()).await? {
            CasOutcome::Swapped => {
                info!(entity_type = T::KIND, %id, quantity = next.quantity, version = next.version, "Committed");
                Ok(next)
            }
            CasOutcome::Missing => Err(self.not_found(id)),
            CasOutcome::Conflict { actual_version } => {
                warn!(
                    entity_type = T::KIND,
                    %id,
                    expected = snapshot.version,
                    actual = actual_version,
                    "Stale snapshot"
                );
                Err(LedgerError::StaleWrite {
                    id: id.to_string(),
                    expected: snapshot.version,
                    actual: actual_version,
                    attempts: 1,
                })
            }
        }
    }

    async fn read(&self, id: &T::Id) -> Result<ResourceRecord<T>, LedgerError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    fn not_found(&self, id: &T::Id) -> LedgerError {
        LedgerError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}
