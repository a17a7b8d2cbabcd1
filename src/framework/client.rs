//! # Generic Client
//!
//! This module defines the generic client for working with one kind of stocked resource.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::framework::{
    CasOutcome, ConflictResolver, InMemoryStore, LedgerEntity, LedgerError, ResourceRecord,
    ResourceStore, StoreError,
};

/// ## ResourceClient
///
/// The `ResourceClient<T, S>` provides a type‑safe, async CRUD + stock API over a
/// [`ResourceStore`]. Quantity changes always go through the [`ConflictResolver`], so
/// concurrent callers compose instead of overwriting each other.
///
/// * **Cloneable** – holds only `Arc`s, so cloning is inexpensive and clones share IDs and state.
/// * **Context injection** – `T::Context` is handed to every async entity hook.
/// * **Generic** – works with any entity that implements `LedgerEntity` and any store backend.
pub struct ResourceClient<T: LedgerEntity, S: ResourceStore<T> = InMemoryStore<T>> {
    store: Arc<S>,
    resolver: ConflictResolver<T, S>,
    context: Arc<T::Context>,
    next_id: Arc<AtomicU32>,
}

impl<T: LedgerEntity, S: ResourceStore<T>> Clone for ResourceClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resolver: self.resolver.clone(),
            context: Arc::clone(&self.context),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: LedgerEntity, S: ResourceStore<T>> ResourceClient<T, S> {
    pub fn new(store: Arc<S>, context: T::Context, max_retries: u32) -> Self {
        Self {
            resolver: ConflictResolver::new(Arc::clone(&store), max_retries),
            store,
            context: Arc::new(context),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    /// Starts ID generation at `first` instead of 1, e.g. over a store that already
    /// holds records.
    pub fn with_first_id(self, first: u32) -> Self {
        self.next_id.store(first, Ordering::SeqCst);
        self
    }

    pub fn resolver(&self) -> &ConflictResolver<T, S> {
        &self.resolver
    }

    pub fn context(&self) -> &T::Context {
        &self.context
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, LedgerError> {
        debug!(entity_type = T::KIND, ?params, "Create");
        let id: T::Id = allocate_id(&self.next_id)
            .ok_or(LedgerError::IdsExhausted { kind: T::KIND })?
            .into();

        let (mut entity, quantity) = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type = T::KIND, error = %e, "Create failed");
            LedgerError::entity(e)
        })?;
        if let Err(e) = entity.on_create(quantity, &self.context).await {
            warn!(entity_type = T::KIND, %id, error = %e, "on_create failed");
            return Err(LedgerError::entity(e));
        }

        self.store
            .insert(ResourceRecord::new(id.clone(), quantity, entity))
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => LedgerError::AlreadyExists {
                    kind: T::KIND,
                    id: id.to_string(),
                },
                other => LedgerError::Storage(other),
            })?;
        info!(entity_type = T::KIND, %id, quantity, "Created");
        Ok(id)
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<ResourceRecord<T>>, LedgerError> {
        let record = self.store.get(&id).await?;
        debug!(entity_type = T::KIND, %id, found = record.is_some(), "Get");
        Ok(record)
    }

    /// Like [`get`](Self::get), but a missing record is an error.
    pub async fn fetch(&self, id: T::Id) -> Result<ResourceRecord<T>, LedgerError> {
        self.get(id.clone())
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    pub async fn list(&self) -> Result<Vec<ResourceRecord<T>>, LedgerError> {
        Ok(self.store.list().await?)
    }

    /// Updates descriptive attributes. Commits a new version; the quantity is untouched.
    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<ResourceRecord<T>, LedgerError> {
        debug!(entity_type = T::KIND, %id, ?update, "Update");
        self.resolver
            .commit_with(&id, |record| {
                let mut next = record.successor(record.quantity);
                next.entity.apply_update(&update).map_err(LedgerError::entity)?;
                Ok(next)
            })
            .await
    }

    /// Applies a signed delta to the quantity.
    pub async fn adjust(&self, id: T::Id, delta: i64) -> Result<ResourceRecord<T>, LedgerError> {
        self.resolver.commit(&id, delta).await
    }

    /// Sets the quantity to an absolute, non-negative target.
    pub async fn set_quantity(&self, id: T::Id, target: i64) -> Result<ResourceRecord<T>, LedgerError> {
        self.resolver.set_absolute(&id, target).await
    }

    /// Applies a delta against a snapshot the caller already holds. No retries.
    pub async fn adjust_from(
        &self,
        snapshot: &ResourceRecord<T>,
        delta: i64,
    ) -> Result<ResourceRecord<T>, LedgerError> {
        self.resolver.commit_from(snapshot, delta).await
    }

    /// Removes a record after its `on_delete` hook agrees.
    ///
    /// The removal is conditional on the version the hook saw. If anything committed in
    /// between, the record is re-read and the hook runs again, with the same retry bound
    /// as quantity commits.
    pub async fn delete(&self, id: T::Id) -> Result<(), LedgerError> {
        debug!(entity_type = T::KIND, %id, "Delete");
        let max_attempts = self.resolver.max_retries().saturating_add(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let record = self.fetch(id.clone()).await?;
            if let Err(e) = record.entity.on_delete(record.quantity, &self.context).await {
                warn!(entity_type = T::KIND, %id, error = %e, "on_delete failed");
                return Err(LedgerError::entity(e));
            }
            match self.store.remove_if_version(&id, record.version).await? {
                CasOutcome::Swapped => {
                    info!(entity_type = T::KIND, %id, version = record.version, "Deleted");
                    return Ok(());
                }
                CasOutcome::Missing => {
                    return Err(LedgerError::NotFound {
                        kind: T::KIND,
                        id: id.to_string(),
                    })
                }
                CasOutcome::Conflict { actual_version } => {
                    if attempt >= max_attempts {
                        warn!(entity_type = T::KIND, %id, attempts = attempt, "Delete retries exhausted");
                        return Err(LedgerError::StaleWrite {
                            id: id.to_string(),
                            expected: record.version,
                            actual: actual_version,
                            attempts: attempt,
                        });
                    }
                    debug!(
                        entity_type = T::KIND,
                        %id,
                        expected = record.version,
                        actual = actual_version,
                        attempt,
                        "Changed during delete, re-checking"
                    );
                    tokio::task::yield_now().await;
                }
            }
        }
    }
}

/// Hands out the next id, or `None` once the counter would wrap.
pub(crate) fn allocate_id(counter: &AtomicU32) -> Option<u32> {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
        .ok()
}
