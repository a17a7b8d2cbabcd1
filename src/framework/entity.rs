//! # LedgerEntity Trait
//!
//! The `LedgerEntity` trait defines the contract every stocked resource (Medication, Equipment, …)
//! must implement to be managed by the generic [`ResourceClient`](crate::framework::ResourceClient).
//! It specifies associated types for IDs, DTOs, context, and errors, and provides lifecycle hooks
//! (`on_create`, `apply_update`, `on_delete`).
//!
//! # Architecture Note
//! The quantity is *not* part of the entity. It lives on the surrounding
//! [`ResourceRecord`](crate::framework::ResourceRecord) together with the version, so the
//! Delta Applier can work on any resource without knowing what the resource describes.
//!
//! # Provided Methods (Hooks)
//! - [`LedgerEntity::on_create`]
//! - [`LedgerEntity::on_delete`]
//!
//! The default implementation does nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stocked resource must implement to be managed by a `ResourceClient`.
///
/// # Async & Context
/// Hooks that may need other resources (`on_create`, `on_delete`) are async and receive the
/// `Context` injected when the client was built. `apply_update` is synchronous because the
/// Conflict Resolver may replay it against a fresher record after a version conflict.
#[async_trait]
pub trait LedgerEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance, including its initial quantity.
    type Create: Send + Sync + Debug;

    /// The data required to update the descriptive attributes of an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into hooks.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity's own validation and vetoes.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short resource name used in logs and `NotFound` errors (e.g. `"medication"`).
    const KIND: &'static str;

    /// Construct the entity and its initial quantity from the ID and payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<(Self, u64), Self::Error>;

    /// Called after construction, before the record is stored.
    async fn on_create(&mut self, _quantity: u64, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a descriptive update. Must be pure: it can run more than once on retries.
    fn apply_update(&mut self, update: &Self::Update) -> Result<(), Self::Error>;

    /// Called before the record is removed. Returning an error vetoes the deletion.
    async fn on_delete(&self, _quantity: u64, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
