//! Generic quantity-ledger framework.
//!
//! This module provides the building blocks for keeping counts of any resource
//! non-negative under concurrent adjustments.
//!
//! # Main Components
//!
//! - [`LedgerEntity`] - Trait that stocked resource types implement
//! - [`ResourceRecord`] - Id, quantity, version, and entity data
//! - [`delta`] - The Delta Applier (`apply`, `set_absolute`)
//! - [`ResourceStore`] / [`InMemoryStore`] - Storage boundary with compare-and-swap
//! - [`ConflictResolver`] - Read, compute, compare-and-swap, bounded retries
//! - [`ResourceClient`] - Generic CRUD + stock facade
//! - [`LedgerError`] / [`StoreError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for a store that injects concurrent writers on demand.

pub mod client;
pub mod delta;
pub mod entity;
pub mod error;
pub mod in_memory;
pub mod mock;
pub mod record;
pub mod resolver;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export core types for convenience
pub use client::ResourceClient;
pub use entity::LedgerEntity;
pub use error::{LedgerError, StoreError};
pub use in_memory::InMemoryStore;
pub use record::{ResourceRecord, INITIAL_VERSION};
pub use resolver::{ConflictResolver, DEFAULT_MAX_RETRIES};
pub use store::{CasOutcome, ResourceStore};
