//! # Ledger Errors
//!
//! This module defines the common error types used throughout the ledger framework.
//! Storage backends report [`StoreError`]; everything above the store reports [`LedgerError`].

/// Failures reported by a [`ResourceStore`](crate::framework::ResourceStore) backend.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("duplicate key: {0}")]
    Duplicate(String),
}

/// Errors that can occur within the ledger framework itself.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Applying the delta would drive the quantity below zero.
    #[error("insufficient quantity for {id}: current {current}, attempted delta {delta}")]
    InsufficientQuantity { id: String, current: u64, delta: i64 },

    /// An absolute target quantity was negative.
    #[error("target quantity {target} for {id} is negative")]
    NegativeTarget { id: String, target: i64 },

    /// The resulting quantity does not fit the stored representation.
    #[error("quantity for {id} would overflow: current {current}, delta {delta}")]
    QuantityOverflow { id: String, current: u64, delta: i64 },

    /// The record changed between read and write, and retries were exhausted.
    #[error("stale write on {id}: expected version {expected}, found {actual} after {attempts} attempt(s)")]
    StaleWrite {
        id: String,
        expected: u64,
        actual: u64,
        attempts: u32,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    /// The id counter has no values left.
    #[error("no {kind} ids left")]
    IdsExhausted { kind: &'static str },

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    /// Validation failure or veto raised by an entity hook.
    #[error("entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl LedgerError {
    /// Wraps an entity-specific error.
    pub fn entity<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        LedgerError::Entity(Box::new(err))
    }

    /// `true` for conflicts the caller may resolve by re-reading and trying again.
    pub fn is_stale(&self) -> bool {
        matches!(self, LedgerError::StaleWrite { .. })
    }
}
