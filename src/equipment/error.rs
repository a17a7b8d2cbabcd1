//! Error types for Equipment operations.

use thiserror::Error;

use crate::framework::LedgerError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EquipmentError {
    #[error("Equipment not found: {0}")]
    NotFound(String),

    /// More units were requested than are on hand.
    #[error("Insufficient units for {id}: requested {requested}, available {available}")]
    InsufficientUnits {
        id: String,
        requested: u64,
        available: u64,
    },

    #[error("Invalid unit target for {id}: {target}")]
    InvalidTarget { id: String, target: i64 },

    #[error("Unit count overflow for {id}: {available} + {requested}")]
    UnitOverflow {
        id: String,
        requested: u64,
        available: u64,
    },

    #[error("Equipment validation error: {0}")]
    ValidationError(String),

    #[error("Concurrent update conflict on {id} after {attempts} attempt(s)")]
    Conflict { id: String, attempts: u32 },

    #[error("Equipment already exists: {0}")]
    AlreadyExists(String),

    #[error("Equipment storage error: {0}")]
    StorageError(String),
}

impl From<LedgerError> for EquipmentError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientQuantity { id, current, delta } => EquipmentError::InsufficientUnits {
                id,
                requested: delta.unsigned_abs(),
                available: current,
            },
            LedgerError::NegativeTarget { id, target } => EquipmentError::InvalidTarget { id, target },
            LedgerError::QuantityOverflow { id, current, delta } => EquipmentError::UnitOverflow {
                id,
                requested: delta.unsigned_abs(),
                available: current,
            },
            LedgerError::StaleWrite { id, attempts, .. } => EquipmentError::Conflict { id, attempts },
            LedgerError::NotFound { id, .. } => EquipmentError::NotFound(id),
            LedgerError::AlreadyExists { id, .. } => EquipmentError::AlreadyExists(id),
            LedgerError::Storage(e) => EquipmentError::StorageError(e.to_string()),
            exhausted @ LedgerError::IdsExhausted { .. } => EquipmentError::StorageError(exhausted.to_string()),
            LedgerError::Entity(inner) => match inner.downcast::<EquipmentError>() {
                Ok(own) => *own,
                Err(other) => EquipmentError::ValidationError(other.to_string()),
            },
        }
    }
}
