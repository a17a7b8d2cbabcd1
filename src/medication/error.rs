//! Error types for Medication operations.

use thiserror::Error;

use crate::framework::LedgerError;

/// Errors that can occur during medication operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MedicationError {
    /// The requested medication was not found.
    #[error("Medication not found: {0}")]
    NotFound(String),

    /// The requested decrement exceeds the available stock.
    #[error("Insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: String,
        requested: u64,
        available: u64,
    },

    /// An absolute stock target was negative.
    #[error("Invalid stock target for {id}: {target}")]
    InvalidTarget { id: String, target: i64 },

    /// The increment would not fit the stock counter.
    #[error("Stock overflow for {id}: {available} + {requested}")]
    StockOverflow {
        id: String,
        requested: u64,
        available: u64,
    },

    /// The medication data provided is invalid.
    #[error("Medication validation error: {0}")]
    ValidationError(String),

    /// Open prescriptions still point at this medication.
    #[error("Medication {id} is still referenced by {references} open prescription(s)")]
    StillReferenced { id: String, references: usize },

    /// Concurrent writers kept winning until retries ran out.
    #[error("Concurrent update conflict on {id} after {attempts} attempt(s)")]
    Conflict { id: String, attempts: u32 },

    #[error("Medication already exists: {0}")]
    AlreadyExists(String),

    /// An underlying storage error occurred.
    #[error("Medication storage error: {0}")]
    StorageError(String),
}

impl From<LedgerError> for MedicationError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientQuantity { id, current, delta } => {
                MedicationError::InsufficientStock {
                    id,
                    requested: delta.unsigned_abs(),
                    available: current,
                }
            }
            LedgerError::NegativeTarget { id, target } => MedicationError::InvalidTarget { id, target },
            LedgerError::QuantityOverflow { id, current, delta } => MedicationError::StockOverflow {
                id,
                requested: delta.unsigned_abs(),
                available: current,
            },
            LedgerError::StaleWrite { id, attempts, .. } => MedicationError::Conflict { id, attempts },
            LedgerError::NotFound { id, .. } => MedicationError::NotFound(id),
            LedgerError::AlreadyExists { id, .. } => MedicationError::AlreadyExists(id),
            LedgerError::Storage(e) => MedicationError::StorageError(e.to_string()),
            exhausted @ LedgerError::IdsExhausted { .. } => MedicationError::StorageError(exhausted.to_string()),
            LedgerError::Entity(inner) => match inner.downcast::<MedicationError>() {
                Ok(own) => *own,
                Err(other) => MedicationError::ValidationError(other.to_string()),
            },
        }
    }
}
