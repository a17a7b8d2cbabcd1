//! Error types for Prescription operations.

use thiserror::Error;

use crate::medication::MedicationError;

/// Errors that can occur during prescription operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PrescriptionError {
    #[error("Prescription not found: {0}")]
    NotFound(String),

    /// The prescription data provided is invalid.
    #[error("Prescription validation error: {0}")]
    ValidationError(String),

    /// The id counter has no values left.
    #[error("no prescription ids left")]
    IdsExhausted,

    /// The referenced medication rejected the dispense.
    #[error("Medication error: {0}")]
    Medication(#[from] MedicationError),
}
