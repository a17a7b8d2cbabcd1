//! Represents a medication kept in the hospital pharmacy.
//!
//! # Ledger Framework
//! [`Medication`] implements the [`LedgerEntity`](crate::framework::LedgerEntity) trait,
//! allowing it to be managed by a [`ResourceClient`](crate::framework::ResourceClient).
//! The stock count itself lives on the surrounding
//! [`ResourceRecord`](crate::framework::ResourceRecord), not here.
//!
//! See `impl LedgerEntity for Medication` in [`crate::medication::entity`] for details on:
//! - Creation parameters ([`MedicationCreate`])
//! - Update parameters ([`MedicationUpdate`])

use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Medications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MedicationId(pub u32);

impl From<u32> for MedicationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MedicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "medication_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    /// Dosage form, e.g. "tablet" or "vial".
    pub presentation: String,
    /// Strength, e.g. "500mg".
    pub concentration: String,
}

impl Medication {
    /// Creates a new Medication instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically assigned by the client)
    /// * `name` - Medication name
    /// * `presentation` - Dosage form
    /// * `concentration` - Strength per unit
    pub fn new(
        id: MedicationId,
        name: impl Into<String>,
        presentation: impl Into<String>,
        concentration: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            presentation: presentation.into(),
            concentration: concentration.into(),
        }
    }
}

/// DTO for Medication creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationCreate {
    pub name: String,
    pub presentation: String,
    pub concentration: String,
    /// Initial stock.
    pub stock: u64,
}

// DTO for Medication updates. Stock is changed through deltas, never here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationUpdate {
    pub name: Option<String>,
    pub presentation: Option<String>,
    pub concentration: Option<String>,
}
