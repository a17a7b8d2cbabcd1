//! A prescription dispensed against a medication's stock.
//!
//! While a prescription is open it holds a reference on its medication, which blocks
//! that medication from being deleted.

use serde::{Deserialize, Serialize};

use std::fmt::Display;

use crate::model::MedicationId;

/// Type-safe identifier for Prescriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrescriptionId(pub u32);

impl From<u32> for PrescriptionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PrescriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "prescription_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub medication_id: MedicationId,
    pub patient: String,
    pub units: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionCreate {
    pub medication_id: MedicationId,
    pub patient: String,
    pub units: u64,
}
