//! Entity trait implementation for the Medication domain type.
//!
//! This module contains the [`LedgerEntity`] trait implementation
//! that enables [`Medication`] to be managed by the generic [`crate::framework::ResourceClient`].
//!
//! Deletion consults the shared [`ReferenceRegistry`]: a medication with open
//! prescriptions cannot be removed.

use async_trait::async_trait;

use super::error::MedicationError;
use crate::framework::LedgerEntity;
use crate::model::{Medication, MedicationCreate, MedicationId, MedicationUpdate};
use crate::prescription::ReferenceRegistry;

fn required(field: &str, value: &str) -> Result<(), MedicationError> {
    if value.trim().is_empty() {
        return Err(MedicationError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

#[async_trait]
impl LedgerEntity for Medication {
    type Id = MedicationId;
    type Create = MedicationCreate;
    type Update = MedicationUpdate;
    type Context = ReferenceRegistry;
    type Error = MedicationError;

    const KIND: &'static str = "medication";

    /// Creates a new Medication from creation parameters.
    fn from_create_params(
        id: MedicationId,
        params: MedicationCreate,
    ) -> Result<(Self, u64), MedicationError> {
        required("name", &params.name)?;
        required("presentation", &params.presentation)?;
        let medication = Self::new(id, params.name, params.presentation, params.concentration);
        Ok((medication, params.stock))
    }

    /// Handles descriptive updates.
    ///
    /// # Fields Updated
    /// - `name`
    /// - `presentation`
    /// - `concentration`
    fn apply_update(&mut self, update: &MedicationUpdate) -> Result<(), MedicationError> {
        if let Some(name) = &update.name {
            required("name", name)?;
            self.name = name.clone();
        }
        if let Some(presentation) = &update.presentation {
            required("presentation", presentation)?;
            self.presentation = presentation.clone();
        }
        if let Some(concentration) = &update.concentration {
            self.concentration = concentration.clone();
        }
        Ok(())
    }

    async fn on_delete(&self, _quantity: u64, references: &ReferenceRegistry) -> Result<(), MedicationError> {
        let count = references.count(&self.id);
        if count > 0 {
            return Err(MedicationError::StillReferenced {
                id: self.id.to_string(),
                references: count,
            });
        }
        Ok(())
    }
}
