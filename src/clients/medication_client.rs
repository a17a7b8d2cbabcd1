use tracing::{debug, instrument};

use crate::clients::stock_client::{units_to_delta, DefaultStore, StockClient};
use crate::framework::{ResourceClient, ResourceRecord, ResourceStore};
use crate::medication::MedicationError;
use crate::model::{Medication, MedicationCreate, MedicationId, MedicationUpdate};
use crate::prescription::ReferenceRegistry;

/// Client for the pharmacy stock.
pub struct MedicationClient<S: ResourceStore<Medication> = DefaultStore<Medication>> {
    inner: ResourceClient<Medication, S>,
}

impl<S: ResourceStore<Medication>> Clone for MedicationClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: ResourceStore<Medication>> MedicationClient<S> {
    pub fn new(inner: ResourceClient<Medication, S>) -> Self {
        Self { inner }
    }

    /// Open-prescription counts consulted on delete.
    pub fn references(&self) -> &ReferenceRegistry {
        self.inner.context()
    }

    #[instrument(skip(self, params))]
    pub async fn create_medication(&self, params: MedicationCreate) -> Result<MedicationId, MedicationError> {
        debug!(?params, "create_medication called");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_medication(
        &self,
        id: MedicationId,
        update: MedicationUpdate,
    ) -> Result<ResourceRecord<Medication>, MedicationError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Takes `units` out of stock.
    #[instrument(skip(self))]
    pub async fn dispense(&self, id: MedicationId, units: u64) -> Result<ResourceRecord<Medication>, MedicationError> {
        let delta = units_to_delta(units)
            .ok_or_else(|| MedicationError::ValidationError(format!("cannot dispense {units} units")))?;
        Ok(self.inner.adjust(id, delta).await?)
    }

    /// Puts `units` back into stock.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: MedicationId, units: u64) -> Result<ResourceRecord<Medication>, MedicationError> {
        let delta = i64::try_from(units)
            .map_err(|_| MedicationError::ValidationError(format!("cannot restock {units} units")))?;
        Ok(self.inner.adjust(id, delta).await?)
    }
}

impl<S: ResourceStore<Medication>> StockClient<Medication> for MedicationClient<S> {
    type Store = S;
    type Error = MedicationError;

    fn inner(&self) -> &ResourceClient<Medication, S> {
        &self.inner
    }
}
