use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::clients::stock_client::DefaultStore;
use crate::clients::MedicationClient;
use crate::framework::client::allocate_id;
use crate::framework::ResourceStore;
use crate::model::{Medication, MedicationId, Prescription, PrescriptionCreate, PrescriptionId};
use crate::prescription::PrescriptionError;

/// Client for prescriptions.
///
/// Prescribing registers a reference on the medication first, then dispenses. If the
/// dispense fails the reference is released again, so a rejected prescription never
/// pins a medication.
pub struct PrescriptionClient<S: ResourceStore<Medication> = DefaultStore<Medication>> {
    medications: MedicationClient<S>,
    prescriptions: Arc<DashMap<PrescriptionId, Prescription>>,
    next_id: Arc<AtomicU32>,
}

impl<S: ResourceStore<Medication>> Clone for PrescriptionClient<S> {
    fn clone(&self) -> Self {
        Self {
            medications: self.medications.clone(),
            prescriptions: Arc::clone(&self.prescriptions),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<S: ResourceStore<Medication>> PrescriptionClient<S> {
    pub fn new(medications: MedicationClient<S>) -> Self {
        Self {
            medications,
            prescriptions: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    /// Starts prescription ids at `first` instead of 1.
    pub fn with_first_id(self, first: u32) -> Self {
        self.next_id.store(first, Ordering::SeqCst);
        self
    }

    #[instrument(skip(self, params))]
    pub async fn prescribe(&self, params: PrescriptionCreate) -> Result<Prescription, PrescriptionError> {
        debug!(?params, "prescribe called");
        if params.patient.trim().is_empty() {
            return Err(PrescriptionError::ValidationError("patient must not be empty".into()));
        }
        if params.units == 0 {
            return Err(PrescriptionError::ValidationError("units must be positive".into()));
        }

        // Allocated before any stock moves, so running out never costs a dispense
        let id: PrescriptionId = allocate_id(&self.next_id)
            .ok_or(PrescriptionError::IdsExhausted)?
            .into();

        let references = self.medications.references();
        references.acquire(params.medication_id);
        if let Err(e) = self.medications.dispense(params.medication_id, params.units).await {
            references.release(params.medication_id);
            warn!(medication_id = %params.medication_id, error = %e, "Dispense rejected");
            return Err(e.into());
        }

        let prescription = Prescription {
            id,
            medication_id: params.medication_id,
            patient: params.patient,
            units: params.units,
        };
        self.prescriptions.insert(id, prescription.clone());
        info!(%id, medication_id = %prescription.medication_id, units = prescription.units, "Prescribed");
        Ok(prescription)
    }

    /// Closes a prescription and releases its medication. Stock is not returned.
    #[instrument(skip(self))]
    pub async fn close(&self, id: PrescriptionId) -> Result<Prescription, PrescriptionError> {
        let (_, prescription) = self
            .prescriptions
            .remove(&id)
            .ok_or_else(|| PrescriptionError::NotFound(id.to_string()))?;
        self.medications.references().release(prescription.medication_id);
        info!(%id, "Closed");
        Ok(prescription)
    }

    pub fn get(&self, id: PrescriptionId) -> Option<Prescription> {
        self.prescriptions.get(&id).map(|p| p.value().clone())
    }

    /// Open prescriptions drawing from `medication_id`.
    pub fn for_medication(&self, medication_id: MedicationId) -> Vec<Prescription> {
        let mut found: Vec<Prescription> = self
            .prescriptions
            .iter()
            .filter(|p| p.medication_id == medication_id)
            .map(|p| p.value().clone())
            .collect();
        found.sort_by_key(|p| p.id.0);
        found
    }
}
