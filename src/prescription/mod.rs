//! # Prescription
//!
//! Prescriptions dispense medication stock and pin the medication against deletion
//! while they are open.
//!
//! - [`ReferenceRegistry`] - open-prescription counts shared with the medication side
//! - [`PrescriptionError`] - wraps [`MedicationError`](crate::medication::MedicationError) via `#[from]`
//!
//! Prescriptions are not stock-bearing, so they live in a plain concurrent map
//! inside [`PrescriptionClient`](crate::clients::PrescriptionClient) rather than in a
//! [`ResourceStore`](crate::framework::ResourceStore).

pub mod error;
pub mod references;

pub use error::*;
pub use references::*;

use crate::clients::{MedicationClient, PrescriptionClient};

/// Creates a Prescription client that dispenses from `medications`.
///
/// The registry is taken from the medication client's context, so both sides agree
/// on open references.
pub fn new(medications: MedicationClient) -> PrescriptionClient {
    PrescriptionClient::new(medications)
}
