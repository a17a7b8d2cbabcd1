//! Wiring and startup concerns.

pub mod hospital_inventory;
pub mod tracing;

pub use hospital_inventory::HospitalInventory;
