//! # Medication
//!
//! Pharmacy stock. This is the resource the `cantidad` stock-update flow acts on.
//!
//! ## Structure
//!
//! - [`entity`] - [`LedgerEntity`](crate::framework::LedgerEntity) implementation for [`Medication`]
//! - [`error`] - [`MedicationError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the domain client
//!
//! ## Usage
//!
//! ```rust
//! use stock_ledger::clients::StockClient;
//! use stock_ledger::medication;
//! use stock_ledger::model::MedicationCreate;
//! use stock_ledger::prescription::ReferenceRegistry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = medication::new(ReferenceRegistry::new(), 3);
//!
//!     let id = client
//!         .create_medication(MedicationCreate {
//!             name: "Paracetamol".to_string(),
//!             presentation: "tablet".to_string(),
//!             concentration: "500mg".to_string(),
//!             stock: 10,
//!         })
//!         .await?;
//!
//!     let record = client.adjust_stock(id, -5).await?;
//!     assert_eq!(record.quantity, 5);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::Arc;

use crate::clients::MedicationClient;
use crate::framework::{InMemoryStore, ResourceClient};
use crate::prescription::ReferenceRegistry;

/// Creates an in-memory Medication client.
///
/// `references` must be the same registry the prescription client registers into,
/// otherwise deletes will not see open prescriptions.
pub fn new(references: ReferenceRegistry, max_retries: u32) -> MedicationClient {
    let generic_client = ResourceClient::new(Arc::new(InMemoryStore::new()), references, max_retries);
    MedicationClient::new(generic_client)
}
