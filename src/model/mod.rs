//! Pure data structures (DTOs) implementing the [`LedgerEntity`](crate::framework::LedgerEntity) trait.

pub mod equipment;
pub mod medication;
pub mod prescription;

pub use equipment::*;
pub use medication::*;
pub use prescription::*;
