//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod equipment_client;
pub mod medication_client;
pub mod prescription_client;
pub mod stock_client;

pub use equipment_client::*;
pub use medication_client::*;
pub use prescription_client::*;
pub use stock_client::*;
