//! Equipment inventory: countable units that are checked out and back in.
//!
//! Equipment has no dependencies, so its context is `()` and deletes are never vetoed.

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::Arc;

use crate::clients::EquipmentClient;
use crate::framework::{InMemoryStore, ResourceClient};

/// Creates an in-memory Equipment client.
pub fn new(max_retries: u32) -> EquipmentClient {
    let generic_client = ResourceClient::new(Arc::new(InMemoryStore::new()), (), max_retries);
    EquipmentClient::new(generic_client)
}
