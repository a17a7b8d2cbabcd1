//! Represents a piece of countable hospital equipment (wheelchairs, infusion pumps, …).
//!
//! The number of available units is the record quantity.

use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub u32);

impl From<u32> for EquipmentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "equipment_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    /// Facility or ward where the units are kept.
    pub location: String,
}

impl Equipment {
    pub fn new(id: EquipmentId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentCreate {
    pub name: String,
    pub location: String,
    pub units: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
}
