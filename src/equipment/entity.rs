use async_trait::async_trait;

use super::error::EquipmentError;
use crate::framework::LedgerEntity;
use crate::model::{Equipment, EquipmentCreate, EquipmentId, EquipmentUpdate};

#[async_trait]
impl LedgerEntity for Equipment {
    type Id = EquipmentId;
    type Create = EquipmentCreate;
    type Update = EquipmentUpdate;
    type Context = ();
    type Error = EquipmentError;

    const KIND: &'static str = "equipment";

    fn from_create_params(id: EquipmentId, params: EquipmentCreate) -> Result<(Self, u64), EquipmentError> {
        if params.name.trim().is_empty() {
            return Err(EquipmentError::ValidationError("name must not be empty".into()));
        }
        Ok((Self::new(id, params.name, params.location), params.units))
    }

    fn apply_update(&mut self, update: &EquipmentUpdate) -> Result<(), EquipmentError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(EquipmentError::ValidationError("name must not be empty".into()));
            }
            self.name = name.clone();
        }
        if let Some(location) = &update.location {
            self.location = location.clone();
        }
        Ok(())
    }
}
