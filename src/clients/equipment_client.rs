use tracing::{debug, instrument};

use crate::clients::stock_client::{units_to_delta, DefaultStore, StockClient};
use crate::equipment::EquipmentError;
use crate::framework::{ResourceClient, ResourceRecord, ResourceStore};
use crate::model::{Equipment, EquipmentCreate, EquipmentId, EquipmentUpdate};

/// Client for countable equipment.
pub struct EquipmentClient<S: ResourceStore<Equipment> = DefaultStore<Equipment>> {
    inner: ResourceClient<Equipment, S>,
}

impl<S: ResourceStore<Equipment>> Clone for EquipmentClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: ResourceStore<Equipment>> EquipmentClient<S> {
    pub fn new(inner: ResourceClient<Equipment, S>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_equipment(&self, params: EquipmentCreate) -> Result<EquipmentId, EquipmentError> {
        debug!(?params, "create_equipment called");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_equipment(
        &self,
        id: EquipmentId,
        update: EquipmentUpdate,
    ) -> Result<ResourceRecord<Equipment>, EquipmentError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Hands out `units`. Fails when fewer are on hand.
    #[instrument(skip(self))]
    pub async fn check_out(&self, id: EquipmentId, units: u64) -> Result<ResourceRecord<Equipment>, EquipmentError> {
        let delta = units_to_delta(units)
            .ok_or_else(|| EquipmentError::ValidationError(format!("cannot check out {units} units")))?;
        Ok(self.inner.adjust(id, delta).await?)
    }

    #[instrument(skip(self))]
    pub async fn check_in(&self, id: EquipmentId, units: u64) -> Result<ResourceRecord<Equipment>, EquipmentError> {
        let delta = i64::try_from(units)
            .map_err(|_| EquipmentError::ValidationError(format!("cannot check in {units} units")))?;
        Ok(self.inner.adjust(id, delta).await?)
    }
}

impl<S: ResourceStore<Equipment>> StockClient<Equipment> for EquipmentClient<S> {
    type Store = S;
    type Error = EquipmentError;

    fn inner(&self) -> &ResourceClient<Equipment, S> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pumps(units: u64) -> EquipmentCreate {
        EquipmentCreate {
            name: "Infusion pump".into(),
            location: "ICU".into(),
            units,
        }
    }

    #[tokio::test]
    async fn test_check_out_and_in() {
        let client = crate::equipment::new(3);
        let id = client.create_equipment(pumps(2)).await.unwrap();
        assert_eq!(id.to_string(), "equipment_1");

        client.check_out(id, 2).await.unwrap();
        let err = client.check_out(id, 1).await.unwrap_err();
        assert_eq!(
            err,
            EquipmentError::InsufficientUnits {
                id: "equipment_1".into(),
                requested: 1,
                available: 0,
            }
        );

        let record = client.check_in(id, 1).await.unwrap();
        assert_eq!((record.quantity, record.version), (1, 3));
    }

    #[tokio::test]
    async fn test_oversized_request_rejected_before_ledger() {
        let client = crate::equipment::new(3);
        let id = client.create_equipment(pumps(2)).await.unwrap();
        assert!(matches!(
            client.check_out(id, u64::MAX).await,
            Err(EquipmentError::ValidationError(_))
        ));
        assert_eq!(client.fetch(id).await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let client = crate::equipment::new(3);
        let id = client.create_equipment(pumps(1)).await.unwrap();
        let record = client
            .update_equipment(
                id,
                EquipmentUpdate {
                    location: Some("Ward C".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(record.entity.location, "Ward C");

        client.delete(id).await.unwrap();
        assert_eq!(
            client.delete(id).await.unwrap_err(),
            EquipmentError::NotFound("equipment_1".into())
        );
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let client = crate::equipment::new(3);
        let mut params = pumps(1);
        params.name = String::new();
        assert!(matches!(
            client.create_equipment(params).await,
            Err(EquipmentError::ValidationError(_))
        ));
        assert!(client.list().await.unwrap().is_empty());
    }
}
