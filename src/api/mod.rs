//! # API translation
//!
//! Transport-agnostic handlers for the stock endpoints. A router in front only has to
//! pass the path id and the raw body, then write back [`ApiResponse::status`] and
//! [`ApiResponse::body`].
//!
//! | Outcome | Status |
//! |---|---|
//! | committed | 200 |
//! | bad payload, insufficient stock, negative target, overflow | 400 |
//! | unknown id | 404 |
//! | retries exhausted, still referenced, duplicate | 409 |
//! | storage failure | 500 |

pub mod payload;
pub mod response;

pub use payload::*;
pub use response::*;

use std::fmt::Display;
use tracing::{debug, warn};

use crate::clients::StockClient;
use crate::framework::LedgerEntity;

/// Applies `{ "cantidad": delta }` to the stock of `id`.
pub async fn update_stock<T, C>(client: &C, id: T::Id, body: &[u8]) -> ApiResponse
where
    T: LedgerEntity,
    C: StockClient<T>,
    C::Error: HttpStatus + Display,
{
    let update = match parse_stock_update(body) {
        Ok(update) => update,
        Err(e) => {
            warn!(entity_type = T::KIND, %id, error = %e, "Rejected payload");
            return ApiResponse::error(&e);
        }
    };
    debug!(entity_type = T::KIND, %id, delta = update.cantidad, "update_stock");
    respond(client.adjust_stock(id, update.cantidad).await)
}

/// Sets the stock of `id` to `{ "cantidad": target }`.
pub async fn set_stock<T, C>(client: &C, id: T::Id, body: &[u8]) -> ApiResponse
where
    T: LedgerEntity,
    C: StockClient<T>,
    C::Error: HttpStatus + Display,
{
    let update = match parse_stock_update(body) {
        Ok(update) => update,
        Err(e) => {
            warn!(entity_type = T::KIND, %id, error = %e, "Rejected payload");
            return ApiResponse::error(&e);
        }
    };
    debug!(entity_type = T::KIND, %id, target = update.cantidad, "set_stock");
    respond(client.set_stock(id, update.cantidad).await)
}

fn respond<T: LedgerEntity, E: HttpStatus + Display>(
    result: Result<crate::framework::ResourceRecord<T>, E>,
) -> ApiResponse {
    match result {
        Ok(record) => ApiResponse::ok(StockView::from(&record)),
        Err(e) => {
            warn!(entity_type = T::KIND, status = e.status_code(), error = %e, "Stock request failed");
            ApiResponse::error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MedicationClient;
    use crate::framework::mock::ScriptedStore;
    use crate::framework::ResourceClient;
    use crate::model::{Medication, MedicationCreate, MedicationId};
    use crate::prescription::ReferenceRegistry;
    use serde_json::json;
    use std::sync::Arc;

    async fn seeded(stock: u64) -> (MedicationClient, MedicationId) {
        let client = crate::medication::new(ReferenceRegistry::new(), 3);
        let id = client
            .create_medication(MedicationCreate {
                name: "Ibuprofen".into(),
                presentation: "tablet".into(),
                concentration: "400mg".into(),
                stock,
            })
            .await
            .unwrap();
        (client, id)
    }

    #[tokio::test]
    async fn test_update_stock_success() {
        let (client, id) = seeded(10).await;
        let response = update_stock::<Medication, _>(&client, id, br#"{"cantidad": -5}"#).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"id": "medication_1", "cantidad": 5, "version": 2}));
    }

    #[tokio::test]
    async fn test_update_stock_insufficient() {
        let (client, id) = seeded(10).await;
        let response = update_stock::<Medication, _>(&client, id, br#"{"cantidad": -15}"#).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "Bad Request");
        assert_eq!(client.stock_level(id).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_zero_delta_bumps_version() {
        let (client, id) = seeded(0).await;
        let response = update_stock::<Medication, _>(&client, id, br#"{"cantidad": 0}"#).await;
        assert_eq!(response.body, json!({"id": "medication_1", "cantidad": 0, "version": 2}));
    }

    #[tokio::test]
    async fn test_bad_payload_never_touches_stock() {
        let (client, id) = seeded(10).await;
        let response = update_stock::<Medication, _>(&client, id, br#"{"cantidad": "lots"}"#).await;
        assert_eq!(response.status, 400);
        assert_eq!(client.fetch(id).await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let (client, _) = seeded(10).await;
        let response = update_stock::<Medication, _>(&client, MedicationId(77), br#"{"cantidad": 1}"#).await;
        assert_eq!(response.status, 404);
        assert_eq!(response.body["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_exhausted_retries_map_to_conflict() {
        let store = ScriptedStore::<Medication>::new();
        let client = MedicationClient::new(ResourceClient::new(Arc::new(store.clone()), ReferenceRegistry::new(), 0));
        let id = client
            .create_medication(MedicationCreate {
                name: "Heparin".into(),
                presentation: "vial".into(),
                concentration: "5000IU".into(),
                stock: 10,
            })
            .await
            .unwrap();
        store.expect_swap().concurrent_delta(-2);

        let response = update_stock::<Medication, _>(&client, id, br#"{"cantidad": -1}"#).await;
        assert_eq!(response.status, 409);
        assert_eq!(response.body["statusCode"], 409);
        assert_eq!(response.body["error"], "Conflict");
        // Only the concurrent writer landed
        assert_eq!(store.inner_quantity(&id), Some(8));
        store.verify();
    }

    #[tokio::test]
    async fn test_set_stock() {
        let (client, id) = seeded(10).await;
        let response = set_stock::<Medication, _>(&client, id, br#"{"cantidad": 42}"#).await;
        assert_eq!(response.body["cantidad"], 42);

        let response = set_stock::<Medication, _>(&client, id, br#"{"cantidad": -1}"#).await;
        assert_eq!(response.status, 400);
        assert_eq!(client.stock_level(id).await.unwrap(), 42);
    }
}
