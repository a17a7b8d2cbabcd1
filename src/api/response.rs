//! Translation of results into HTTP-style status codes and JSON bodies.

use serde::Serialize;
use serde_json::{json, Value};

use super::payload::ApiError;
use crate::equipment::EquipmentError;
use crate::framework::{LedgerEntity, LedgerError, ResourceRecord};
use crate::medication::MedicationError;
use crate::prescription::PrescriptionError;

/// Errors that know which HTTP status they map to.
pub trait HttpStatus {
    fn status_code(&self) -> u16;
}

impl HttpStatus for ApiError {
    fn status_code(&self) -> u16 {
        400
    }
}

impl HttpStatus for LedgerError {
    fn status_code(&self) -> u16 {
        match self {
            LedgerError::InsufficientQuantity { .. }
            | LedgerError::NegativeTarget { .. }
            | LedgerError::QuantityOverflow { .. }
            | LedgerError::Entity(_) => 400,
            LedgerError::NotFound { .. } => 404,
            LedgerError::StaleWrite { .. } | LedgerError::AlreadyExists { .. } => 409,
            LedgerError::Storage(_) | LedgerError::IdsExhausted { .. } => 500,
        }
    }
}

impl HttpStatus for MedicationError {
    fn status_code(&self) -> u16 {
        match self {
            MedicationError::InsufficientStock { .. }
            | MedicationError::InvalidTarget { .. }
            | MedicationError::StockOverflow { .. }
            | MedicationError::ValidationError(_) => 400,
            MedicationError::NotFound(_) => 404,
            MedicationError::StillReferenced { .. }
            | MedicationError::Conflict { .. }
            | MedicationError::AlreadyExists(_) => 409,
            MedicationError::StorageError(_) => 500,
        }
    }
}

impl HttpStatus for EquipmentError {
    fn status_code(&self) -> u16 {
        match self {
            EquipmentError::InsufficientUnits { .. }
            | EquipmentError::InvalidTarget { .. }
            | EquipmentError::UnitOverflow { .. }
            | EquipmentError::ValidationError(_) => 400,
            EquipmentError::NotFound(_) => 404,
            EquipmentError::Conflict { .. } | EquipmentError::AlreadyExists(_) => 409,
            EquipmentError::StorageError(_) => 500,
        }
    }
}

impl HttpStatus for PrescriptionError {
    fn status_code(&self) -> u16 {
        match self {
            PrescriptionError::NotFound(_) => 404,
            PrescriptionError::ValidationError(_) => 400,
            PrescriptionError::IdsExhausted => 500,
            PrescriptionError::Medication(e) => e.status_code(),
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        _ => "Internal Server Error",
    }
}

/// A status code plus JSON body, ready for whatever transport sits in front.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::internal(&e.to_string()),
        }
    }

    pub fn error<E: HttpStatus + std::fmt::Display>(err: &E) -> Self {
        let status = err.status_code();
        Self {
            status,
            body: json!({
                "statusCode": status,
                "error": reason(status),
                "message": err.to_string(),
            }),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            status: 500,
            body: json!({
                "statusCode": 500,
                "error": reason(500),
                "message": message,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Wire view of a committed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockView {
    pub id: String,
    pub cantidad: u64,
    pub version: u64,
}

impl<T: LedgerEntity> From<&ResourceRecord<T>> for StockView {
    fn from(record: &ResourceRecord<T>) -> Self {
        Self {
            id: record.id.to_string(),
            cantidad: record.quantity,
            version: record.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::StoreError;

    #[test]
    fn test_ledger_status_codes() {
        let cases = [
            (
                LedgerError::InsufficientQuantity {
                    id: "x".into(),
                    current: 1,
                    delta: -2,
                },
                400,
            ),
            (LedgerError::NegativeTarget { id: "x".into(), target: -1 }, 400),
            (
                LedgerError::QuantityOverflow {
                    id: "x".into(),
                    current: u64::MAX,
                    delta: 1,
                },
                400,
            ),
            (LedgerError::NotFound { kind: "medication", id: "x".into() }, 404),
            (
                LedgerError::StaleWrite {
                    id: "x".into(),
                    expected: 1,
                    actual: 2,
                    attempts: 4,
                },
                409,
            ),
            (LedgerError::AlreadyExists { kind: "medication", id: "x".into() }, 409),
            (LedgerError::Storage(StoreError::Unavailable("down".into())), 500),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn test_domain_status_codes() {
        let referenced = MedicationError::StillReferenced {
            id: "medication_1".into(),
            references: 2,
        };
        assert_eq!(referenced.status_code(), 409);
        assert_eq!(PrescriptionError::Medication(referenced).status_code(), 409);
        let conflict = MedicationError::Conflict {
            id: "medication_1".into(),
            attempts: 4,
        };
        assert_eq!(conflict.status_code(), 409);
        assert_eq!(
            EquipmentError::Conflict {
                id: "equipment_1".into(),
                attempts: 1,
            }
            .status_code(),
            409
        );
        assert_eq!(PrescriptionError::IdsExhausted.status_code(), 500);
        assert_eq!(LedgerError::IdsExhausted { kind: "medication" }.status_code(), 500);
        assert_eq!(EquipmentError::NotFound("equipment_1".into()).status_code(), 404);
        assert_eq!(EquipmentError::StorageError("io".into()).status_code(), 500);
    }

    #[test]
    fn test_error_body_shape() {
        let response = ApiResponse::error(&MedicationError::NotFound("medication_9".into()));
        assert_eq!(response.status, 404);
        assert_eq!(
            response.body,
            json!({
                "statusCode": 404,
                "error": "Not Found",
                "message": "Medication not found: medication_9",
            })
        );
        assert!(!response.is_success());
    }

    #[test]
    fn test_stock_view_body() {
        let view = StockView {
            id: "medication_1".into(),
            cantidad: 5,
            version: 2,
        };
        let response = ApiResponse::ok(view);
        assert!(response.is_success());
        assert_eq!(response.body, json!({"id": "medication_1", "cantidad": 5, "version": 2}));
    }
}
