use stock_ledger::api;
use stock_ledger::clients::StockClient;
use stock_ledger::config::LedgerConfig;
use stock_ledger::framework::LedgerError;
use stock_ledger::lifecycle::HospitalInventory;
use stock_ledger::medication::MedicationError;
use stock_ledger::model::{
    EquipmentCreate, Medication, MedicationCreate, MedicationId, MedicationUpdate, PrescriptionCreate,
};
use stock_ledger::prescription::PrescriptionError;

fn medication(name: &str, stock: u64) -> MedicationCreate {
    MedicationCreate {
        name: name.to_string(),
        presentation: "tablet".to_string(),
        concentration: "500mg".to_string(),
        stock,
    }
}

/// Full end-to-end flow across every client.
#[tokio::test]
async fn test_full_inventory_integration() {
    let inventory = HospitalInventory::new(&LedgerConfig::default());

    let med_id = inventory
        .medication_client
        .create_medication(medication("Paracetamol", 100))
        .await
        .expect("Failed to create medication");

    let record = inventory
        .medication_client
        .get(med_id)
        .await
        .expect("Failed to get medication")
        .expect("Medication not found");
    assert_eq!(record.entity.name, "Paracetamol");
    assert_eq!((record.quantity, record.version), (100, 1));

    // Prescribe (dispenses stock)
    let prescription = inventory
        .prescription_client
        .prescribe(PrescriptionCreate {
            medication_id: med_id,
            patient: "Alice".to_string(),
            units: 5,
        })
        .await
        .expect("Failed to prescribe");
    assert_eq!(prescription.medication_id, med_id);

    let stock = inventory
        .medication_client
        .stock_level(med_id)
        .await
        .expect("Failed to check stock");
    assert_eq!(stock, 95);

    // Medication is pinned while the prescription is open
    let err = inventory.medication_client.delete(med_id).await.unwrap_err();
    assert!(matches!(err, MedicationError::StillReferenced { references: 1, .. }));

    // Descriptive updates bump the version but keep stock
    let record = inventory
        .medication_client
        .update_medication(
            med_id,
            MedicationUpdate {
                name: Some("Acetaminophen".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!((record.quantity, record.version), (95, 3));

    inventory
        .prescription_client
        .close(prescription.id)
        .await
        .expect("Failed to close prescription");
    inventory
        .medication_client
        .delete(med_id)
        .await
        .expect("Delete should succeed once unreferenced");
    assert!(inventory.medication_client.get(med_id).await.unwrap().is_none());

    // Equipment is independent of medications
    let pump = inventory
        .equipment_client
        .create_equipment(EquipmentCreate {
            name: "Infusion pump".to_string(),
            location: "ICU".to_string(),
            units: 3,
        })
        .await
        .unwrap();
    inventory.equipment_client.check_out(pump, 3).await.unwrap();
    assert!(inventory.equipment_client.check_out(pump, 1).await.is_err());
    assert_eq!(inventory.equipment_client.stock_level(pump).await.unwrap(), 0);
}

#[tokio::test]
async fn test_stock_endpoint_scenarios() {
    let inventory = HospitalInventory::default();
    let client = &inventory.medication_client;
    let id = client.create_medication(medication("Ibuprofen", 10)).await.unwrap();

    // 10 with -5 gives 5
    let response = api::update_stock::<Medication, _>(client, id, br#"{"cantidad": -5}"#).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["cantidad"], 5);
    assert_eq!(response.body["version"], 2);

    // 5 with -15 is rejected and leaves the stock alone
    let response = api::update_stock::<Medication, _>(client, id, br#"{"cantidad": -15}"#).await;
    assert_eq!(response.status, 400);
    assert_eq!(client.stock_level(id).await.unwrap(), 5);

    // Floats never reach the ledger
    let response = api::update_stock::<Medication, _>(client, id, br#"{"cantidad": 2.5}"#).await;
    assert_eq!(response.status, 400);
    assert_eq!(client.fetch(id).await.unwrap().version, 2);

    // Absolute set
    let response = api::set_stock::<Medication, _>(client, id, br#"{"cantidad": 0}"#).await;
    assert_eq!(response.body, serde_json::json!({"id": "medication_1", "cantidad": 0, "version": 3}));

    // Unknown id
    let response = api::update_stock::<Medication, _>(client, MedicationId(404), br#"{"cantidad": 1}"#).await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_two_writers_on_one_snapshot() {
    let inventory = HospitalInventory::default();
    let client = &inventory.medication_client;
    let id = client.create_medication(medication("Morphine", 10)).await.unwrap();
    let snapshot = client.fetch(id).await.unwrap();

    let first = client.inner().adjust_from(&snapshot, -3).await;
    let second = client.inner().adjust_from(&snapshot, -4).await;

    let committed = first.expect("first writer wins");
    assert_eq!((committed.quantity, committed.version), (7, 2));
    match second {
        Err(LedgerError::StaleWrite {
            expected,
            actual,
            attempts,
            ..
        }) => assert_eq!((expected, actual, attempts), (1, 2, 1)),
        other => panic!("Expected StaleWrite, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_prescription_leaves_no_trace() {
    let inventory = HospitalInventory::default();
    let id = inventory
        .medication_client
        .create_medication(medication("Insulin", 1))
        .await
        .unwrap();

    let err = inventory
        .prescription_client
        .prescribe(PrescriptionCreate {
            medication_id: id,
            patient: "Bob".to_string(),
            units: 2,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PrescriptionError::Medication(MedicationError::InsufficientStock { .. })
    ));

    assert_eq!(inventory.medication_client.stock_level(id).await.unwrap(), 1);
    assert!(inventory.prescription_client.for_medication(id).is_empty());
    inventory.medication_client.delete(id).await.unwrap();
}
