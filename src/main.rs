use stock_ledger::api;
use stock_ledger::clients::StockClient;
use stock_ledger::config::LedgerConfig;
use stock_ledger::lifecycle::tracing::setup_tracing;
use stock_ledger::lifecycle::HospitalInventory;
use stock_ledger::model::{EquipmentCreate, Medication, MedicationCreate, PrescriptionCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = LedgerConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!(max_retries = config.max_retries, "Starting stock ledger demo");

    let inventory = HospitalInventory::new(&config);

    let span = tracing::info_span!("pharmacy_setup");
    let medication_id = async {
        info!("Creating medication");
        inventory
            .medication_client
            .create_medication(MedicationCreate {
                name: "Paracetamol".to_string(),
                presentation: "tablet".to_string(),
                concentration: "500mg".to_string(),
                stock: 10,
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let wheelchair_id = inventory
        .equipment_client
        .create_equipment(EquipmentCreate {
            name: "Wheelchair".to_string(),
            location: "Emergency".to_string(),
            units: 4,
        })
        .await
        .map_err(|e| e.to_string())?;

    // Stock requests as a router would hand them over
    let span = tracing::info_span!("stock_requests");
    async {
        for body in [r#"{"cantidad": -5}"#, r#"{"cantidad": -15}"#, r#"{"cantidad": 0}"#] {
            let response =
                api::update_stock::<Medication, _>(&inventory.medication_client, medication_id, body.as_bytes()).await;
            info!(status = response.status, body = %response.body, "Response");
        }
    }
    .instrument(span)
    .await;

    // Concurrent decrements on one record
    let span = tracing::info_span!("concurrent_dispense");
    async {
        let mut tasks = Vec::new();
        for _ in 0..4 {
            let client = inventory.medication_client.clone();
            tasks.push(tokio::spawn(async move { client.dispense(medication_id, 2).await }));
        }
        for task in tasks {
            match task.await {
                Ok(Ok(record)) => info!(quantity = record.quantity, version = record.version, "Dispensed"),
                Ok(Err(e)) => info!(error = %e, "Dispense rejected"),
                Err(e) => error!(error = %e, "Dispense task failed"),
            }
        }
    }
    .instrument(span)
    .await;

    let restocked = inventory
        .medication_client
        .restock(medication_id, 6)
        .await
        .map_err(|e| e.to_string())?;
    info!(quantity = restocked.quantity, "Restocked");

    let span = tracing::info_span!("prescriptions");
    let prescription = async {
        inventory
            .prescription_client
            .prescribe(PrescriptionCreate {
                medication_id,
                patient: "Maria".to_string(),
                units: 3,
            })
            .await
    }
    .instrument(span)
    .await;

    match prescription {
        Ok(prescription) => {
            if let Err(e) = inventory.medication_client.delete(medication_id).await {
                info!(error = %e, "Delete blocked as expected");
            }
            if let Err(e) = inventory.prescription_client.close(prescription.id).await {
                error!(error = %e, "Close failed");
            }
        }
        Err(e) => error!(error = %e, "Prescription failed"),
    }

    inventory
        .equipment_client
        .check_out(wheelchair_id, 1)
        .await
        .map_err(|e| e.to_string())?;

    let stock = inventory
        .medication_client
        .stock_level(medication_id)
        .await
        .map_err(|e| e.to_string())?;
    let wheelchairs = inventory
        .equipment_client
        .stock_level(wheelchair_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(stock, wheelchairs, "Application completed successfully");
    Ok(())
}
