use tracing::info;

use crate::clients::{EquipmentClient, MedicationClient, PrescriptionClient};
use crate::config::LedgerConfig;
use crate::prescription::ReferenceRegistry;

/// Wires the hospital resource clients together.
///
/// `HospitalInventory` is responsible for:
/// - **Dependency Wiring**: the medication and prescription clients share one
///   [`ReferenceRegistry`], so open prescriptions block medication deletes
/// - **Configuration**: every client uses the same retry budget
///
/// There are no background tasks. Dropping the inventory drops the stores.
///
/// # Example
///
/// ```rust
/// use stock_ledger::config::LedgerConfig;
/// use stock_ledger::lifecycle::HospitalInventory;
/// use stock_ledger::model::{MedicationCreate, PrescriptionCreate};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let inventory = HospitalInventory::new(&LedgerConfig::default());
///
/// let medication_id = inventory
///     .medication_client
///     .create_medication(MedicationCreate {
///         name: "Insulin".into(),
///         presentation: "vial".into(),
///         concentration: "100IU/ml".into(),
///         stock: 20,
///     })
///     .await?;
///
/// inventory
///     .prescription_client
///     .prescribe(PrescriptionCreate {
///         medication_id,
///         patient: "Luis".into(),
///         units: 2,
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HospitalInventory {
    pub medication_client: MedicationClient,

    pub equipment_client: EquipmentClient,

    /// Dispenses from `medication_client`.
    pub prescription_client: PrescriptionClient,
}

impl HospitalInventory {
    pub fn new(config: &LedgerConfig) -> Self {
        let references = ReferenceRegistry::new();
        let medication_client = crate::medication::new(references, config.max_retries);
        let equipment_client = crate::equipment::new(config.max_retries);
        let prescription_client = crate::prescription::new(medication_client.clone());

        info!(max_retries = config.max_retries, "Hospital inventory ready");
        Self {
            medication_client,
            equipment_client,
            prescription_client,
        }
    }
}

impl Default for HospitalInventory {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}
