//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Compact format without the crate/module prefix (`with_target(false)`). Records carry
//! an `entity_type` field instead.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! [`LedgerConfig::log_filter`](crate::config::LedgerConfig::log_filter) (`LEDGER_LOG`).
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Full payloads and every compare-and-swap retry
//! RUST_LOG=debug cargo run
//!
//! # Only the conflict resolver
//! RUST_LOG=stock_ledger::framework::resolver=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - `debug!` on entry, with the payload (`?params`, `delta`, `target`)
//! - `info!` on each commit, with `id`, `version`, and the new quantity
//! - `warn!` on rejected deltas, version conflicts, and vetoed deletes
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Created entity_type="medication" id=medication_1 quantity=10
//! INFO dispense{id=MedicationId(1) units=3}: Committed entity_type="medication" id=medication_1 quantity=7 version=2 attempt=1
//! INFO prescribe: Prescribed id=prescription_1 medication_id=medication_1 units=3
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the source
        .compact()
        .init();
}
