//! # Stock Ledger
//!
//! > **Non-negative counters under concurrent deltas.**
//!
//! This crate keeps resource counts (pharmacy stock, equipment units) correct when many
//! requests adjust the same count at once. Every change is a signed delta committed with
//! optimistic concurrency: read the record, compute the new one, compare-and-swap on the
//! version, retry a bounded number of times on conflict.
//!
//! ## Core Concepts
//!
//! ### Generics: The Power of `T`
//! You'll see `ResourceClient<T: LedgerEntity>` everywhere. The commit loop is written
//! **once** and works for medications and equipment alike.
//!
//! ### Invariants
//! - A quantity is a `u64`. A delta that would take it below zero is rejected with
//!   [`LedgerError::InsufficientQuantity`](framework::LedgerError::InsufficientQuantity).
//! - Every successful commit increments the version by exactly one, including a zero delta.
//! - Two writers that read the same version cannot both commit. The loser re-reads and
//!   retries, or gets [`StaleWrite`](framework::LedgerError::StaleWrite) once retries run out.
//!
//! ### Mocking
//! [`framework::mock::ScriptedStore`] injects concurrent writers and storage failures at
//! exact compare-and-swap calls, so conflict paths are tested deterministically.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Key items**: [`LedgerEntity`](framework::LedgerEntity),
//!   [`ConflictResolver`](framework::ConflictResolver), [`ResourceStore`](framework::ResourceStore).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`HospitalInventory`](lifecycle::HospitalInventory),
//!   [`setup_tracing`](lifecycle::tracing::setup_tracing).
//!
//! ### 3. The Interface ([`clients`], [`api`])
//! Domain clients with typed errors, and the `{ "cantidad": n }` handlers with their
//! status-code mapping.
//!
//! ### 4. The Implementation ([`medication`], [`equipment`], [`prescription`])
//! Concrete resources built on the framework.
//!
//! ## Running the Demo
//!
//! ```bash
//! LEDGER_MAX_RETRIES=5 RUST_LOG=info cargo run
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod equipment;
pub mod framework;
pub mod lifecycle;
pub mod medication;
pub mod model;
pub mod prescription;
