//! # Delta Applier
//!
//! Pure functions that turn a record plus an adjustment into the successor record.
//! Nothing here touches storage; the [`ConflictResolver`](crate::framework::ConflictResolver)
//! decides whether the successor gets written.

use crate::framework::{LedgerEntity, LedgerError, ResourceRecord};

/// Applies a signed delta.
///
/// Succeeds iff `record.quantity + delta >= 0`. A zero delta is a valid commit and still
/// bumps the version. Applying the same delta twice adjusts twice.
pub fn apply<T: LedgerEntity>(
    record: &ResourceRecord<T>,
    delta: i64,
) -> Result<ResourceRecord<T>, LedgerError> {
    let magnitude = delta.unsigned_abs();
    let quantity = if delta >= 0 {
        record
            .quantity
            .checked_add(magnitude)
            .ok_or_else(|| LedgerError::QuantityOverflow {
                id: record.id.to_string(),
                current: record.quantity,
                delta,
            })?
    } else {
        record
            .quantity
            .checked_sub(magnitude)
            .ok_or_else(|| LedgerError::InsufficientQuantity {
                id: record.id.to_string(),
                current: record.quantity,
                delta,
            })?
    };
    Ok(record.successor(quantity))
}

/// Sets the quantity to an absolute target. Idempotent in value, but still a new version.
pub fn set_absolute<T: LedgerEntity>(
    record: &ResourceRecord<T>,
    target: i64,
) -> Result<ResourceRecord<T>, LedgerError> {
    let quantity = u64::try_from(target).map_err(|_| LedgerError::NegativeTarget {
        id: record.id.to_string(),
        target,
    })?;
    Ok(record.successor(quantity))
}
