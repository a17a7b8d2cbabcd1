//! # Resource Record
//!
//! A stored resource: its identifier, the current quantity, the optimistic-concurrency
//! version, and the descriptive entity data.

use crate::framework::LedgerEntity;

/// Version assigned to a record when it is first inserted.
pub const INITIAL_VERSION: u64 = 1;

/// A versioned, quantity-carrying wrapper around an entity.
///
/// Records are values: the Delta Applier never mutates one in place, it returns a new
/// record with `version + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord<T: LedgerEntity> {
    pub id: T::Id,
    pub quantity: u64,
    pub version: u64,
    pub entity: T,
}

impl<T: LedgerEntity> ResourceRecord<T> {
    /// Creates a record at [`INITIAL_VERSION`].
    pub fn new(id: T::Id, quantity: u64, entity: T) -> Self {
        Self {
            id,
            quantity,
            version: INITIAL_VERSION,
            entity,
        }
    }

    /// Returns the successor record: same id and entity, new quantity, `version + 1`.
    pub(crate) fn successor(&self, quantity: u64) -> Self {
        Self {
            id: self.id.clone(),
            quantity,
            version: self.version + 1,
            entity: self.entity.clone(),
        }
    }
}
