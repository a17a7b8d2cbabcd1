//! Reference counting between prescriptions and the medications they draw from.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::model::MedicationId;

/// Shared count of open prescriptions per medication.
///
/// Cloning shares the underlying map. The medication client reads it on delete,
/// the prescription client writes it on prescribe and close.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    counts: Arc<DashMap<MedicationId, usize>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more reference and returns the new count.
    pub fn acquire(&self, id: MedicationId) -> usize {
        let mut count = self.counts.entry(id).or_insert(0);
        *count += 1;
        debug!(medication_id = %id, references = *count, "Reference acquired");
        *count
    }

    /// Drops one reference. Returns the remaining count, or `None` if none were held.
    pub fn release(&self, id: MedicationId) -> Option<usize> {
        match self.counts.entry(id) {
            Entry::Vacant(_) => None,
            Entry::Occupied(mut slot) => {
                let remaining = slot.get().saturating_sub(1);
                if remaining == 0 {
                    slot.remove();
                } else {
                    *slot.get_mut() = remaining;
                }
                debug!(medication_id = %id, references = remaining, "Reference released");
                Some(remaining)
            }
        }
    }

    pub fn count(&self, id: &MedicationId) -> usize {
        self.counts.get(id).map(|c| *c).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let registry = ReferenceRegistry::new();
        let id = MedicationId(1);
        assert_eq!(registry.count(&id), 0);

        assert_eq!(registry.acquire(id), 1);
        assert_eq!(registry.acquire(id), 2);
        assert_eq!(registry.release(id), Some(1));
        assert_eq!(registry.release(id), Some(0));
        assert_eq!(registry.count(&id), 0);
        assert_eq!(registry.release(id), None);
    }

    #[test]
    fn test_clones_share_counts() {
        let registry = ReferenceRegistry::new();
        let other = registry.clone();
        registry.acquire(MedicationId(3));
        assert_eq!(other.count(&MedicationId(3)), 1);
        assert_eq!(other.count(&MedicationId(4)), 0);
    }
}
