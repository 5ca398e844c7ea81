//! What an add or remove did to a record, and the notice shown for it.

use crate::model::InventoryItem;

/// Result of [`InventoryService::add`](super::InventoryService::add).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item had no record; one was created with quantity 1.
    Created,
    /// The item existed; its quantity is now `quantity`.
    Incremented { quantity: u32 },
}

/// Result of [`InventoryService::remove`](super::InventoryService::remove).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The last unit was removed and the record deleted.
    Deleted,
    /// One unit was removed; `quantity` units remain.
    Decremented { quantity: u32 },
    /// There was no record; nothing was written.
    Absent,
}

impl AddOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AddOutcome::Created => Some("Item added successfully!"),
            AddOutcome::Incremented { .. } => Some("Item quantity updated successfully!"),
        }
    }
}

impl RemoveOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RemoveOutcome::Deleted => Some("Item removed successfully!"),
            RemoveOutcome::Decremented { .. } => Some("Item quantity decreased successfully!"),
            RemoveOutcome::Absent => None,
        }
    }
}

/// A mutation outcome together with the inventory as listed right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Synced<O> {
    pub outcome: O,
    pub inventory: Vec<InventoryItem>,
}
