//! Consumable one-shot bonuses applied at merge and spawn time.
//!
//! Exactly one committed merge benefits from an active double, and exactly
//! one spawn consumes one queued mystery credit. Mutating methods report
//! whether anything changed so the session can raise inventory-changed
//! notifications without false positives.

use serde::{Deserialize, Serialize};

/// One-shot bonus inventory.
///
/// # Examples
///
/// ```
/// use tilefuse::BonusInventory;
///
/// let mut bonus = BonusInventory::new();
/// bonus.activate_double_merge();
/// assert!(bonus.try_consume_double_merge());
/// assert!(!bonus.try_consume_double_merge());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BonusInventory {
    next_merge_double: bool,
    pending_mystery_tiles: u32,
}

impl BonusInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the double-merge flag. Returns true if it was not already set.
    pub fn activate_double_merge(&mut self) -> bool {
        let changed = !self.next_merge_double;
        self.next_merge_double = true;
        changed
    }

    /// One-shot consumption at merge-commit time: clears the flag and
    /// returns true if it was set.
    pub fn try_consume_double_merge(&mut self) -> bool {
        if !self.next_merge_double {
            return false;
        }
        self.next_merge_double = false;
        true
    }

    /// Read-only peek used by merge previews; does not consume.
    pub fn is_double_merge_active(&self) -> bool {
        self.next_merge_double
    }

    /// Queues `amount` mystery-tile credits. Returns true if the count
    /// changed.
    pub fn queue_mystery_tiles(&mut self, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        self.pending_mystery_tiles += amount;
        true
    }

    /// One-shot decrement at spawn time, guarded by a positive count.
    pub fn try_consume_mystery_tile(&mut self) -> bool {
        if self.pending_mystery_tiles == 0 {
            return false;
        }
        self.pending_mystery_tiles -= 1;
        true
    }

    pub fn has_pending_mystery(&self) -> bool {
        self.pending_mystery_tiles > 0
    }

    pub fn pending_mystery_tiles(&self) -> u32 {
        self.pending_mystery_tiles
    }
}
