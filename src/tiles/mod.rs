//! # Tiles Module
//!
//! The numbered game pieces placed on the board, including the transform
//! (mystery) flag and the freeze/burn status effects.
//!
//! Status effects count down in *turns*, where one turn is one global merge
//! event anywhere on the board. A frozen tile with no other board activity
//! stays frozen indefinitely; that coupling is deliberate and covered by
//! tests rather than replaced with time-based decay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for tiles, stable across the presentation boundary.
pub type TileId = Uuid;

/// Creates a new unique tile ID.
pub fn new_tile_id() -> TileId {
    Uuid::new_v4()
}

/// Fraction of a burning tile's value lost per turn.
pub const BURN_DECAY_FRACTION: f64 = 0.25;

/// A numbered tile occupying one board slot.
///
/// # Examples
///
/// ```
/// use tilefuse::Tile;
///
/// let mut tile = Tile::new(100);
/// tile.burn(3);
/// tile.decay_statuses();
/// assert_eq!(tile.value(), 75);
/// assert_eq!(tile.burn_turns_remaining(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identity, referenced by the presentation layer
    pub id: TileId,
    value: u64,
    transform: bool,
    freeze_turns: u32,
    burn_turns: u32,
}

impl Tile {
    /// Creates a tile with the given value and no active statuses.
    pub fn new(value: u64) -> Self {
        Self {
            id: new_tile_id(),
            value,
            transform: false,
            freeze_turns: 0,
            burn_turns: 0,
        }
    }

    /// Current numeric value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Replaces the numeric value (merges, rerolls, burn decay).
    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }

    /// Whether this tile triggers a mystery effect when merged.
    pub fn is_transform(&self) -> bool {
        self.transform
    }

    /// Flags this tile as a mystery (transform) tile.
    pub fn activate_transform(&mut self) {
        self.transform = true;
    }

    /// Clears the transform flag after the effect has been spent.
    pub fn consume_transform(&mut self) {
        self.transform = false;
    }

    /// Whether the tile currently rejects merge participation.
    pub fn is_frozen(&self) -> bool {
        self.freeze_turns > 0
    }

    /// Whether the tile is losing value each turn.
    pub fn is_burning(&self) -> bool {
        self.burn_turns > 0
    }

    pub fn freeze_turns_remaining(&self) -> u32 {
        self.freeze_turns
    }

    pub fn burn_turns_remaining(&self) -> u32 {
        self.burn_turns
    }

    /// Freezes this tile for the given number of turns.
    ///
    /// Reapplying overwrites the remaining count rather than stacking.
    pub fn freeze(&mut self, turns: u32) {
        self.freeze_turns = turns;
    }

    /// Burns this tile for the given number of turns.
    pub fn burn(&mut self, turns: u32) {
        self.burn_turns = turns;
    }

    /// Clears freeze state immediately.
    pub fn clear_freeze(&mut self) {
        self.freeze_turns = 0;
    }

    /// Clears burn state immediately.
    pub fn clear_burn(&mut self) {
        self.burn_turns = 0;
    }

    /// Clears both statuses; used on merge-consumption, goal celebration,
    /// and explicit deletion.
    pub fn clear_statuses(&mut self) {
        self.clear_freeze();
        self.clear_burn();
    }

    /// Advances this tile's statuses by one turn.
    ///
    /// Burn reduces the value by a quarter (rounded, minimum 1 damage) and
    /// floors the result at 1. Counters reaching zero clear the effect.
    pub fn decay_statuses(&mut self) {
        if self.freeze_turns > 0 {
            self.freeze_turns -= 1;
        }

        if self.burn_turns > 0 {
            let damage = ((self.value as f64 * BURN_DECAY_FRACTION).round() as u64).max(1);
            self.value = self.value.saturating_sub(damage).max(1);
            self.burn_turns -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_has_no_statuses() {
        let tile = Tile::new(7);
        assert_eq!(tile.value(), 7);
        assert!(!tile.is_transform());
        assert!(!tile.is_frozen());
        assert!(!tile.is_burning());
    }

    #[test]
    fn test_tile_id_uniqueness() {
        assert_ne!(Tile::new(1).id, Tile::new(1).id);
    }

    #[test]
    fn test_freeze_counts_down_per_turn() {
        let mut tile = Tile::new(10);
        tile.freeze(2);
        assert!(tile.is_frozen());

        tile.decay_statuses();
        assert!(tile.is_frozen());
        assert_eq!(tile.freeze_turns_remaining(), 1);

        tile.decay_statuses();
        assert!(!tile.is_frozen());
    }

    #[test]
    fn test_burn_decay_quarters_value() {
        let mut tile = Tile::new(100);
        tile.burn(1);
        tile.decay_statuses();
        assert_eq!(tile.value(), 75);
        assert!(!tile.is_burning());
    }

    #[test]
    fn test_burn_minimum_damage_is_one() {
        let mut tile = Tile::new(2);
        tile.burn(1);
        tile.decay_statuses();
        // round(2 * 0.25) = 1
        assert_eq!(tile.value(), 1);
    }

    #[test]
    fn test_burn_never_drops_below_one() {
        let mut tile = Tile::new(1);
        tile.burn(5);
        for _ in 0..5 {
            tile.decay_statuses();
        }
        assert_eq!(tile.value(), 1);
        assert!(!tile.is_burning());
    }

    #[test]
    fn test_clear_statuses() {
        let mut tile = Tile::new(10);
        tile.freeze(3);
        tile.burn(3);
        tile.clear_statuses();
        assert!(!tile.is_frozen());
        assert!(!tile.is_burning());
    }

    #[test]
    fn test_transform_consumed_once() {
        let mut tile = Tile::new(10);
        tile.activate_transform();
        assert!(tile.is_transform());
        tile.consume_transform();
        assert!(!tile.is_transform());
    }

    #[test]
    fn test_decay_without_statuses_is_noop() {
        let mut tile = Tile::new(40);
        tile.decay_statuses();
        assert_eq!(tile.value(), 40);
    }
}
