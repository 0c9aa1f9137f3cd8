//! # Board Module
//!
//! The fixed set of slots and their tile occupancy.
//!
//! A slot holds at most one tile and a tile lives in at most one slot; both
//! invariants are enforced structurally, since the board owns each tile
//! inside its slot. Moving a tile between slots is a `clear` followed by an
//! `occupy`.

use crate::tiles::{Tile, TileId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable index of a board position.
pub type SlotIndex = usize;

/// The slot grid and its occupancy.
///
/// # Examples
///
/// ```
/// use tilefuse::{Board, Tile};
///
/// let mut board = Board::new(4);
/// assert!(board.occupy(0, Tile::new(5)).is_ok());
/// assert!(board.is_occupied(0));
/// board.clear(0);
/// assert!(!board.is_occupied(0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    slots: Vec<Option<Tile>>,
}

impl Board {
    /// Creates an empty board with the given number of slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(|_| None).collect(),
        }
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn tile_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn is_occupied(&self, slot: SlotIndex) -> bool {
        self.slots.get(slot).map(|s| s.is_some()).unwrap_or(false)
    }

    /// The tile placed in a slot, if any.
    pub fn tile(&self, slot: SlotIndex) -> Option<&Tile> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn tile_mut(&mut self, slot: SlotIndex) -> Option<&mut Tile> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// Places a tile into a slot.
    ///
    /// Fails if the slot is already occupied, handing the tile back to the
    /// caller. Double-occupying a slot indicates a core-logic bug, so debug
    /// builds assert.
    pub fn occupy(&mut self, slot: SlotIndex, tile: Tile) -> Result<(), Tile> {
        debug_assert!(slot < self.slots.len(), "slot index out of range");
        match self.slots.get_mut(slot) {
            Some(entry) if entry.is_none() => {
                *entry = Some(tile);
                Ok(())
            }
            _ => Err(tile),
        }
    }

    /// Removes and returns the tile in a slot. Idempotent: clearing an empty
    /// slot returns `None`.
    pub fn clear(&mut self, slot: SlotIndex) -> Option<Tile> {
        self.slots.get_mut(slot).and_then(|s| s.take())
    }

    /// A uniformly random unoccupied slot, or `None` when the board is full.
    pub fn random_free_slot(&self, rng: &mut impl Rng) -> Option<SlotIndex> {
        let free: Vec<SlotIndex> = (0..self.slots.len())
            .filter(|&i| self.slots[i].is_none())
            .collect();
        if free.is_empty() {
            None
        } else {
            Some(free[rng.gen_range(0..free.len())])
        }
    }

    /// Occupied slot indices in slot iteration order.
    pub fn occupied_slots(&self) -> Vec<SlotIndex> {
        (0..self.slots.len())
            .filter(|&i| self.slots[i].is_some())
            .collect()
    }

    /// Iterates over placed tiles in slot order.
    pub fn tiles(&self) -> impl Iterator<Item = (SlotIndex, &Tile)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|t| (i, t)))
    }

    /// Iterates mutably over placed tiles in slot order.
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut Tile)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|t| (i, t)))
    }

    /// Finds the slot currently holding the tile with the given ID.
    pub fn find_tile(&self, id: TileId) -> Option<SlotIndex> {
        self.tiles().find(|(_, t)| t.id == id).map(|(i, _)| i)
    }
}
