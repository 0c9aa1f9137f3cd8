//! Tile generation: the player-facing pipeline and the raw spawn helper
//! shared with mystery effects.

use super::{GameSession, GenerateOutcome};
use crate::board::SlotIndex;
use crate::events::GameEvent;
use crate::gameplay::random_tile_value;
use crate::tiles::{Tile, TileId};
use log::debug;
use rand::Rng;

impl GameSession {
    /// Handles a tile-generation request from the host.
    ///
    /// Requires a free slot and spends the per-tile energy cost. The
    /// energy is spent before the wheel-trigger roll, so a triggered wheel
    /// replaces the spawn rather than refunding it. The spawned tile
    /// becomes a mystery tile when a queued credit is consumed or the
    /// mystery chance roll hits.
    pub fn generate_tile(&mut self) -> GenerateOutcome {
        if self.board.is_full() {
            return GenerateOutcome::BoardFull;
        }
        if !self.energy.try_spend(self.config.energy_cost_per_tile) {
            return GenerateOutcome::InsufficientEnergy;
        }
        self.emit_energy_changed();

        if self.rng.gen::<f64>() <= self.config.wheel_trigger_chance && self.request_wheel_spin() {
            self.save_or_warn();
            return GenerateOutcome::WheelTriggered;
        }

        let mut mystery = self.bonus.try_consume_mystery_tile();
        if mystery {
            self.emit_inventory_changed();
        } else {
            mystery = self.rng.gen::<f64>() <= self.config.mystery_tile_chance;
        }

        match self.spawn_tile_in_random_slot(mystery) {
            Some((slot, tile)) => {
                self.save_or_warn();
                GenerateOutcome::Spawned { tile, slot }
            }
            // Free slot was verified above; kept for completeness.
            None => GenerateOutcome::BoardFull,
        }
    }

    /// Spawns a tile into a random free slot without energy cost or wheel
    /// roll. Used by mystery effects and the generation pipeline.
    pub(crate) fn spawn_tile_in_random_slot(
        &mut self,
        mystery: bool,
    ) -> Option<(SlotIndex, TileId)> {
        let slot = self.board.random_free_slot(&mut self.rng)?;
        let value = random_tile_value(self.goal.goal(), &self.difficulty, &mut self.rng);

        let mut tile = Tile::new(value);
        if mystery {
            tile.activate_transform();
        }
        let id = tile.id;

        if self.board.occupy(slot, tile).is_err() {
            return None;
        }
        debug!("spawned tile {id} value {value} in slot {slot} (mystery: {mystery})");
        self.emit(GameEvent::TileGenerated {
            tile: id,
            slot,
            value,
            transform: mystery,
        });
        Some((slot, id))
    }

    /// Places a prepared tile into a specific slot, bypassing energy cost
    /// and chance rolls. Fails if the slot is occupied or out of range.
    /// Intended for host-side setup surfaces (tutorials, debug tools).
    pub fn place_tile(&mut self, slot: SlotIndex, tile: Tile) -> bool {
        if slot >= self.board.slot_count() || self.board.is_occupied(slot) {
            return false;
        }
        let (id, value, transform) = (tile.id, tile.value(), tile.is_transform());
        if self.board.occupy(slot, tile).is_err() {
            return false;
        }
        self.emit(GameEvent::TileGenerated {
            tile: id,
            slot,
            value,
            transform,
        });
        self.save_or_warn();
        true
    }
}
