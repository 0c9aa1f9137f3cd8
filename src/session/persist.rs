//! Snapshot capture and reconstruction: the session side of persistence.

use super::GameSession;
use crate::systems::{SaveData, TileSave};
use crate::tiles::Tile;
use crate::TilefuseResult;
use log::{debug, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl GameSession {
    /// Writes the current state through the snapshot store.
    pub fn save(&mut self) -> TilefuseResult<()> {
        let data = self.snapshot();
        self.store.write(&data)?;
        debug!("saved snapshot: goal {}, {} tiles", data.goal_number, data.tiles.len());
        Ok(())
    }

    /// Best-effort save for paths that must not fail (autosave, post-merge
    /// persistence). Failures are logged, never propagated.
    pub(crate) fn save_or_warn(&mut self) {
        if let Err(err) = self.save() {
            warn!("save failed: {err}");
        }
    }

    fn snapshot(&self) -> SaveData {
        SaveData {
            goal_number: self.goal.goal(),
            goal_range: self.difficulty.goal_range,
            double_merge: self.bonus.is_double_merge_active(),
            mystery_tiles: self.bonus.pending_mystery_tiles(),
            energy: self.energy.current(),
            energy_regen_timer: self.energy.regen_timer(),
            last_save_timestamp: unix_now(),
            music_enabled: self.music_enabled,
            sfx_enabled: self.sfx_enabled,
            tiles: self
                .board
                .tiles()
                .map(|(slot, tile)| TileSave {
                    slot_index: slot,
                    value: tile.value(),
                    transform: tile.is_transform(),
                    freeze_turns: tile.freeze_turns_remaining(),
                    burn_turns: tile.burn_turns_remaining(),
                })
                .collect(),
        }
    }

    /// Restores state from the snapshot store, if a snapshot exists.
    ///
    /// Partial-success semantics: a tile entry referencing a slot outside
    /// the current board, or a slot already occupied, is skipped with a
    /// warning while the rest of the snapshot loads. Energy is
    /// reconstructed with offline catch-up from the saved timestamp.
    pub fn load(&mut self) -> TilefuseResult<bool> {
        let Some(data) = self.store.read()? else {
            return Ok(false);
        };
        info!(
            "loading snapshot: goal {}, range {}, {} tiles",
            data.goal_number,
            data.goal_range,
            data.tiles.len()
        );

        self.goal.set_goal(data.goal_number);
        self.difficulty.goal_range = data.goal_range;

        if data.double_merge && self.bonus.activate_double_merge() {
            self.emit_inventory_changed();
        }
        if data.mystery_tiles > 0 && self.bonus.queue_mystery_tiles(data.mystery_tiles) {
            self.emit_inventory_changed();
        }

        let elapsed = (unix_now() - data.last_save_timestamp).max(0) as u64;
        self.energy
            .restore_from_offline(data.energy, data.energy_regen_timer, elapsed);
        self.emit_energy_changed();

        for entry in &data.tiles {
            if entry.slot_index >= self.board.slot_count() {
                warn!(
                    "snapshot tile references slot {} beyond board of {}; skipping",
                    entry.slot_index,
                    self.board.slot_count()
                );
                continue;
            }
            if self.board.is_occupied(entry.slot_index) {
                warn!("snapshot tile targets occupied slot {}; skipping", entry.slot_index);
                continue;
            }

            let mut tile = Tile::new(entry.value);
            if entry.transform {
                tile.activate_transform();
            }
            if entry.freeze_turns > 0 {
                tile.freeze(entry.freeze_turns);
            }
            if entry.burn_turns > 0 {
                tile.burn(entry.burn_turns);
            }
            let _ = self.board.occupy(entry.slot_index, tile);
        }

        self.music_enabled = data.music_enabled;
        self.sfx_enabled = data.sfx_enabled;
        Ok(true)
    }

    /// Whether a snapshot exists in the store.
    pub fn has_save(&self) -> TilefuseResult<bool> {
        Ok(self.store.read()?.is_some())
    }

    /// Deletes any stored snapshot.
    pub fn delete_save(&mut self) -> TilefuseResult<()> {
        self.store.clear()
    }

    /// Audio settings pass-through: stored in the snapshot, no core logic.
    pub fn set_settings(&mut self, music_enabled: bool, sfx_enabled: bool) {
        self.music_enabled = music_enabled;
        self.sfx_enabled = sfx_enabled;
        self.save_or_warn();
    }
}
