//! Merge commits, previews, and goal completion handling.

use super::{GameSession, MergeOutcome};
use crate::board::SlotIndex;
use crate::events::GameEvent;
use crate::tiles::{Tile, TileId};
use log::{debug, info};

impl GameSession {
    /// The value a merge would produce, without mutating anything.
    ///
    /// Applies the same doubling rule as the committed merge by peeking at
    /// (not consuming) the double-merge flag; used to show the player the
    /// outcome before they commit.
    pub fn preview_merge(&self, source: TileId, target: TileId) -> Option<u64> {
        let a = self.board.tile(self.board.find_tile(source)?)?.value();
        let b = self.board.tile(self.board.find_tile(target)?)?.value();
        let mut result = self.merge_rule.apply(a, b);
        if self.bonus.is_double_merge_active() {
            result *= 2;
        }
        Some(result)
    }

    /// Commits a merge of `source` onto `target`.
    ///
    /// On success the target tile is consumed, the source tile takes the
    /// merged value and moves into the target's slot, every status counter
    /// on the board advances one turn, the goal is checked, and any
    /// involved transform tile dispatches one random mystery effect.
    /// Rejections (frozen tiles, stale IDs) mutate nothing.
    pub fn merge_tiles(&mut self, source: TileId, target: TileId) -> MergeOutcome {
        if source == target {
            return MergeOutcome::SameTile;
        }
        let Some(source_slot) = self.board.find_tile(source) else {
            return MergeOutcome::TileNotFound;
        };
        let Some(target_slot) = self.board.find_tile(target) else {
            return MergeOutcome::TileNotFound;
        };
        if self.board.tile(source_slot).is_some_and(Tile::is_frozen) {
            return MergeOutcome::SourceFrozen;
        }
        if self.board.tile(target_slot).is_some_and(Tile::is_frozen) {
            return MergeOutcome::TargetFrozen;
        }

        // Consume the losing tile; its statuses and transform flag die
        // with it.
        let Some(consumed) = self.board.clear(target_slot) else {
            return MergeOutcome::TileNotFound;
        };
        let target_transform = consumed.is_transform();

        let Some(mut survivor) = self.board.clear(source_slot) else {
            // Unreachable single-threaded; restore the target and bail.
            let _ = self.board.occupy(target_slot, consumed);
            return MergeOutcome::TileNotFound;
        };
        let transform_involved = survivor.is_transform() || target_transform;
        survivor.clear_burn();

        let mut value = self.merge_rule.apply(survivor.value(), consumed.value());
        if self.bonus.try_consume_double_merge() {
            value *= 2;
            self.emit_inventory_changed();
        }
        survivor.set_value(value);
        let survivor_id = survivor.id;

        let reoccupied = self.board.occupy(target_slot, survivor);
        debug_assert!(reoccupied.is_ok(), "target slot was cleared above");

        debug!(
            "merged tile {source} into slot {target_slot} -> {value} (goal {})",
            self.goal.goal()
        );
        self.emit(GameEvent::TileMerged {
            tile: survivor_id,
            slot: target_slot,
            value,
        });

        // Goal check runs before the turn decay; the survivor enters the
        // check with its burn already cleared.
        let goal_reached = value == self.goal.goal();
        if goal_reached {
            self.complete_goal(target_slot);
            self.goal
                .schedule_rescan(self.config.goal_rescan_delay_seconds);
        }

        // One global turn: any merge anywhere advances every counter.
        self.decay_all_statuses();

        if transform_involved {
            if let Some(slot) = self.board.find_tile(survivor_id) {
                if let Some(tile) = self.board.tile_mut(slot) {
                    tile.consume_transform();
                }
            }
            self.execute_random_effect();
        }

        self.save_or_warn();
        MergeOutcome::Merged {
            tile: survivor_id,
            slot: target_slot,
            value,
            goal_reached,
        }
    }

    /// Consumes a goal-matching tile: advances difficulty, draws a fresh
    /// goal, raises the notification, and grants the energy reward.
    pub(crate) fn complete_goal(&mut self, slot: SlotIndex) {
        let Some(tile) = self.board.clear(slot) else {
            return;
        };
        self.difficulty.advance();
        let new_goal = self.goal.reroll(&self.difficulty, &mut self.rng);
        info!(
            "goal {} reached by tile {}; range now {}, next goal {}",
            tile.value(),
            tile.id,
            self.difficulty.goal_range,
            new_goal
        );
        self.emit(GameEvent::GoalReached {
            tile: tile.id,
            value: tile.value(),
        });
        self.energy
            .change_energy(self.config.energy_reward_on_goal as i64);
        self.emit_energy_changed();
    }

    /// Consumes every tile matching the goal, repeating as fresh goals
    /// themselves match.
    ///
    /// Each pass captures the matches against the goal current at pass
    /// start, so two tiles equal to the same goal are both consumed even
    /// though the first consumption rerolls it. Bounded by board size: each
    /// pass removes at least one tile from consideration.
    pub(crate) fn rescan_board_for_goal(&mut self) {
        let mut consumed_any = false;
        loop {
            let goal = self.goal.goal();
            let matching: Vec<SlotIndex> = self
                .board
                .tiles()
                .filter(|(_, tile)| tile.value() == goal)
                .map(|(slot, _)| slot)
                .collect();
            if matching.is_empty() {
                break;
            }
            for slot in matching {
                self.complete_goal(slot);
                consumed_any = true;
            }
        }
        if consumed_any {
            self.save_or_warn();
        }
    }

    pub(crate) fn decay_all_statuses(&mut self) {
        for (_, tile) in self.board.tiles_mut() {
            tile.decay_statuses();
        }
    }
}
