//! Mystery effect execution and wheel reward application.
//!
//! Effects run synchronously against the session's own state, so each one
//! observes a fully applied board; no effect ever sees a partially applied
//! sibling.

use super::GameSession;
use crate::events::GameEvent;
use crate::gameplay::random_tile_value;
use crate::mystery::MysteryEffect;
use crate::systems::RewardKind;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

/// How many tiles a freeze or burn effect touches.
const STATUS_TARGET_RANGE: RangeInclusive<usize> = 1..=3;

/// Turn ranges drawn per affected tile.
const FREEZE_TURNS_RANGE: RangeInclusive<u32> = 1..=6;
const BURN_TURNS_RANGE: RangeInclusive<u32> = 2..=6;

/// Spawn count range for the spawn effect.
const SPAWN_COUNT_RANGE: RangeInclusive<u32> = 1..=4;

impl GameSession {
    /// Picks one mystery effect uniformly and runs it.
    pub fn execute_random_effect(&mut self) -> MysteryEffect {
        let effect = MysteryEffect::random(&mut self.rng);
        debug!("mystery effect drawn: {effect:?}");
        self.execute_effect(effect);
        effect
    }

    /// Runs a specific mystery effect against the board.
    pub fn execute_effect(&mut self, effect: MysteryEffect) {
        match effect {
            MysteryEffect::DeleteRandomTile => {
                let occupied = self.board.occupied_slots();
                if occupied.is_empty() {
                    return;
                }
                let slot = occupied[self.rng.gen_range(0..occupied.len())];
                if let Some(tile) = self.board.clear(slot) {
                    debug!("deleted tile {} from slot {slot}", tile.id);
                }
            }
            MysteryEffect::SpawnRandomTiles => {
                let count = self.rng.gen_range(SPAWN_COUNT_RANGE);
                for _ in 0..count {
                    if self.spawn_tile_in_random_slot(false).is_none() {
                        break;
                    }
                }
            }
            MysteryEffect::SpawnMysteryTile => {
                self.spawn_tile_in_random_slot(true);
            }
            MysteryEffect::TriggerWheelSpin => {
                // No-op when the wheel is already active.
                self.request_wheel_spin();
            }
            MysteryEffect::RerollRandomTiles => {
                let mut occupied = self.board.occupied_slots();
                if occupied.is_empty() {
                    return;
                }
                occupied.shuffle(&mut self.rng);
                let count = self.rng.gen_range(1..=occupied.len());
                let goal = self.goal.goal();
                for &slot in occupied.iter().take(count) {
                    let value = random_tile_value(goal, &self.difficulty, &mut self.rng);
                    if let Some(tile) = self.board.tile_mut(slot) {
                        tile.set_value(value);
                    }
                }
            }
            MysteryEffect::FreezeRandomTiles => {
                self.scatter_status(FREEZE_TURNS_RANGE, true);
            }
            MysteryEffect::BurnRandomTiles => {
                self.scatter_status(BURN_TURNS_RANGE, false);
            }
        }
    }

    /// Freezes or burns 1-3 distinct random tiles, drawing turn counts
    /// independently per tile.
    fn scatter_status(&mut self, turns_range: RangeInclusive<u32>, freeze: bool) {
        let mut occupied = self.board.occupied_slots();
        if occupied.is_empty() {
            return;
        }
        occupied.shuffle(&mut self.rng);
        let count = self.rng.gen_range(STATUS_TARGET_RANGE).min(occupied.len());
        for &slot in occupied.iter().take(count) {
            let turns = self.rng.gen_range(turns_range.clone());
            if let Some(tile) = self.board.tile_mut(slot) {
                if freeze {
                    tile.freeze(turns);
                } else {
                    tile.burn(turns);
                }
            }
        }
    }

    /// Re-draws the value of every tile on the board (the "chaos" reward).
    pub(crate) fn reroll_all_tiles(&mut self) {
        let goal = self.goal.goal();
        let GameSession {
            board,
            difficulty,
            rng,
            ..
        } = self;
        for (_, tile) in board.tiles_mut() {
            tile.set_value(random_tile_value(goal, difficulty, &mut *rng));
        }
    }

    /// Applies the reward the wheel resolved to and moves it to the
    /// reward-shown state.
    pub(crate) fn apply_wheel_reward(&mut self, segment: usize) {
        let Some(reward) = self.wheel.resolved_reward().cloned() else {
            debug_assert!(false, "wheel resolved without a reward at segment {segment}");
            return;
        };
        debug!("wheel resolved segment {segment}: {:?} x{}", reward.kind, reward.count);

        match reward.kind {
            RewardKind::Energy => {
                self.energy.change_energy(reward.count as i64);
                self.emit_energy_changed();
            }
            RewardKind::DoubleMerge => {
                if self.bonus.activate_double_merge() {
                    self.emit_inventory_changed();
                }
            }
            RewardKind::Mystery => {
                if self.bonus.queue_mystery_tiles(reward.count) {
                    self.emit_inventory_changed();
                }
            }
            RewardKind::ElementalChaos => {
                self.execute_effect(MysteryEffect::BurnRandomTiles);
                self.execute_effect(MysteryEffect::FreezeRandomTiles);
            }
            RewardKind::Chaos => {
                self.reroll_all_tiles();
            }
            RewardKind::Nothing => {}
        }

        self.emit(GameEvent::WheelRewardGranted {
            kind: reward.kind,
            count: reward.count,
        });
        self.wheel.mark_reward_shown();
        self.save_or_warn();
    }
}
