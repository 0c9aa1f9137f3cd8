//! Random tile and goal value generation as a function of difficulty.
//!
//! Tiles are kept smaller, on average, than the goal, and the gap widens as
//! difficulty increases: the tile-value ceiling is the goal divided by a
//! divisor that grows with the goal range (capped at +3 extra steps).

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cap on the extra divisor steps gained through progression.
const MAX_PROGRESSION_BONUS: u64 = 3;

/// Monotonically increasing parameter set driving value generation.
///
/// `goal_range` only ever grows (by `goal_expander` per completed goal) and
/// is the one piece of difficulty state that persists across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Upper bound of the goal draw; goals land in `[goal_range/2, goal_range)`
    pub goal_range: u64,
    /// Fixed increment applied per completed goal
    pub goal_expander: u64,
    /// Base divisor for the tile-value ceiling
    pub base_divisor: u64,
    /// Goal-range width per extra divisor step
    pub difficulty_interval: u64,
}

impl Difficulty {
    pub fn new(
        goal_range: u64,
        goal_expander: u64,
        base_divisor: u64,
        difficulty_interval: u64,
    ) -> Self {
        debug_assert!(base_divisor > 0, "divisor must be positive");
        debug_assert!(difficulty_interval > 0, "interval must be positive");
        Self {
            goal_range,
            goal_expander,
            base_divisor,
            difficulty_interval,
        }
    }

    /// Expands the goal range after a completed goal.
    pub fn advance(&mut self) {
        self.goal_range += self.goal_expander;
    }

    /// Divisor applied to the goal when deriving the tile-value ceiling.
    pub fn ceiling_divisor(&self) -> u64 {
        let progression_bonus = (self.goal_range / self.difficulty_interval).min(MAX_PROGRESSION_BONUS);
        self.base_divisor + progression_bonus
    }
}

/// Draws a value for a newly spawned tile, uniform in `[1, max_tile]` where
/// `max_tile = max(1, goal / ceiling_divisor)`.
pub fn random_tile_value(goal: u64, difficulty: &Difficulty, rng: &mut impl Rng) -> u64 {
    let max_tile = (goal / difficulty.ceiling_divisor()).max(1);
    rng.gen_range(1..=max_tile)
}

/// Draws a candidate goal value, uniform in `[goal_range/2, goal_range)`.
///
/// Distinctness from the previous goal is the caller's concern (see
/// [`crate::GoalTracker::reroll`]).
pub fn random_goal_value(difficulty: &Difficulty, rng: &mut impl Rng) -> u64 {
    let low = difficulty.goal_range / 2;
    if low >= difficulty.goal_range {
        // Degenerate range; nothing to draw from.
        return low;
    }
    rng.gen_range(low..difficulty.goal_range)
}
