//! Goal tracking: the target value, distinct re-rolls, and the delayed
//! board re-scan that follows a completed goal.

use crate::gameplay::numbers::{random_goal_value, Difficulty};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Draw attempts before accepting a repeated goal value.
///
/// A re-roll-until-different loop never terminates when the range collapses
/// to a single reachable value; the bounded retry is the explicit escape
/// hatch.
pub const GOAL_REROLL_ATTEMPTS: u32 = 32;

/// Holds the current goal number and the pending re-scan countdown.
///
/// After a goal is reached the board must be re-checked for tiles that
/// already equal the freshly drawn goal; that check runs after a fixed
/// delay, driven by the session tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTracker {
    goal: u64,
    pending_rescan: Option<f32>,
}

impl GoalTracker {
    /// Creates a tracker with an initial goal drawn from the difficulty.
    pub fn new(difficulty: &Difficulty, rng: &mut impl Rng) -> Self {
        Self {
            goal: random_goal_value(difficulty, rng),
            pending_rescan: None,
        }
    }

    /// The current goal number.
    pub fn goal(&self) -> u64 {
        self.goal
    }

    /// Overwrites the goal with a saved value (load path).
    pub fn set_goal(&mut self, value: u64) {
        self.goal = value;
    }

    /// Draws a new goal guaranteed different from the current one, up to
    /// [`GOAL_REROLL_ATTEMPTS`] tries. If every draw repeats (the range
    /// admits only one value), the last draw is accepted.
    pub fn reroll(&mut self, difficulty: &Difficulty, rng: &mut impl Rng) -> u64 {
        let previous = self.goal;
        let mut candidate = previous;
        for _ in 0..GOAL_REROLL_ATTEMPTS {
            candidate = random_goal_value(difficulty, rng);
            if candidate != previous {
                break;
            }
        }
        if candidate == previous {
            warn!(
                "goal range {} admits no distinct value; keeping goal {}",
                difficulty.goal_range, previous
            );
        }
        self.goal = candidate;
        candidate
    }

    /// Schedules a board re-scan after the given delay.
    pub fn schedule_rescan(&mut self, delay_seconds: f32) {
        self.pending_rescan = Some(delay_seconds);
    }

    pub fn rescan_pending(&self) -> bool {
        self.pending_rescan.is_some()
    }

    /// Advances the re-scan countdown; returns true when it fires.
    pub fn tick_rescan(&mut self, dt: f32) -> bool {
        match self.pending_rescan {
            Some(remaining) => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.pending_rescan = None;
                    true
                } else {
                    self.pending_rescan = Some(remaining);
                    false
                }
            }
            None => false,
        }
    }
}
