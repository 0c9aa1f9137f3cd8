//! The energy economy: a bounded resource with real-time regeneration and
//! offline catch-up reconstruction.
//!
//! Only the lower bound (0) is hard-enforced. `max` is a soft cap: regen
//! stops there, but rewards may push energy above it. The regen timer wraps
//! by subtracting the interval rather than resetting, so fractional
//! overflow is preserved across ticks.

use serde::{Deserialize, Serialize};

/// Bounded energy resource with a regeneration timer.
///
/// # Examples
///
/// ```
/// use tilefuse::EnergyStore;
///
/// let mut energy = EnergyStore::new(5, 10, 180.0);
/// assert!(energy.try_spend(3));
/// assert_eq!(energy.current(), 2);
/// assert!(!energy.try_spend(5));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyStore {
    current: u32,
    max: u32,
    regen_timer: f32,
    regen_interval: f32,
}

impl EnergyStore {
    /// Creates a store with `start` energy (clamped into `0..=max`).
    pub fn new(start: u32, max: u32, regen_interval_seconds: f32) -> Self {
        debug_assert!(regen_interval_seconds > 0.0, "regen interval must be positive");
        Self {
            current: start.min(max),
            max,
            regen_timer: 0.0,
            regen_interval: regen_interval_seconds,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Seconds accumulated toward the next regeneration tick.
    pub fn regen_timer(&self) -> f32 {
        self.regen_timer
    }

    pub fn regen_interval(&self) -> f32 {
        self.regen_interval
    }

    pub fn has_energy(&self, amount: u32) -> bool {
        self.current >= amount
    }

    /// Spends `amount` if available. On failure nothing is mutated.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if !self.has_energy(amount) {
            return false;
        }
        self.change_energy(-(amount as i64));
        true
    }

    /// Adds `delta`, flooring at 0 with no ceiling. Crossing from below max
    /// to at-or-above max resets the regen timer, keeping the timer UI
    /// consistent.
    pub fn change_energy(&mut self, delta: i64) {
        let previous = self.current;
        self.current = (self.current as i64 + delta).max(0) as u32;
        if previous < self.max && self.current >= self.max {
            self.regen_timer = 0.0;
        }
    }

    /// Sets energy to an exact value, clamped into `0..=max` (load path).
    /// The same timer-reset rule as [`Self::change_energy`] applies.
    pub fn set_energy(&mut self, value: u32) {
        let previous = self.current;
        self.current = value.min(self.max);
        if previous < self.max && self.current >= self.max {
            self.regen_timer = 0.0;
        }
    }

    /// Advances regeneration by `dt` seconds. Returns the energy points
    /// gained, which is 0 while at or above max.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.current >= self.max {
            return 0;
        }
        self.regen_timer += dt;
        let mut gained = 0;
        while self.current < self.max && self.regen_timer >= self.regen_interval {
            self.regen_timer -= self.regen_interval;
            self.change_energy(1);
            gained += 1;
        }
        gained
    }

    /// Reconstructs energy after time spent offline.
    ///
    /// Saved timer progress and elapsed wall-clock seconds combine into one
    /// total; whole intervals become energy points and the remainder
    /// becomes the new timer value.
    pub fn restore_from_offline(&mut self, saved_energy: u32, saved_timer: f32, seconds_elapsed: u64) {
        let total = saved_timer + seconds_elapsed as f32;
        let gained = (total / self.regen_interval) as u32;
        let remaining = total % self.regen_interval;

        self.set_energy(saved_energy.saturating_add(gained));
        self.regen_timer = remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store() -> EnergyStore {
        EnergyStore::new(10, 10, 180.0)
    }

    #[test]
    fn test_try_spend_insufficient_leaves_state_untouched() {
        let mut energy = EnergyStore::new(2, 10, 180.0);
        energy.tick(50.0);
        let timer_before = energy.regen_timer();
        assert!(!energy.try_spend(3));
        assert_eq!(energy.current(), 2);
        assert_eq!(energy.regen_timer(), timer_before);
    }

    #[test]
    fn test_rewards_may_exceed_max() {
        let mut energy = store();
        energy.change_energy(5);
        assert_eq!(energy.current(), 15);
    }

    #[test]
    fn test_floor_at_zero() {
        let mut energy = EnergyStore::new(3, 10, 180.0);
        energy.change_energy(-100);
        assert_eq!(energy.current(), 0);
    }

    #[test]
    fn test_regen_ticks_and_wraps_fractional_overflow() {
        let mut energy = EnergyStore::new(0, 10, 180.0);
        assert_eq!(energy.tick(179.5), 0);
        assert_eq!(energy.tick(1.0), 1);
        assert_eq!(energy.current(), 1);
        // 0.5s of overflow preserved
        assert!((energy.regen_timer() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_no_regen_at_max() {
        let mut energy = store();
        assert_eq!(energy.tick(1000.0), 0);
        assert_eq!(energy.regen_timer(), 0.0);
    }

    #[test]
    fn test_timer_resets_when_reaching_max() {
        let mut energy = EnergyStore::new(9, 10, 180.0);
        energy.tick(100.0);
        assert!(energy.regen_timer() > 0.0);
        energy.change_energy(1);
        assert_eq!(energy.current(), 10);
        assert_eq!(energy.regen_timer(), 0.0);
    }

    #[test]
    fn test_spend_down_then_regen_resumes() {
        let mut energy = store();
        assert!(energy.try_spend(1));
        assert_eq!(energy.current(), 9);
        assert_eq!(energy.tick(180.0), 1);
        assert_eq!(energy.current(), 10);
    }

    #[test]
    fn test_offline_restore_exact_intervals() {
        let mut energy = EnergyStore::new(0, 10, 180.0);
        energy.restore_from_offline(5, 0.0, 540);
        assert_eq!(energy.current(), 8);
        assert_eq!(energy.regen_timer(), 0.0);
    }

    #[test]
    fn test_offline_restore_partial_interval() {
        let mut energy = EnergyStore::new(0, 10, 180.0);
        energy.restore_from_offline(2, 100.0, 200);
        // 300s total = 1 interval + 120s remainder
        assert_eq!(energy.current(), 3);
        assert!((energy.regen_timer() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_offline_restore_clamps_to_max() {
        let mut energy = EnergyStore::new(0, 10, 180.0);
        energy.restore_from_offline(8, 0.0, 180 * 100);
        assert_eq!(energy.current(), 10);
    }

    proptest! {
        /// Energy tracks the clamped model exactly: floor at zero, no
        /// ceiling.
        #[test]
        fn prop_change_energy_matches_clamped_model(deltas in proptest::collection::vec(-50i64..50, 0..64)) {
            let mut energy = EnergyStore::new(5, 10, 180.0);
            let mut model: i64 = 5;
            for delta in deltas {
                energy.change_energy(delta);
                model = (model + delta).max(0);
                prop_assert_eq!(energy.current() as i64, model);
            }
        }

        /// try_spend either succeeds with an exact decrement or mutates
        /// nothing.
        #[test]
        fn prop_try_spend_all_or_nothing(start in 0u32..20, amount in 0u32..20) {
            let mut energy = EnergyStore::new(start, 20, 180.0);
            let before = energy.current();
            let spent = energy.try_spend(amount);
            if spent {
                prop_assert_eq!(energy.current(), before - amount);
            } else {
                prop_assert_eq!(energy.current(), before);
                prop_assert!(before < amount);
            }
        }
    }
}
