//! The reward wheel: a shuffled, decelerating spin-wheel state machine.
//!
//! Each activation Fisher-Yates shuffles the reward list before spinning,
//! so the mapping from angular segment to reward is re-randomized per spin.
//! The resolved segment comes from the final accumulated rotation modulo
//! 360 degrees split into equal segments; because every shuffle permutation
//! is equally likely, the reward-kind distribution is uniform regardless of
//! where the wheel stops.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Spin speed draw range.
const MIN_SPIN_SPEED: f32 = 4.0;
const MAX_SPIN_SPEED: f32 = 14.0;

/// Deceleration is steeper above the threshold, shallower below it.
const FAST_DECELERATION: f32 = 6.0;
const SLOW_DECELERATION: f32 = 0.85;
const FAST_DECELERATION_THRESHOLD: f32 = 2.0;

/// Degrees of rotation per second at unit spin speed.
const ROTATION_DEGREES_PER_SPEED: f32 = 100.0;

/// What a wheel segment grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    /// Energy delta of `count`
    Energy,
    /// Burn effect followed by freeze effect
    ElementalChaos,
    /// Arms the double-merge flag
    DoubleMerge,
    /// Queues `count` mystery tiles
    Mystery,
    /// Re-draws every tile value on the board
    Chaos,
    /// No-op
    Nothing,
}

/// One wheel segment: a reward kind, the icon the host should render, and a
/// magnitude where the kind uses one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSlot {
    pub kind: RewardKind,
    pub icon: String,
    pub count: u32,
}

impl RewardSlot {
    pub fn new(kind: RewardKind, icon: impl Into<String>, count: u32) -> Self {
        Self {
            kind,
            icon: icon.into(),
            count,
        }
    }
}

/// Wheel lifecycle. Opening animation is cosmetic and lives in the host;
/// the core goes straight from idle to spinning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelState {
    Idle,
    Spinning,
    Resolved,
    RewardShown,
}

/// Weighted/shuffled reward-selection state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardWheel {
    slots: Vec<RewardSlot>,
    state: WheelState,
    spin_speed: f32,
    rotation: f32,
    resolved_segment: Option<usize>,
}

impl RewardWheel {
    /// Creates an idle wheel over the given reward slots.
    pub fn new(slots: Vec<RewardSlot>) -> Self {
        debug_assert!(!slots.is_empty(), "wheel needs at least one segment");
        Self {
            slots,
            state: WheelState::Idle,
            spin_speed: 0.0,
            rotation: 0.0,
            resolved_segment: None,
        }
    }

    /// The stock six-segment layout.
    pub fn default_layout() -> Self {
        Self::new(vec![
            RewardSlot::new(RewardKind::Energy, "icon_energy", 5),
            RewardSlot::new(RewardKind::DoubleMerge, "icon_double", 1),
            RewardSlot::new(RewardKind::Mystery, "icon_mystery", 1),
            RewardSlot::new(RewardKind::ElementalChaos, "icon_elemental", 1),
            RewardSlot::new(RewardKind::Chaos, "icon_chaos", 1),
            RewardSlot::new(RewardKind::Nothing, "icon_nothing", 0),
        ])
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    /// Whether the wheel is anywhere in its active cycle (not idle).
    pub fn is_active(&self) -> bool {
        self.state != WheelState::Idle
    }

    pub fn is_spinning(&self) -> bool {
        self.state == WheelState::Spinning
    }

    pub fn slots(&self) -> &[RewardSlot] {
        &self.slots
    }

    /// Current accumulated rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn spin_speed(&self) -> f32 {
        self.spin_speed
    }

    pub fn resolved_segment(&self) -> Option<usize> {
        self.resolved_segment
    }

    /// The reward the wheel landed on, once resolved.
    pub fn resolved_reward(&self) -> Option<&RewardSlot> {
        self.resolved_segment.and_then(|i| self.slots.get(i))
    }

    /// Shuffles the rewards and starts spinning at a random speed. Rejected
    /// (returns false) unless the wheel is idle.
    pub fn start_spin(&mut self, rng: &mut impl Rng) -> bool {
        if self.state != WheelState::Idle {
            return false;
        }
        self.slots.shuffle(rng);
        self.spin_speed = rng.gen_range(MIN_SPIN_SPEED..MAX_SPIN_SPEED);
        self.rotation = 0.0;
        self.resolved_segment = None;
        self.state = WheelState::Spinning;
        true
    }

    /// Advances the spin by `dt` seconds. Returns the resolved segment index
    /// on the tick the wheel comes to rest.
    pub fn tick(&mut self, dt: f32) -> Option<usize> {
        if self.state != WheelState::Spinning {
            return None;
        }

        if self.spin_speed > FAST_DECELERATION_THRESHOLD {
            self.spin_speed -= FAST_DECELERATION * dt;
        } else {
            self.spin_speed -= SLOW_DECELERATION * dt;
        }
        self.rotation += ROTATION_DEGREES_PER_SPEED * dt * self.spin_speed;

        if self.spin_speed > 0.0 {
            return None;
        }

        self.spin_speed = 0.0;
        let segment_angle = 360.0 / self.slots.len() as f32;
        let segment =
            ((self.rotation.rem_euclid(360.0) / segment_angle) as usize).min(self.slots.len() - 1);
        self.resolved_segment = Some(segment);
        self.state = WheelState::Resolved;
        Some(segment)
    }

    /// Marks the resolved reward as presented to the player.
    pub fn mark_reward_shown(&mut self) {
        if self.state == WheelState::Resolved {
            self.state = WheelState::RewardShown;
        }
    }

    /// Dismisses the reward and resets the wheel to idle.
    pub fn acknowledge(&mut self) {
        if self.state == WheelState::Resolved || self.state == WheelState::RewardShown {
            self.rotation = 0.0;
            self.spin_speed = 0.0;
            self.resolved_segment = None;
            self.state = WheelState::Idle;
        }
    }
}
