//! # Session Module
//!
//! The single-threaded coordinator wiring every subsystem together.
//!
//! [`GameSession`] is the crate's entry point: the host presentation shell
//! feeds it input requests (generate, merge, spin) and an elapsed-time
//! `tick`, and observes results through the event bus or by polling raised
//! events. Components receive their collaborators explicitly through the
//! session rather than through process-wide singletons, so tests can build
//! sessions around fakes.

mod effects;
mod merge;
mod persist;
mod spawn;

use crate::board::{Board, SlotIndex};
use crate::config;
use crate::events::{EventBus, GameEvent, SubscriptionId};
use crate::gameplay::{Difficulty, GoalTracker, MergeRule};
use crate::systems::{BonusInventory, EnergyStore, RewardWheel, SnapshotStore};
use crate::tiles::TileId;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Tunable parameters for a game session.
///
/// # Examples
///
/// ```
/// use tilefuse::GameConfig;
///
/// let config = GameConfig::new(12345);
/// assert_eq!(config.max_energy, 10);
/// assert!(config.wheel_trigger_chance > 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Random seed for reproducible sessions
    pub seed: u64,
    /// Number of board slots
    pub slot_count: usize,
    /// Energy at session start
    pub start_energy: u32,
    /// Soft energy cap; regeneration stops here
    pub max_energy: u32,
    /// Seconds per regenerated energy point
    pub regen_interval_seconds: f32,
    /// Energy cost of generating one tile
    pub energy_cost_per_tile: u32,
    /// Energy granted when a goal is reached
    pub energy_reward_on_goal: u32,
    /// Chance that a generation request opens the reward wheel instead
    pub wheel_trigger_chance: f64,
    /// Chance that a generated tile spawns as a mystery tile
    pub mystery_tile_chance: f64,
    /// Initial goal range width
    pub initial_goal_range: u64,
    /// Goal range growth per completed goal
    pub goal_range_expander: u64,
    /// Base divisor for the tile-value ceiling
    pub base_difficulty_divisor: u64,
    /// Goal-range width per extra divisor step
    pub difficulty_increase_interval: u64,
    /// Delay before the post-goal board re-scan
    pub goal_rescan_delay_seconds: f32,
    /// Periodic autosave interval
    pub autosave_interval_seconds: f32,
}

impl GameConfig {
    /// Creates the default configuration with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            slot_count: config::DEFAULT_SLOT_COUNT,
            start_energy: config::DEFAULT_START_ENERGY,
            max_energy: config::DEFAULT_MAX_ENERGY,
            regen_interval_seconds: config::DEFAULT_REGEN_INTERVAL_SECONDS,
            energy_cost_per_tile: config::DEFAULT_ENERGY_COST_PER_TILE,
            energy_reward_on_goal: config::DEFAULT_ENERGY_REWARD_ON_GOAL,
            wheel_trigger_chance: config::DEFAULT_WHEEL_TRIGGER_CHANCE,
            mystery_tile_chance: config::DEFAULT_MYSTERY_TILE_CHANCE,
            initial_goal_range: config::DEFAULT_INITIAL_GOAL_RANGE,
            goal_range_expander: config::DEFAULT_GOAL_RANGE_EXPANDER,
            base_difficulty_divisor: config::DEFAULT_BASE_DIFFICULTY_DIVISOR,
            difficulty_increase_interval: config::DEFAULT_DIFFICULTY_INCREASE_INTERVAL,
            goal_rescan_delay_seconds: config::DEFAULT_GOAL_RESCAN_DELAY_SECONDS,
            autosave_interval_seconds: config::DEFAULT_AUTOSAVE_INTERVAL_SECONDS,
        }
    }

    /// Deterministic configuration for tests: a small board, no chance
    /// rolls, and an immediate goal re-scan.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            slot_count: 8,
            wheel_trigger_chance: 0.0,
            mystery_tile_chance: 0.0,
            goal_rescan_delay_seconds: 0.0,
            ..Self::new(seed)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Result of a tile-generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A tile was spawned
    Spawned { tile: TileId, slot: SlotIndex },
    /// The chance roll opened the reward wheel instead of spawning
    WheelTriggered,
    /// No free slot available
    BoardFull,
    /// Not enough energy; nothing was mutated
    InsufficientEnergy,
}

/// Result of a merge request. Rejections leave all state untouched so the
/// initiating tile simply snaps back on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merge committed; `tile` survives in `slot` with `value`
    Merged {
        tile: TileId,
        slot: SlotIndex,
        value: u64,
        goal_reached: bool,
    },
    /// The dragged tile is frozen and cannot initiate a merge
    SourceFrozen,
    /// The target tile is frozen and cannot be consumed
    TargetFrozen,
    /// One of the referenced tiles is no longer on the board
    TileNotFound,
    /// A tile cannot merge with itself
    SameTile,
}

/// The gameplay state machine and its supporting subsystems.
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) merge_rule: MergeRule,
    pub(crate) difficulty: Difficulty,
    pub(crate) goal: GoalTracker,
    pub(crate) bonus: BonusInventory,
    pub(crate) energy: EnergyStore,
    pub(crate) wheel: RewardWheel,
    pub(crate) bus: EventBus,
    pub(crate) pending_events: Vec<GameEvent>,
    pub(crate) store: Box<dyn SnapshotStore>,
    pub(crate) rng: StdRng,
    pub(crate) autosave_timer: f32,
    pub(crate) music_enabled: bool,
    pub(crate) sfx_enabled: bool,
}

impl GameSession {
    /// Creates a fresh session with an initial goal drawn from the seed.
    pub fn new(config: GameConfig, store: Box<dyn SnapshotStore>) -> Self {
        debug_assert!(config.slot_count > 0, "board needs at least one slot");
        let mut rng = StdRng::seed_from_u64(config.seed);
        let difficulty = Difficulty::new(
            config.initial_goal_range,
            config.goal_range_expander,
            config.base_difficulty_divisor,
            config.difficulty_increase_interval,
        );
        let goal = GoalTracker::new(&difficulty, &mut rng);
        info!(
            "starting session v{} with seed {} and goal {}",
            crate::VERSION,
            config.seed,
            goal.goal()
        );

        Self {
            board: Board::new(config.slot_count),
            merge_rule: MergeRule::default(),
            energy: EnergyStore::new(
                config.start_energy,
                config.max_energy,
                config.regen_interval_seconds,
            ),
            wheel: RewardWheel::default_layout(),
            bus: EventBus::new(),
            pending_events: Vec::new(),
            store,
            rng,
            autosave_timer: 0.0,
            music_enabled: true,
            sfx_enabled: true,
            difficulty,
            goal,
            bonus: BonusInventory::new(),
            config,
        }
    }

    /// Replaces the stock wheel layout; useful for hosts with custom
    /// reward sets.
    pub fn with_wheel(mut self, wheel: RewardWheel) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn goal_number(&self) -> u64 {
        self.goal.goal()
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn energy(&self) -> &EnergyStore {
        &self.energy
    }

    pub fn bonus(&self) -> &BonusInventory {
        &self.bonus
    }

    pub fn wheel(&self) -> &RewardWheel {
        &self.wheel
    }

    pub fn merge_rule(&self) -> MergeRule {
        self.merge_rule
    }

    /// Selects the active merge rule. In-session only; not persisted.
    pub fn set_merge_rule(&mut self, rule: MergeRule) {
        self.merge_rule = rule;
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn sfx_enabled(&self) -> bool {
        self.sfx_enabled
    }

    /// Registers an observer for every event the session raises.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Drains events raised since the last poll, in order.
    pub fn poll_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Arms the double-merge bonus; shop and reward surfaces call this.
    pub fn activate_double_merge(&mut self) {
        if self.bonus.activate_double_merge() {
            self.emit_inventory_changed();
            self.save_or_warn();
        }
    }

    /// Queues mystery-tile credits consumed by future spawns.
    pub fn queue_mystery_tiles(&mut self, amount: u32) {
        if self.bonus.queue_mystery_tiles(amount) {
            self.emit_inventory_changed();
            self.save_or_warn();
        }
    }

    /// Starts a wheel spin. Rejected while the wheel is already active.
    pub fn request_wheel_spin(&mut self) -> bool {
        let started = self.wheel.start_spin(&mut self.rng);
        if started {
            debug!("wheel spin started at speed {:.2}", self.wheel.spin_speed());
        }
        started
    }

    /// Dismisses a shown wheel reward, returning the wheel to idle.
    pub fn acknowledge_wheel_reward(&mut self) {
        self.wheel.acknowledge();
    }

    /// Advances all time-based behaviors by `dt` seconds: energy
    /// regeneration, wheel deceleration and resolution, the pending
    /// post-goal re-scan, and the autosave timer.
    pub fn tick(&mut self, dt: f32) {
        let gained = self.energy.tick(dt);
        if gained > 0 {
            debug!("regenerated {gained} energy");
            self.emit_energy_changed();
        }

        if let Some(segment) = self.wheel.tick(dt) {
            self.apply_wheel_reward(segment);
        }

        if self.goal.tick_rescan(dt) {
            self.rescan_board_for_goal();
        }

        self.autosave_timer += dt;
        if self.autosave_timer >= self.config.autosave_interval_seconds {
            self.autosave_timer = 0.0;
            self.save_or_warn();
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.bus.publish(&event);
        self.pending_events.push(event);
    }

    pub(crate) fn emit_energy_changed(&mut self) {
        let (current, max) = (self.energy.current(), self.energy.max());
        self.emit(GameEvent::EnergyChanged { current, max });
    }

    pub(crate) fn emit_inventory_changed(&mut self) {
        let event = GameEvent::InventoryChanged {
            double_merge: self.bonus.is_double_merge_active(),
            pending_mystery_tiles: self.bonus.pending_mystery_tiles(),
        };
        self.emit(event);
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("goal", &self.goal.goal())
            .field("tiles", &self.board.tile_count())
            .field("energy", &self.energy.current())
            .field("wheel", &self.wheel.state())
            .finish()
    }
}
