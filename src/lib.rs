//! # Tilefuse
//!
//! The gameplay core of a tile-merging number puzzle. A grid of slots holds
//! numbered tiles; merging two tiles combines their values via a selectable
//! merge rule, and merged values that match the current goal number advance
//! difficulty. Around the merge loop sit several supporting systems:
//!
//! - **Energy**: an action-cost economy with real-time regeneration and
//!   offline catch-up reconstruction on load
//! - **Mystery effects**: randomized board-altering effects triggered when a
//!   transform tile participates in a merge
//! - **Reward wheel**: a shuffled, decelerating spin-wheel granting bonuses
//! - **Persistence**: a single snapshot that reconstructs the full board,
//!   including partial timers and turn-based status effects
//!
//! ## Architecture Overview
//!
//! The crate is a pure library with no process boundary: a host presentation
//! shell drives it through [`GameSession`] and observes state changes either
//! by subscribing to the session's event bus or by polling raised events.
//! All state transitions run on one logical update thread; time-based
//! behaviors are advanced through an explicit elapsed-time `tick`.
//!
//! ```
//! use tilefuse::{GameConfig, GameSession, MemorySnapshotStore};
//!
//! let config = GameConfig::for_testing(42);
//! let mut session = GameSession::new(config, Box::new(MemorySnapshotStore::new()));
//! session.generate_tile();
//! session.tick(0.016);
//! ```

pub mod board;
pub mod events;
pub mod gameplay;
pub mod mystery;
pub mod session;
pub mod systems;
pub mod tiles;

pub use board::{Board, SlotIndex};
pub use events::{EventBus, GameEvent, SubscriptionId};
pub use gameplay::{Difficulty, GoalTracker, MergeRule};
pub use mystery::MysteryEffect;
pub use session::{GameConfig, GameSession, GenerateOutcome, MergeOutcome};
pub use systems::{
    BonusInventory, EnergyStore, FileSnapshotStore, MemorySnapshotStore, RewardKind, RewardSlot,
    RewardWheel, SaveData, SnapshotStore, TileSave, WheelState,
};
pub use tiles::{new_tile_id, Tile, TileId};

/// Core error type for the Tilefuse game engine.
///
/// Capacity failures (no free slot, not enough energy) and invalid merge
/// targets are not errors; they are reported through outcome enums so the
/// host can react without unwinding. Errors are reserved for persistence
/// I/O and serialization problems.
#[derive(thiserror::Error, Debug)]
pub enum TilefuseError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Result type used throughout the Tilefuse codebase.
pub type TilefuseResult<T> = Result<T, TilefuseError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default number of board slots (5 rows x 4 columns)
    pub const DEFAULT_SLOT_COUNT: usize = 20;

    /// Default starting energy
    pub const DEFAULT_START_ENERGY: u32 = 10;

    /// Default energy capacity
    pub const DEFAULT_MAX_ENERGY: u32 = 10;

    /// Seconds per regenerated energy point
    pub const DEFAULT_REGEN_INTERVAL_SECONDS: f32 = 180.0;

    /// Energy cost of generating one tile
    pub const DEFAULT_ENERGY_COST_PER_TILE: u32 = 1;

    /// Energy granted when a goal is reached
    pub const DEFAULT_ENERGY_REWARD_ON_GOAL: u32 = 5;

    /// Chance that a tile generation opens the reward wheel instead
    pub const DEFAULT_WHEEL_TRIGGER_CHANCE: f64 = 0.07;

    /// Chance that a generated tile spawns as a mystery (transform) tile
    pub const DEFAULT_MYSTERY_TILE_CHANCE: f64 = 0.05;

    /// Initial width of the goal number range
    pub const DEFAULT_INITIAL_GOAL_RANGE: u64 = 20;

    /// Goal range growth per completed goal
    pub const DEFAULT_GOAL_RANGE_EXPANDER: u64 = 10;

    /// Base divisor for the tile-value ceiling relative to the goal
    pub const DEFAULT_BASE_DIFFICULTY_DIVISOR: u64 = 2;

    /// Goal-range width per extra divisor step (capped at +3 steps)
    pub const DEFAULT_DIFFICULTY_INCREASE_INTERVAL: u64 = 100;

    /// Delay before re-scanning the board for tiles matching a fresh goal
    pub const DEFAULT_GOAL_RESCAN_DELAY_SECONDS: f32 = 1.0;

    /// Periodic autosave interval
    pub const DEFAULT_AUTOSAVE_INTERVAL_SECONDS: f32 = 30.0;
}
