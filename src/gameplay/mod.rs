//! # Gameplay Module
//!
//! Merge rules, number generation, difficulty progression, and goal
//! tracking: the deterministic business logic driving the merge loop.

pub mod goal;
pub mod merge;
pub mod numbers;

pub use goal::*;
pub use merge::*;
pub use numbers::*;
