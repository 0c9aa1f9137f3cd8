//! # Mystery Module
//!
//! The fixed set of randomized board-altering effects triggered when a
//! transform (mystery) tile participates in a merge.
//!
//! The effect set is closed, so effects are a plain enum; execution lives on
//! [`crate::GameSession`], which owns every collaborator an effect can touch
//! (board, statuses, number generation, the reward wheel). Effects run
//! synchronously and atomically with respect to board state.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A randomized board-altering effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MysteryEffect {
    /// Remove one random tile from the board
    DeleteRandomTile,
    /// Spawn 1-4 random tiles, stopping early if the board fills
    SpawnRandomTiles,
    /// Spawn one transform tile
    SpawnMysteryTile,
    /// Open the reward wheel (no-op while it is already active)
    TriggerWheelSpin,
    /// Re-draw the values of 1..=N random tiles (N = current tile count)
    RerollRandomTiles,
    /// Freeze 1-3 random tiles for 1-6 turns each
    FreezeRandomTiles,
    /// Burn 1-3 random tiles for 2-6 turns each
    BurnRandomTiles,
}

impl MysteryEffect {
    /// Every registered effect, in dispatch-table order.
    pub const ALL: [MysteryEffect; 7] = [
        MysteryEffect::DeleteRandomTile,
        MysteryEffect::SpawnRandomTiles,
        MysteryEffect::SpawnMysteryTile,
        MysteryEffect::TriggerWheelSpin,
        MysteryEffect::RerollRandomTiles,
        MysteryEffect::FreezeRandomTiles,
        MysteryEffect::BurnRandomTiles,
    ];

    /// Picks one effect uniformly at random.
    pub fn random(rng: &mut impl Rng) -> MysteryEffect {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_covers_every_effect() {
        let mut rng = StdRng::seed_from_u64(21);
        let drawn: HashSet<MysteryEffect> =
            (0..500).map(|_| MysteryEffect::random(&mut rng)).collect();
        assert_eq!(drawn.len(), MysteryEffect::ALL.len());
    }
}
