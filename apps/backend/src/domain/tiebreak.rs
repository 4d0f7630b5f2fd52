//! Randomized tie-break for the opening pick.
//!
//! The roll is computed once, persisted on the tournament row, and every
//! client derives the first-picking team from that single stored value. The
//! derivation must be deterministic: recomputing it from a persisted roll
//! always names the same team.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A pair of d6 rolls, one per team. Ties are resolved at roll time by
/// rerolling, so a stored value always has a strict winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub team_a_roll: u8,
    pub team_b_roll: u8,
}

impl DiceRoll {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let team_a_roll = rng.random_range(1..=6);
            let team_b_roll = rng.random_range(1..=6);
            if team_a_roll != team_b_roll {
                return Self {
                    team_a_roll,
                    team_b_roll,
                };
            }
        }
    }

    /// Derive the first-picking team from the stored roll.
    pub fn first_pick_team(&self, team_a_id: i64, team_b_id: i64) -> i64 {
        if self.team_a_roll > self.team_b_roll {
            team_a_id
        } else {
            team_b_id
        }
    }
}
