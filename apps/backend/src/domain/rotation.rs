//! Pick rotation: which team chooses the next game.
//!
//! `PickState` is derived from game rows plus the persisted tie-break, never
//! stored independently. Round 1's picker comes from the tie-break; for every
//! later round the picking team is the team that did not pick the round
//! before.

use serde::Serialize;

use crate::domain::tiebreak::DiceRoll;

/// A game row reduced to what rotation math needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedGame {
    pub game_type_id: i64,
    pub round_no: i16,
    pub picked_by_team_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RotationPhase {
    /// Round 1, nothing picked, no tie-break recorded yet: every client
    /// renders the synchronized tie-break until a roll is persisted.
    AwaitingTieBreak,
    /// The named team's leader picks for the given round.
    Picking { team_id: i64, round_no: i16 },
    /// All rounds are spoken for; the tournament moves into active play.
    Exhausted,
}

/// Derived rotation snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PickState {
    pub phase: RotationPhase,
    /// Catalog entries not yet bound to a game, in catalog order.
    pub available_game_type_ids: Vec<i64>,
    /// Picks so far, ordered by round.
    pub picked: Vec<PickedGame>,
}

/// Recompute the rotation from rows.
///
/// `teams` is the (team_a, team_b) pair in creation order, matching the
/// stored tie-break's roll order.
pub fn derive_pick_state(
    num_games: i16,
    teams: (i64, i64),
    dice_roll: Option<DiceRoll>,
    mut picked: Vec<PickedGame>,
    catalog: &[i64],
) -> PickState {
    picked.sort_by_key(|g| g.round_no);

    let available_game_type_ids: Vec<i64> = catalog
        .iter()
        .copied()
        .filter(|id| !picked.iter().any(|p| p.game_type_id == *id))
        .collect();

    let next_round = picked.len() as i16 + 1;

    let phase = if next_round > num_games {
        RotationPhase::Exhausted
    } else {
        match dice_roll {
            None => RotationPhase::AwaitingTieBreak,
            Some(roll) => {
                let first = roll.first_pick_team(teams.0, teams.1);
                let other = if first == teams.0 { teams.1 } else { teams.0 };
                // Strict alternation: the picker is whoever did not pick last.
                let team_id = match picked.last() {
                    None => first,
                    Some(last) if last.picked_by_team_id == first => other,
                    Some(_) => first,
                };
                RotationPhase::Picking {
                    team_id,
                    round_no: next_round,
                }
            }
        }
    };

    PickState {
        phase,
        available_game_type_ids,
        picked,
    }
}

impl PickState {
    /// Team whose leader may pick right now, if any.
    pub fn current_pick_team(&self) -> Option<i64> {
        match self.phase {
            RotationPhase::Picking { team_id, .. } => Some(team_id),
            _ => None,
        }
    }

    pub fn current_round(&self) -> Option<i16> {
        match self.phase {
            RotationPhase::Picking { round_no, .. } => Some(round_no),
            _ => None,
        }
    }

    pub fn is_available(&self, game_type_id: i64) -> bool {
        self.available_game_type_ids.contains(&game_type_id)
    }
}
