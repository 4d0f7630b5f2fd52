//! Draft phase derivation and turn math.
//!
//! The draft phase is never stored: it is recomputed from the roster every
//! time the roster changes, so a refreshed or lagging client always lands on
//! the same answer as everyone else.

use serde::Serialize;

use crate::entities::players::PlayerRole;

/// Draft progression: linear, no going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    /// At least one captain slot is unfilled.
    CaptainSelect,
    /// Both captains set; unassigned eligible players remain.
    Drafting,
    /// Both captains set; nobody left to draft.
    Complete,
}

/// Roster view sufficient for phase derivation and turn checks.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPlayer {
    pub id: i64,
    pub role: PlayerRole,
    pub team_id: Option<i64>,
    pub is_captain: bool,
}

impl RosterPlayer {
    /// Referees and spectators never participate in the draft; captains are
    /// already on a team.
    pub fn is_draft_eligible(&self) -> bool {
        self.role == PlayerRole::Player && !self.is_captain
    }
}

/// Ids of eligible players not yet bound to a team.
pub fn unassigned_eligible(roster: &[RosterPlayer]) -> Vec<i64> {
    roster
        .iter()
        .filter(|p| p.is_draft_eligible() && p.team_id.is_none())
        .map(|p| p.id)
        .collect()
}

/// Captains present in the roster (at most two by construction).
pub fn captain_ids(roster: &[RosterPlayer]) -> Vec<i64> {
    roster
        .iter()
        .filter(|p| p.is_captain)
        .map(|p| p.id)
        .collect()
}

/// Recompute the draft phase from the roster.
///
/// The degenerate two-player tournament (both players become captains) goes
/// straight from captain-select to complete without ever entering drafting.
pub fn derive_draft_phase(roster: &[RosterPlayer]) -> DraftPhase {
    let captains_set = roster
        .iter()
        .filter(|p| p.is_captain && p.team_id.is_some())
        .count();

    if captains_set < 2 {
        return DraftPhase::CaptainSelect;
    }

    if unassigned_eligible(roster).is_empty() {
        DraftPhase::Complete
    } else {
        DraftPhase::Drafting
    }
}

/// Turn alternation: after a captain picks, the turn passes to the other
/// captain. Returns `None` when `current` is not one of the two captains.
pub fn next_draft_turn(roster: &[RosterPlayer], current: i64) -> Option<i64> {
    let captains = captain_ids(roster);
    if captains.len() != 2 || !captains.contains(&current) {
        return None;
    }
    captains.into_iter().find(|id| *id != current)
}
