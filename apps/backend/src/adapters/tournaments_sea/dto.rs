//! DTOs for the tournaments_sea adapter.

use crate::entities::tournaments::TournamentStatus;

/// DTO for creating a tournament.
#[derive(Debug, Clone)]
pub struct TournamentCreate {
    pub room_code: String,
    pub num_games: i16,
}

/// Unified DTO for updating tournament fields with optimistic locking.
///
/// All requested changes land atomically with a single version increment.
/// `expected_version` validates that the stored version matches before the
/// update applies.
#[derive(Debug, Clone)]
pub struct TournamentUpdate {
    pub id: i64,
    pub status: Option<TournamentStatus>,
    pub current_round: Option<i16>,
    /// Three-state: None = no change, Some(Some(id)) = set, Some(None) = clear.
    pub draft_turn: Option<Option<i64>>,
    pub draft_pick_number: Option<i32>,
    pub expected_version: i32,
}

impl TournamentUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            status: None,
            current_round: None,
            draft_turn: None,
            draft_pick_number: None,
            expected_version,
        }
    }

    pub fn with_status(mut self, status: TournamentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_current_round(mut self, round: i16) -> Self {
        self.current_round = Some(round);
        self
    }

    pub fn with_draft_turn(mut self, player_id: i64) -> Self {
        self.draft_turn = Some(Some(player_id));
        self
    }

    pub fn clear_draft_turn(mut self) -> Self {
        self.draft_turn = Some(None);
        self
    }

    pub fn with_draft_pick_number(mut self, pick_number: i32) -> Self {
        self.draft_pick_number = Some(pick_number);
        self
    }
}
