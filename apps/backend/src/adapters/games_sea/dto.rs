//! DTOs for the games_sea adapter.

use crate::entities::games::GameStatus;

/// DTO for creating a game row from a pick.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub tournament_id: i64,
    pub game_type_id: i64,
    pub round_no: i16,
    pub picked_by_team_id: i64,
}

/// Unified DTO for updating game fields with optimistic locking.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: i64,
    pub status: Option<GameStatus>,
    pub winning_team_id: Option<i64>,
    pub winner_points: Option<i32>,
    pub loser_points: Option<i32>,
    pub expected_version: i32,
}

impl GameUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            status: None,
            winning_team_id: None,
            winner_points: None,
            loser_points: None,
            expected_version,
        }
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_result(mut self, winning_team_id: i64, winner_points: i32, loser_points: i32) -> Self {
        self.winning_team_id = Some(winning_team_id);
        self.winner_points = Some(winner_points);
        self.loser_points = Some(loser_points);
        self
    }
}
