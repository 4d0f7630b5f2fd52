//! Tournament flow service: draft, pick rotation, scoring.
//!
//! Split across submodules by phase; shared role and context checks live
//! here. Every mutation validates against freshly loaded rows and lands
//! through a guarded write, so stale callers get a conflict instead of
//! silently clobbering newer state.

use sea_orm::ConnectionTrait;

use crate::entities::players::PlayerRole;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::players::Player;
use crate::repos::players;

mod draft;
mod picks;
mod scoring;

pub use draft::DraftState;
pub use picks::TieBreakOutcome;
pub use scoring::{AdvanceOutcome, RevealState};

#[derive(Default)]
pub struct TournamentFlowService;

impl TournamentFlowService {
    pub fn new() -> Self {
        Self
    }

    /// Load the acting player and check they belong to this tournament.
    pub(super) async fn require_participant<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        tournament_id: i64,
        player_id: i64,
    ) -> Result<Player, DomainError> {
        let player = players::require_player(conn, player_id).await?;
        if player.tournament_id != tournament_id {
            return Err(DomainError::validation(
                ValidationKind::IneligiblePlayer,
                "Player belongs to a different tournament",
            ));
        }
        Ok(player)
    }

    /// Load the acting player and check the referee role.
    pub(super) async fn require_referee<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        tournament_id: i64,
        player_id: i64,
    ) -> Result<Player, DomainError> {
        let player = self.require_participant(conn, tournament_id, player_id).await?;
        if player.role != PlayerRole::Referee {
            return Err(DomainError::validation(
                ValidationKind::NotReferee,
                "Only the referee may do this",
            ));
        }
        Ok(player)
    }
}
