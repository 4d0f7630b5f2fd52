//! Session recovery by device token.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::debug;

use crate::entities::tournaments::TournamentStatus;
use crate::errors::domain::DomainError;
use crate::repos::games::Game;
use crate::repos::players::Player;
use crate::repos::teams::Team;
use crate::repos::tournaments::Tournament;
use crate::repos::{games, players, teams, tournaments};

/// Everything a recovered client needs to resume mid-tournament.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub tournament: Tournament,
    pub player: Player,
    pub teams: Vec<Team>,
    pub roster: Vec<Player>,
    pub games: Vec<Game>,
}

/// Recovery outcome. `Expired` is terminal and not an error: the client
/// clears its local identity and returns to the start screen. Transport
/// faults propagate as errors instead.
#[derive(Debug, Clone)]
pub enum RecoveredSession {
    Ready(Box<SessionContext>),
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Ready,
    Expired,
}

#[derive(Default)]
pub struct SessionRecoveryService;

impl SessionRecoveryService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a device token to an active identity in the room's tournament.
    ///
    /// `Expired` covers every terminal case: unknown room code, no player row
    /// for this device, or a tournament that already completed.
    pub async fn recover<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        room_code: &str,
        device_token: &str,
    ) -> Result<RecoveredSession, DomainError> {
        let Some(tournament) = tournaments::find_by_room_code(conn, room_code).await? else {
            debug!(room_code, "Recovery: unknown room code");
            return Ok(RecoveredSession::Expired);
        };

        if tournament.status == TournamentStatus::Completed {
            debug!(tournament_id = tournament.id, "Recovery: tournament completed");
            return Ok(RecoveredSession::Expired);
        }

        let Some(player) =
            players::find_by_tournament_and_token(conn, tournament.id, device_token).await?
        else {
            debug!(tournament_id = tournament.id, "Recovery: no identity for device");
            return Ok(RecoveredSession::Expired);
        };

        let teams = teams::list_by_tournament(conn, tournament.id).await?;
        let roster = players::list_by_tournament(conn, tournament.id).await?;
        let games = games::list_by_tournament(conn, tournament.id).await?;

        debug!(
            tournament_id = tournament.id,
            player_id = player.id,
            "Recovery: session ready"
        );

        Ok(RecoveredSession::Ready(Box::new(SessionContext {
            tournament,
            player,
            teams,
            roster,
            games,
        })))
    }
}
