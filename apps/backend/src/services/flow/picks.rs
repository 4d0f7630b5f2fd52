//! Pick rotation: tie-break, game picks, custom catalog entries.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::{debug, info};

use super::TournamentFlowService;
use crate::domain::rotation::{self, PickState, RotationPhase};
use crate::domain::tiebreak::DiceRoll;
use crate::entities::players::PlayerRole;
use crate::entities::tournaments::TournamentStatus;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{Game, GameCreate};
use crate::repos::tournaments::Tournament;
use crate::repos::{game_types, games, teams, tournaments};

/// Tie-break result plus the team it hands the opening pick to.
#[derive(Debug, Clone, Serialize)]
pub struct TieBreakOutcome {
    pub roll: DiceRoll,
    pub first_pick_team_id: i64,
    /// True only for the caller whose roll was persisted.
    pub newly_rolled: bool,
}

impl TournamentFlowService {
    /// Roll the opening-pick tie-break, first writer wins.
    ///
    /// Every caller leaves with the persisted roll; racing callers simply
    /// read back the winner's value, so all clients derive the same first
    /// picker.
    pub async fn roll_tiebreak(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: i64,
        acting_player_id: i64,
    ) -> Result<TieBreakOutcome, DomainError> {
        let acting = self
            .require_participant(txn, tournament_id, acting_player_id)
            .await?;
        if acting.role == PlayerRole::Spectator {
            return Err(DomainError::validation(
                ValidationKind::IneligiblePlayer,
                "Spectators do not roll",
            ));
        }

        let tournament = require_playing(txn, tournament_id).await?;

        if let Some(existing) = tournament.dice_roll {
            let (team_a, team_b) = teams::require_pair(txn, tournament_id).await?;
            return Ok(TieBreakOutcome {
                roll: existing,
                first_pick_team_id: existing.first_pick_team(team_a.id, team_b.id),
                newly_rolled: false,
            });
        }

        let roll = DiceRoll::roll(&mut rand::rng());
        let (stored, wrote) = tournaments::set_dice_roll_once(txn, tournament_id, roll).await?;
        let authoritative = stored.dice_roll.ok_or_else(|| {
            DomainError::infra(
                crate::errors::domain::InfraErrorKind::DataCorruption,
                "Tie-break vanished after write",
            )
        })?;

        let (team_a, team_b) = teams::require_pair(txn, tournament_id).await?;
        let first_pick_team_id = authoritative.first_pick_team(team_a.id, team_b.id);

        info!(
            tournament_id,
            first_pick_team_id, newly_rolled = wrote, "Tie-break resolved"
        );

        Ok(TieBreakOutcome {
            roll: authoritative,
            first_pick_team_id,
            newly_rolled: wrote,
        })
    }

    /// Derived rotation snapshot: current picker, round, available catalog.
    pub async fn pick_state<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        tournament_id: i64,
    ) -> Result<PickState, DomainError> {
        let tournament = tournaments::require_tournament(conn, tournament_id).await?;
        let (team_a, team_b) = teams::require_pair(conn, tournament_id).await?;
        let game_rows = games::list_by_tournament(conn, tournament_id).await?;
        let catalog: Vec<i64> = game_types::list_by_tournament(conn, tournament_id)
            .await?
            .iter()
            .map(|gt| gt.id)
            .collect();

        Ok(rotation::derive_pick_state(
            tournament.num_games,
            (team_a.id, team_b.id),
            tournament.dice_roll,
            game_rows.iter().map(Game::as_picked_game).collect(),
            &catalog,
        ))
    }

    /// The current picking team's leader binds a catalog entry to the round.
    ///
    /// Double picks lose at the persistence layer: the unique indexes on
    /// (tournament, game type) and (tournament, round) turn the race loser's
    /// insert into a PickTaken conflict.
    pub async fn pick_game(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: i64,
        acting_player_id: i64,
        game_type_id: i64,
    ) -> Result<Game, DomainError> {
        let acting = self
            .require_participant(txn, tournament_id, acting_player_id)
            .await?;
        require_playing(txn, tournament_id).await?;

        let state = self.pick_state(txn, tournament_id).await?;
        let (team_id, round_no) = match state.phase {
            RotationPhase::Picking { team_id, round_no } => (team_id, round_no),
            RotationPhase::AwaitingTieBreak => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "Tie-break has not been rolled",
                ));
            }
            RotationPhase::Exhausted => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "All rounds are picked",
                ));
            }
        };

        if acting.team_id != Some(team_id) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "It is the other team's pick",
            ));
        }
        if !acting.is_leader {
            return Err(DomainError::validation(
                ValidationKind::NotLeader,
                "Only the team leader picks",
            ));
        }

        let game_type = game_types::require_game_type(txn, game_type_id).await?;
        if game_type.tournament_id != tournament_id || !state.is_available(game_type_id) {
            return Err(DomainError::validation(
                ValidationKind::GameUnavailable,
                "Catalog entry is not available",
            ));
        }

        let game = games::create_game(
            txn,
            GameCreate {
                tournament_id,
                game_type_id,
                round_no,
                picked_by_team_id: team_id,
            },
        )
        .await?;

        debug!(tournament_id, game_type_id, round_no, "Game picked");
        Ok(game)
    }

    /// Referee adds a custom catalog entry, allowed until picks are done.
    pub async fn create_custom_game(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: i64,
        acting_player_id: i64,
        name: String,
        description: String,
    ) -> Result<crate::repos::game_types::GameType, DomainError> {
        self.require_referee(txn, tournament_id, acting_player_id).await?;
        require_playing(txn, tournament_id).await?;

        if name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("EMPTY_NAME".into()),
                "Custom game needs a name",
            ));
        }

        let state = self.pick_state(txn, tournament_id).await?;
        if state.phase == RotationPhase::Exhausted {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "All rounds are already picked",
            ));
        }

        let game_type =
            game_types::create_game_type(txn, tournament_id, name, description, true).await?;
        debug!(tournament_id, game_type_id = game_type.id, "Custom game added");
        Ok(game_type)
    }
}

async fn require_playing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Tournament, DomainError> {
    let tournament = tournaments::require_tournament(conn, tournament_id).await?;
    if tournament.status != TournamentStatus::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Tournament is not in play",
        ));
    }
    Ok(tournament)
}
