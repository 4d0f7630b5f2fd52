//! Game lifecycle, stats, title computation and the shared reveal.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::{debug, info};

use super::TournamentFlowService;
use crate::domain::reveal;
use crate::domain::titles::{self, CompletedGame};
use crate::entities::games::GameStatus;
use crate::entities::tournaments::TournamentStatus;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::games::{Game, GameUpdate};
use crate::repos::stats::StatUpsert;
use crate::repos::titles::Title;
use crate::repos::tournaments::TournamentUpdate;
use crate::repos::{games, players, stats, teams, titles as titles_repo, tournaments};

/// Reveal snapshot: cursor, revealed prefix, completion flag.
#[derive(Debug, Clone, Serialize)]
pub struct RevealState {
    pub reveal_index: i16,
    pub total: usize,
    pub complete: bool,
}

/// Outcome of advancing past a finished game.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdvanceOutcome {
    pub is_last_game: bool,
    pub current_round: i16,
}

impl TournamentFlowService {
    /// Guarded UPCOMING to ACTIVE transition.
    pub async fn start_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        acting_player_id: i64,
    ) -> Result<Game, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        self.require_referee(txn, game.tournament_id, acting_player_id)
            .await?;

        if game.status != GameStatus::Upcoming {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game already started",
            ));
        }
        let tournament = tournaments::require_tournament(txn, game.tournament_id).await?;
        if game.round_no != tournament.current_round {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Not this round's game",
            ));
        }

        let updated = games::update_game(
            txn,
            GameUpdate::new(game_id, game.lock_version).with_status(GameStatus::Active),
        )
        .await?;
        info!(game_id, round_no = game.round_no, "Game started");
        Ok(updated)
    }

    /// Referee records per-player stat lines. Upserts, so corrections simply
    /// overwrite; locked out once titles are computed.
    pub async fn record_stats(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        acting_player_id: i64,
        lines: Vec<StatUpsert>,
    ) -> Result<(), DomainError> {
        let game = games::require_game(txn, game_id).await?;
        self.require_referee(txn, game.tournament_id, acting_player_id)
            .await?;

        if game.status == GameStatus::Upcoming {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game has not started",
            ));
        }
        if game.titles_computed {
            return Err(DomainError::conflict(
                ConflictKind::TitlesAlreadyComputed,
                "Stats are frozen once titles are computed",
            ));
        }

        for line in &lines {
            let player = self
                .require_participant(txn, game.tournament_id, line.player_id)
                .await?;
            if player.team_id.is_none() {
                return Err(DomainError::validation(
                    ValidationKind::IneligiblePlayer,
                    format!("Player {} is not on a team", line.player_id),
                ));
            }
        }

        stats::upsert_stats(txn, game_id, &lines).await?;
        debug!(game_id, lines = lines.len(), "Stats recorded");
        Ok(())
    }

    /// Guarded ACTIVE to COMPLETED transition with the point split.
    pub async fn complete_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        acting_player_id: i64,
        winning_team_id: i64,
        winner_points: i32,
        loser_points: i32,
    ) -> Result<Game, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        self.require_referee(txn, game.tournament_id, acting_player_id)
            .await?;

        if game.status != GameStatus::Active {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Only an active game can be completed",
            ));
        }
        let (team_a, team_b) = teams::require_pair(txn, game.tournament_id).await?;
        if winning_team_id != team_a.id && winning_team_id != team_b.id {
            return Err(DomainError::validation(
                ValidationKind::Other("UNKNOWN_TEAM".into()),
                "Winning team is not in this tournament",
            ));
        }
        if winner_points < loser_points || winner_points < 0 || loser_points < 0 {
            return Err(DomainError::validation(
                ValidationKind::Other("POINT_SPLIT".into()),
                "Winner points must be >= loser points >= 0",
            ));
        }

        let updated = games::update_game(
            txn,
            GameUpdate::new(game_id, game.lock_version)
                .with_status(GameStatus::Completed)
                .with_result(winning_team_id, winner_points, loser_points),
        )
        .await?;
        info!(game_id, winning_team_id, "Game completed");
        Ok(updated)
    }

    /// Compute and persist this game's titles, at most once.
    ///
    /// Idempotent short-circuit: if a title set already exists it is returned
    /// as-is. The compute claim is the conditional `titles_computed` flip, so
    /// the loser of a racing pair re-reads the winner's set instead of
    /// writing a second one. Team totals are recomputed in the same
    /// transaction.
    pub async fn compute_titles_once(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        acting_player_id: i64,
    ) -> Result<Vec<Title>, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        self.require_referee(txn, game.tournament_id, acting_player_id)
            .await?;

        if game.status != GameStatus::Completed {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Titles are computed after completion",
            ));
        }

        if game.titles_computed {
            return titles_repo::list_by_game(txn, game_id).await;
        }

        let claimed = games::claim_titles_computed(txn, game_id).await?;
        if !claimed {
            return titles_repo::list_by_game(txn, game_id).await;
        }

        let recorded = stats::list_by_game(txn, game_id).await?;
        let results = titles::compute_titles(&recorded);
        titles_repo::insert_titles(txn, game_id, &results).await?;

        self.update_team_points(txn, game.tournament_id).await?;

        info!(game_id, titles = results.len(), "Titles computed");
        titles_repo::list_by_game(txn, game_id).await
    }

    /// Rebuild both team totals from completed games plus persisted titles.
    /// An overwrite, never an increment: repeating it is a no-op.
    pub async fn update_team_points<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        tournament_id: i64,
    ) -> Result<(i32, i32), DomainError> {
        let (team_a, team_b) = teams::require_pair(conn, tournament_id).await?;
        let game_rows = games::list_by_tournament(conn, tournament_id).await?;

        let completed: Vec<CompletedGame> = game_rows
            .iter()
            .filter_map(Game::as_completed_game)
            .collect();
        let game_ids: Vec<i64> = game_rows.iter().map(|g| g.id).collect();
        let awards: Vec<_> = titles_repo::list_by_games(conn, game_ids)
            .await?
            .iter()
            .map(Title::as_award)
            .collect();
        let roster: Vec<(i64, Option<i64>)> = players::list_by_tournament(conn, tournament_id)
            .await?
            .iter()
            .map(|p| (p.id, p.team_id))
            .collect();

        let (total_a, total_b) =
            titles::team_totals(team_a.id, team_b.id, &completed, &awards, &roster);
        teams::set_total_points(conn, team_a.id, total_a).await?;
        teams::set_total_points(conn, team_b.id, total_b).await?;

        debug!(tournament_id, total_a, total_b, "Team totals recomputed");
        Ok((total_a, total_b))
    }

    /// Advance the shared reveal cursor by one.
    ///
    /// The conditional write collapses simultaneous taps into a single step;
    /// the losing tap just returns the fresh state.
    pub async fn advance_reveal(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        acting_player_id: i64,
    ) -> Result<RevealState, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        self.require_participant(txn, game.tournament_id, acting_player_id)
            .await?;

        if !game.titles_computed {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "No titles to reveal yet",
            ));
        }

        let total = titles_repo::list_by_game(txn, game_id).await?.len();
        reveal::next_reveal_index(game.reveal_index, total)?;
        games::advance_reveal_index(txn, game_id, game.reveal_index).await?;

        let fresh = games::require_game(txn, game_id).await?;
        Ok(RevealState {
            reveal_index: fresh.reveal_index,
            total,
            complete: reveal::reveal_complete(fresh.reveal_index, total),
        })
    }

    /// Current reveal snapshot without advancing.
    pub async fn reveal_state<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<RevealState, DomainError> {
        let game = games::require_game(conn, game_id).await?;
        let total = titles_repo::list_by_game(conn, game_id).await?.len();
        Ok(RevealState {
            reveal_index: game.reveal_index,
            total,
            complete: reveal::reveal_complete(game.reveal_index, total),
        })
    }

    /// Move past a finished game: bump the round or complete the tournament.
    pub async fn advance_to_next_round(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        acting_player_id: i64,
    ) -> Result<AdvanceOutcome, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        self.require_referee(txn, game.tournament_id, acting_player_id)
            .await?;

        if game.status != GameStatus::Completed || !game.titles_computed {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game is not fully scored",
            ));
        }
        let total = titles_repo::list_by_game(txn, game_id).await?.len();
        if !reveal::reveal_complete(game.reveal_index, total) {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Reveal is still running",
            ));
        }

        let tournament = tournaments::require_tournament(txn, game.tournament_id).await?;
        if tournament.current_round != game.round_no {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Tournament already moved on",
            ));
        }

        let is_last_game = game.round_no >= tournament.num_games;
        let mut update = TournamentUpdate::new(tournament.id, tournament.lock_version);
        let current_round = if is_last_game {
            update = update.with_status(TournamentStatus::Completed);
            tournament.current_round
        } else {
            let next = tournament.current_round + 1;
            update = update.with_current_round(next);
            next
        };
        tournaments::update_tournament(txn, update).await?;

        info!(
            tournament_id = tournament.id,
            game_id, is_last_game, "Advanced past game"
        );
        Ok(AdvanceOutcome {
            is_last_game,
            current_round,
        })
    }
}
