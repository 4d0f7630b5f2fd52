//! Captain selection and the alternating draft.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::{debug, info};

use super::TournamentFlowService;
use crate::domain::draft::{self, DraftPhase};
use crate::entities::tournaments::TournamentStatus;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::players::Player;
use crate::repos::tournaments::{Tournament, TournamentUpdate};
use crate::repos::{players, teams, tournaments};

/// Draft snapshot for clients: roster, turn pointer, derived phase.
#[derive(Debug, Clone, Serialize)]
pub struct DraftState {
    pub phase: DraftPhase,
    pub draft_turn: Option<i64>,
    pub draft_pick_number: i32,
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub id: i64,
    pub display_name: String,
    pub role: crate::entities::players::PlayerRole,
    pub team_id: Option<i64>,
    pub is_captain: bool,
    pub is_leader: bool,
}

impl From<&Player> for RosterEntry {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name.clone(),
            role: p.role,
            team_id: p.team_id,
            is_captain: p.is_captain,
            is_leader: p.is_leader,
        }
    }
}

impl TournamentFlowService {
    /// Referee nominates the two captains, one per team, and opens the draft.
    ///
    /// Captain order matters: the first id drafts first.
    pub async fn select_captains(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: i64,
        acting_player_id: i64,
        first_captain_id: i64,
        second_captain_id: i64,
    ) -> Result<Tournament, DomainError> {
        self.require_referee(txn, tournament_id, acting_player_id).await?;
        let tournament = tournaments::require_tournament(txn, tournament_id).await?;

        if tournament.status != TournamentStatus::Lobby {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Captains can only be selected from the lobby",
            ));
        }
        if first_captain_id == second_captain_id {
            return Err(DomainError::validation(
                ValidationKind::CaptainCount,
                "Two distinct captains required",
            ));
        }

        let roster = players::roster(txn, tournament_id).await?;
        if draft::derive_draft_phase(&roster) != DraftPhase::CaptainSelect {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Captains are already selected",
            ));
        }

        let (team_a, team_b) = teams::require_pair(txn, tournament_id).await?;

        for (captain_id, team_id) in [
            (first_captain_id, team_a.id),
            (second_captain_id, team_b.id),
        ] {
            let candidate = self
                .require_participant(txn, tournament_id, captain_id)
                .await?;
            if !candidate.as_roster_player().is_draft_eligible() || candidate.team_id.is_some() {
                return Err(DomainError::validation(
                    ValidationKind::IneligiblePlayer,
                    format!("Player {captain_id} cannot captain"),
                ));
            }
            let promoted = players::promote_to_captain(txn, captain_id, team_id).await?;
            if !promoted {
                return Err(DomainError::conflict(
                    ConflictKind::Other("CAPTAIN_RACE".into()),
                    format!("Player {captain_id} was assigned concurrently"),
                ));
            }
        }

        let updated = tournaments::update_tournament(
            txn,
            TournamentUpdate::new(tournament_id, tournament.lock_version)
                .with_status(TournamentStatus::Drafting)
                .with_draft_turn(first_captain_id)
                .with_draft_pick_number(0),
        )
        .await?;

        info!(
            tournament_id,
            first_captain_id, second_captain_id, "Draft opened"
        );
        Ok(updated)
    }

    /// A captain, on their turn, binds one unassigned player to their team.
    pub async fn draft_player(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: i64,
        acting_player_id: i64,
        target_player_id: i64,
        team_id: i64,
    ) -> Result<Tournament, DomainError> {
        let acting = self
            .require_participant(txn, tournament_id, acting_player_id)
            .await?;
        let tournament = tournaments::require_tournament(txn, tournament_id).await?;

        if tournament.status != TournamentStatus::Drafting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Tournament is not drafting",
            ));
        }

        let roster = players::roster(txn, tournament_id).await?;
        if draft::derive_draft_phase(&roster) != DraftPhase::Drafting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Draft is not in the picking phase",
            ));
        }

        if !acting.is_captain {
            return Err(DomainError::validation(
                ValidationKind::NotCaptain,
                "Only captains draft",
            ));
        }
        if tournament.draft_turn != Some(acting_player_id) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "It is the other captain's turn",
            ));
        }
        if acting.team_id != Some(team_id) {
            return Err(DomainError::validation(
                ValidationKind::NotCaptain,
                "Captains draft onto their own team only",
            ));
        }

        let target = self
            .require_participant(txn, tournament_id, target_player_id)
            .await?;
        if !target.as_roster_player().is_draft_eligible() {
            return Err(DomainError::validation(
                ValidationKind::IneligiblePlayer,
                "Target cannot be drafted",
            ));
        }

        let assigned = players::assign_team_once(txn, target_player_id, team_id).await?;
        if !assigned {
            return Err(DomainError::validation(
                ValidationKind::AlreadyAssigned,
                "Player is already on a team",
            ));
        }

        // Reload to derive the post-pick phase from what actually landed.
        let roster = players::roster(txn, tournament_id).await?;
        let mut update = TournamentUpdate::new(tournament_id, tournament.lock_version)
            .with_draft_pick_number(tournament.draft_pick_number + 1);
        update = match draft::derive_draft_phase(&roster) {
            DraftPhase::Complete => update.clear_draft_turn(),
            _ => match draft::next_draft_turn(&roster, acting_player_id) {
                Some(next) => update.with_draft_turn(next),
                None => update.clear_draft_turn(),
            },
        };
        let updated = tournaments::update_tournament(txn, update).await?;

        debug!(
            tournament_id,
            target_player_id,
            team_id,
            pick_number = updated.draft_pick_number,
            "Player drafted"
        );
        Ok(updated)
    }

    /// Roster, turn pointer and derived phase in one read.
    pub async fn draft_state<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        tournament_id: i64,
    ) -> Result<DraftState, DomainError> {
        let tournament = tournaments::require_tournament(conn, tournament_id).await?;
        let roster = players::list_by_tournament(conn, tournament_id).await?;
        let roster_players: Vec<_> = roster.iter().map(Player::as_roster_player).collect();

        Ok(DraftState {
            phase: draft::derive_draft_phase(&roster_players),
            draft_turn: tournament.draft_turn,
            draft_pick_number: tournament.draft_pick_number,
            roster: roster.iter().map(RosterEntry::from).collect(),
        })
    }

    /// Close the draft and move the tournament into play.
    ///
    /// Idempotent: a second call that finds the tournament already playing
    /// returns it unchanged, so dwell-timer retries are harmless.
    pub async fn finish_draft(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: i64,
        acting_player_id: i64,
    ) -> Result<Tournament, DomainError> {
        self.require_referee(txn, tournament_id, acting_player_id).await?;
        let tournament = tournaments::require_tournament(txn, tournament_id).await?;

        if tournament.status == TournamentStatus::Playing {
            return Ok(tournament);
        }
        if tournament.status != TournamentStatus::Drafting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Tournament is not drafting",
            ));
        }

        let roster = players::roster(txn, tournament_id).await?;
        if draft::derive_draft_phase(&roster) != DraftPhase::Complete {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Draft is not complete",
            ));
        }

        let updated = tournaments::update_tournament(
            txn,
            TournamentUpdate::new(tournament_id, tournament.lock_version)
                .with_status(TournamentStatus::Playing)
                .clear_draft_turn()
                .with_current_round(1),
        )
        .await?;

        info!(tournament_id, "Draft finished, tournament playing");
        Ok(updated)
    }
}