//! Tournament creation and join.

use rand::Rng;
use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::entities::players::PlayerRole;
use crate::entities::tournaments::TournamentStatus;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::players::{Player, PlayerCreate};
use crate::repos::teams::Team;
use crate::repos::tournaments::{Tournament, TournamentCreate};
use crate::repos::{game_types, players, teams, tournaments};

/// Room codes use an unambiguous alphabet (no O/0, I/1 lookalikes).
const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const ROOM_CODE_LEN: usize = 6;
const ROOM_CODE_ATTEMPTS: usize = 5;

/// Stock game catalog seeded into every tournament.
pub const STOCK_CATALOG: &[(&str, &str)] = &[
    ("Cornhole", "Bag toss, first team to 21"),
    ("Giant Jenga", "Pull, place, pray"),
    ("Water Balloon Toss", "Step back after every catch"),
    ("Three-Legged Race", "One lap, tied at the ankle"),
    ("Trivia Gauntlet", "Five categories, steal on a miss"),
    ("Egg and Spoon Relay", "Drop it and you restart"),
    ("Tug of War", "Best of three pulls"),
    ("Scavenger Hunt", "Ten items, twenty minutes"),
];

#[derive(Debug, Clone)]
pub struct NewTournament {
    pub tournament: Tournament,
    pub teams: Vec<Team>,
    pub referee: Player,
}

#[derive(Default)]
pub struct LobbyService;

impl LobbyService {
    pub fn new() -> Self {
        Self
    }

    /// Create a tournament and seed its fixed shape: two teams, the stock
    /// catalog, and the creator's referee row.
    pub async fn create_tournament(
        &self,
        txn: &DatabaseTransaction,
        display_name: String,
        device_token: String,
        num_games: i16,
    ) -> Result<NewTournament, DomainError> {
        if !(1..=20).contains(&num_games) {
            return Err(DomainError::validation(
                ValidationKind::Other("NUM_GAMES".into()),
                "Number of games must be between 1 and 20",
            ));
        }

        let tournament = self.create_with_fresh_code(txn, num_games).await?;

        let team_a = teams::create_team(txn, tournament.id, "Red Team".to_string()).await?;
        let team_b = teams::create_team(txn, tournament.id, "Blue Team".to_string()).await?;
        game_types::seed_stock_catalog(txn, tournament.id, STOCK_CATALOG).await?;

        let referee = players::create_player(
            txn,
            PlayerCreate {
                tournament_id: tournament.id,
                display_name,
                role: PlayerRole::Referee,
                device_token,
            },
        )
        .await?;

        info!(
            tournament_id = tournament.id,
            room_code = %tournament.room_code,
            "Tournament created"
        );

        Ok(NewTournament {
            tournament,
            teams: vec![team_a, team_b],
            referee,
        })
    }

    /// Join a tournament by room code.
    ///
    /// Joining is idempotent per device: if this token already has a player
    /// row here, that identity is returned instead of a duplicate.
    pub async fn join_tournament(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        display_name: String,
        device_token: String,
        role: PlayerRole,
    ) -> Result<(Tournament, Player), DomainError> {
        if role == PlayerRole::Referee {
            return Err(DomainError::validation(
                ValidationKind::IneligiblePlayer,
                "The referee seat is taken at creation",
            ));
        }

        let tournament = tournaments::find_by_room_code(txn, room_code)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    crate::errors::domain::NotFoundKind::Tournament,
                    format!("No tournament with room code {room_code}"),
                )
            })?;

        if tournament.status == TournamentStatus::Completed {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Tournament already completed",
            ));
        }

        if let Some(existing) =
            players::find_by_tournament_and_token(txn, tournament.id, &device_token).await?
        {
            return Ok((tournament, existing));
        }

        // Players can only join the lobby; spectators may arrive any time.
        if role == PlayerRole::Player && tournament.status != TournamentStatus::Lobby {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Draft already started; join as spectator",
            ));
        }

        let player = players::create_player(
            txn,
            PlayerCreate {
                tournament_id: tournament.id,
                display_name,
                role,
                device_token,
            },
        )
        .await?;

        info!(
            tournament_id = tournament.id,
            player_id = player.id,
            "Player joined"
        );

        Ok((tournament, player))
    }

    /// Pick an unused room code and insert. The pre-check keeps collisions
    /// out of the transaction's error path; the unique index still backstops
    /// a simultaneous create, surfacing as a RoomCodeConflict.
    async fn create_with_fresh_code(
        &self,
        txn: &DatabaseTransaction,
        num_games: i16,
    ) -> Result<Tournament, DomainError> {
        for _ in 0..ROOM_CODE_ATTEMPTS {
            let room_code = generate_room_code();
            if tournaments::find_by_room_code(txn, &room_code).await?.is_some() {
                continue;
            }
            return tournaments::create_tournament(
                txn,
                TournamentCreate {
                    room_code,
                    num_games,
                },
            )
            .await;
        }
        Err(DomainError::conflict(
            ConflictKind::RoomCodeConflict,
            "Could not allocate a free room code",
        ))
    }
}

fn generate_room_code() -> String {
    let mut rng = rand::rng();
    (0..ROOM_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ROOM_CODE_ALPHABET.len());
            ROOM_CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_codes_use_the_unambiguous_alphabet() {
        for _ in 0..50 {
            let code = generate_room_code();
            assert_eq!(code.len(), ROOM_CODE_LEN);
            assert!(code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b)));
        }
    }
}
