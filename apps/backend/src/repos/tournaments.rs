//! Tournament repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::tournaments_sea as tournaments_adapter;
use crate::domain::tiebreak::DiceRoll;
use crate::entities::tournaments;
use crate::entities::tournaments::TournamentStatus;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub use tournaments_adapter::{TournamentCreate, TournamentUpdate};

/// Tournament domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    pub id: i64,
    pub room_code: String,
    pub status: TournamentStatus,
    pub num_games: i16,
    pub current_round: i16,
    pub draft_turn: Option<i64>,
    pub draft_pick_number: i32,
    pub dice_roll: Option<DiceRoll>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub lock_version: i32,
}

impl TryFrom<tournaments::Model> for Tournament {
    type Error = DomainError;

    fn try_from(model: tournaments::Model) -> Result<Self, DomainError> {
        let dice_roll = model
            .dice_roll_data
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Corrupt dice roll payload: {e}"),
                )
            })?;
        Ok(Self {
            id: model.id,
            room_code: model.room_code,
            status: model.status,
            num_games: model.num_games,
            current_round: model.current_round,
            draft_turn: model.draft_turn,
            draft_pick_number: model.draft_pick_number,
            dice_roll,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        })
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Option<Tournament>, DomainError> {
    let tournament = tournaments_adapter::find_by_id(conn, tournament_id).await?;
    tournament.map(Tournament::try_from).transpose()
}

pub async fn require_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Tournament, DomainError> {
    let tournament = tournaments_adapter::require_tournament(conn, tournament_id).await?;
    Tournament::try_from(tournament)
}

pub async fn find_by_room_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Option<Tournament>, DomainError> {
    let tournament = tournaments_adapter::find_by_room_code(conn, room_code).await?;
    tournament.map(Tournament::try_from).transpose()
}

pub async fn create_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TournamentCreate,
) -> Result<Tournament, DomainError> {
    let tournament = tournaments_adapter::create_tournament(conn, dto).await?;
    Tournament::try_from(tournament)
}

pub async fn update_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TournamentUpdate,
) -> Result<Tournament, DomainError> {
    let tournament = tournaments_adapter::update_tournament(conn, dto).await?;
    Tournament::try_from(tournament)
}

/// Persist the tie-break, first writer wins. Returns the authoritative
/// tournament plus whether this call wrote the roll.
pub async fn set_dice_roll_once<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    roll: DiceRoll,
) -> Result<(Tournament, bool), DomainError> {
    let payload = serde_json::to_value(roll).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Dice roll serialization failed: {e}"),
        )
    })?;
    let (tournament, wrote) =
        tournaments_adapter::set_dice_roll_once(conn, tournament_id, payload).await?;
    Ok((Tournament::try_from(tournament)?, wrote))
}
