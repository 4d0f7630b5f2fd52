//! Player repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::domain::draft::RosterPlayer;
use crate::entities::players;
use crate::entities::players::PlayerRole;
use crate::errors::domain::DomainError;

pub use players_adapter::PlayerCreate;

/// Player domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub tournament_id: i64,
    pub team_id: Option<i64>,
    pub display_name: String,
    pub role: PlayerRole,
    pub is_captain: bool,
    pub is_leader: bool,
    pub device_token: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: model.tournament_id,
            team_id: model.team_id,
            display_name: model.display_name,
            role: model.role,
            is_captain: model.is_captain,
            is_leader: model.is_leader,
            device_token: model.device_token,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl Player {
    pub fn as_roster_player(&self) -> RosterPlayer {
        RosterPlayer {
            id: self.id,
            role: self.role,
            team_id: self.team_id,
            is_captain: self.is_captain,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    let player = players_adapter::require_player(conn, player_id).await?;
    Ok(Player::from(player))
}

pub async fn find_by_tournament_and_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    device_token: &str,
) -> Result<Option<Player>, DomainError> {
    let player =
        players_adapter::find_by_tournament_and_token(conn, tournament_id, device_token).await?;
    Ok(player.map(Player::from))
}

pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::list_by_tournament(conn, tournament_id).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

/// Roster projection for draft phase derivation.
pub async fn roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<RosterPlayer>, DomainError> {
    let players = list_by_tournament(conn, tournament_id).await?;
    Ok(players.iter().map(Player::as_roster_player).collect())
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<Player, DomainError> {
    let player = players_adapter::create_player(conn, dto).await?;
    Ok(Player::from(player))
}

pub async fn promote_to_captain<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
) -> Result<bool, DomainError> {
    Ok(players_adapter::promote_to_captain(conn, player_id, team_id).await?)
}

pub async fn assign_team_once<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
) -> Result<bool, DomainError> {
    Ok(players_adapter::assign_team_once(conn, player_id, team_id).await?)
}
