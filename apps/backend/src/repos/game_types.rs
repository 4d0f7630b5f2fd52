//! Game catalog repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::game_types_sea as game_types_adapter;
use crate::entities::game_types;
use crate::errors::domain::DomainError;

/// Catalog entry domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct GameType {
    pub id: i64,
    pub tournament_id: i64,
    pub name: String,
    pub description: String,
    pub is_custom: bool,
}

impl From<game_types::Model> for GameType {
    fn from(model: game_types::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: model.tournament_id,
            name: model.name,
            description: model.description,
            is_custom: model.is_custom,
        }
    }
}

pub async fn require_game_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_type_id: i64,
) -> Result<GameType, DomainError> {
    let game_type = game_types_adapter::require_game_type(conn, game_type_id).await?;
    Ok(GameType::from(game_type))
}

pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<GameType>, DomainError> {
    let game_types = game_types_adapter::list_by_tournament(conn, tournament_id).await?;
    Ok(game_types.into_iter().map(GameType::from).collect())
}

pub async fn create_game_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    name: String,
    description: String,
    is_custom: bool,
) -> Result<GameType, DomainError> {
    let game_type =
        game_types_adapter::create_game_type(conn, tournament_id, name, description, is_custom)
            .await?;
    Ok(GameType::from(game_type))
}

pub async fn seed_stock_catalog<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    entries: &[(&str, &str)],
) -> Result<(), DomainError> {
    Ok(game_types_adapter::seed_stock_catalog(conn, tournament_id, entries).await?)
}
