//! SeaORM adapter for the per-tournament game catalog.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::game_types;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_type_id: i64,
) -> Result<Option<game_types::Model>, sea_orm::DbErr> {
    game_types::Entity::find_by_id(game_type_id).one(conn).await
}

pub async fn require_game_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_type_id: i64,
) -> Result<game_types::Model, sea_orm::DbErr> {
    find_by_id(conn, game_type_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game type not found".to_string()))
}

/// Catalog in insertion order: stock entries first, customs after.
pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<game_types::Model>, sea_orm::DbErr> {
    game_types::Entity::find()
        .filter(game_types::Column::TournamentId.eq(tournament_id))
        .order_by_asc(game_types::Column::Id)
        .all(conn)
        .await
}

pub async fn create_game_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    name: String,
    description: String,
    is_custom: bool,
) -> Result<game_types::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_type_active = game_types::ActiveModel {
        id: NotSet,
        tournament_id: Set(tournament_id),
        name: Set(name),
        description: Set(description),
        is_custom: Set(is_custom),
        created_at: Set(now),
    };

    game_type_active.insert(conn).await
}

/// Seed the stock catalog for a fresh tournament.
pub async fn seed_stock_catalog<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    entries: &[(&str, &str)],
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let models: Vec<game_types::ActiveModel> = entries
        .iter()
        .map(|(name, description)| game_types::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            is_custom: Set(false),
            created_at: Set(now),
        })
        .collect();

    game_types::Entity::insert_many(models).exec(conn).await?;
    Ok(())
}
