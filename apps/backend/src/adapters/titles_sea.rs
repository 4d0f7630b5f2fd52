//! SeaORM adapter for title rows.
//!
//! The unique index on (game_id, name) backstops the titles_computed claim:
//! even if two compute passes somehow both insert, the second hits a unique
//! violation instead of duplicating awards.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::domain::titles::TitleResult;
use crate::entities::titles;

/// Titles of a game in award order. The reveal cursor indexes this ordering.
pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<titles::Model>, sea_orm::DbErr> {
    titles::Entity::find()
        .filter(titles::Column::GameId.eq(game_id))
        .order_by_asc(titles::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: Vec<i64>,
) -> Result<Vec<titles::Model>, sea_orm::DbErr> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }
    titles::Entity::find()
        .filter(titles::Column::GameId.is_in(game_ids))
        .order_by_asc(titles::Column::Id)
        .all(conn)
        .await
}

pub async fn insert_titles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    results: &[TitleResult],
) -> Result<(), sea_orm::DbErr> {
    if results.is_empty() {
        return Ok(());
    }

    let now = time::OffsetDateTime::now_utc();
    let models: Vec<titles::ActiveModel> = results
        .iter()
        .map(|t| titles::ActiveModel {
            id: NotSet,
            game_id: Set(game_id),
            player_id: Set(t.player_id),
            name: Set(t.name.clone()),
            description: Set(t.description.clone()),
            points: Set(t.points),
            comedic: Set(t.comedic),
            created_at: Set(now),
        })
        .collect();

    titles::Entity::insert_many(models).exec(conn).await?;
    Ok(())
}
