//! SeaORM adapter for per-player game stats.
//!
//! Stats upsert on (game_id, player_id, metric): re-submitting a scoresheet
//! overwrites values instead of stacking rows, which keeps the title compute
//! deterministic across retries.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::game_stats;

/// One incoming stat line.
#[derive(Debug, Clone)]
pub struct StatUpsert {
    pub player_id: i64,
    pub metric: String,
    pub value: i32,
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_stats::Model>, sea_orm::DbErr> {
    game_stats::Entity::find()
        .filter(game_stats::Column::GameId.eq(game_id))
        .all(conn)
        .await
}

pub async fn upsert_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    stats: &[StatUpsert],
) -> Result<(), sea_orm::DbErr> {
    if stats.is_empty() {
        return Ok(());
    }

    let now = time::OffsetDateTime::now_utc();
    let models: Vec<game_stats::ActiveModel> = stats
        .iter()
        .map(|s| game_stats::ActiveModel {
            id: NotSet,
            game_id: Set(game_id),
            player_id: Set(s.player_id),
            metric: Set(s.metric.clone()),
            value: Set(s.value),
            created_at: Set(now),
        })
        .collect();

    game_stats::Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([
                game_stats::Column::GameId,
                game_stats::Column::PlayerId,
                game_stats::Column::Metric,
            ])
            .update_column(game_stats::Column::Value)
            .to_owned(),
        )
        .exec(conn)
        .await?;

    Ok(())
}
