//! Game stat repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::stats_sea as stats_adapter;
use crate::domain::titles::PlayerStat;
use crate::errors::domain::DomainError;

pub use stats_adapter::StatUpsert;

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<PlayerStat>, DomainError> {
    let stats = stats_adapter::list_by_game(conn, game_id).await?;
    Ok(stats
        .into_iter()
        .map(|s| PlayerStat {
            player_id: s.player_id,
            metric: s.metric,
            value: s.value,
        })
        .collect())
}

pub async fn upsert_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    stats: &[StatUpsert],
) -> Result<(), DomainError> {
    Ok(stats_adapter::upsert_stats(conn, game_id, stats).await?)
}
