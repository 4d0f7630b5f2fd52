//! SeaORM adapter for team rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::teams;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<teams::Model, sea_orm::DbErr> {
    find_by_id(conn, team_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Team not found".to_string()))
}

/// Both teams in creation order. The tie-break's (team_a, team_b) pairing
/// relies on this ordering.
pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .filter(teams::Column::TournamentId.eq(tournament_id))
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    name: String,
) -> Result<teams::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let team_active = teams::ActiveModel {
        id: NotSet,
        tournament_id: Set(tournament_id),
        name: Set(name),
        total_points: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    team_active.insert(conn).await
}

/// Overwrite a team's total. Totals are recomputed from rows, never
/// incremented, so this is safe to repeat.
pub async fn set_total_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    total_points: i32,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    teams::Entity::update_many()
        .col_expr(teams::Column::TotalPoints, Expr::val(total_points).into())
        .col_expr(teams::Column::UpdatedAt, Expr::val(now).into())
        .filter(teams::Column::Id.eq(team_id))
        .exec(conn)
        .await?;

    Ok(())
}
