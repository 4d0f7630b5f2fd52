//! SeaORM adapter for player rows.
//!
//! Team assignment is write-once: the draft assignment update is guarded by
//! `team_id IS NULL`, so a player can never be drafted twice even when two
//! captains act on a stale roster.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::players;

/// DTO for creating a player.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub tournament_id: i64,
    pub display_name: String,
    pub role: players::PlayerRole,
    pub device_token: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

/// Find a player by id or return RecordNotFound.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<players::Model, sea_orm::DbErr> {
    find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Player not found".to_string()))
}

pub async fn find_by_tournament_and_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    device_token: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::TournamentId.eq(tournament_id))
        .filter(players::Column::DeviceToken.eq(device_token))
        .one(conn)
        .await
}

/// Full roster in join order.
pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::TournamentId.eq(tournament_id))
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player_active = players::ActiveModel {
        id: NotSet,
        tournament_id: Set(dto.tournament_id),
        team_id: NotSet,
        display_name: Set(dto.display_name),
        role: Set(dto.role),
        is_captain: Set(false),
        is_leader: Set(false),
        device_token: Set(dto.device_token),
        created_at: Set(now),
        updated_at: Set(now),
    };

    player_active.insert(conn).await
}

/// Promote a player to captain of a team.
///
/// Guarded by `is_captain = false` and `team_id IS NULL`; returns whether
/// this call made the promotion. The first captain of each team is also its
/// leader for pick purposes.
pub async fn promote_to_captain<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = players::Entity::update_many()
        .col_expr(players::Column::TeamId, Expr::val(Some(team_id)).into())
        .col_expr(players::Column::IsCaptain, Expr::val(true).into())
        .col_expr(players::Column::IsLeader, Expr::val(true).into())
        .col_expr(players::Column::UpdatedAt, Expr::val(now).into())
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::IsCaptain.eq(false))
        .filter(players::Column::TeamId.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Bind a drafted player to a team, at most once.
///
/// Returns whether this call made the assignment; a false return means the
/// player was already on a team.
pub async fn assign_team_once<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = players::Entity::update_many()
        .col_expr(players::Column::TeamId, Expr::val(Some(team_id)).into())
        .col_expr(players::Column::UpdatedAt, Expr::val(now).into())
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::TeamId.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
