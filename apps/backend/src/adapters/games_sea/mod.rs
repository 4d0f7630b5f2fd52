//! SeaORM adapter for game rows.
//!
//! Pick uniqueness is carried by the unique indexes on (tournament, game
//! type) and (tournament, round); inserts that lose a pick race surface as
//! unique violations and get mapped upstream. The titles_computed flip and
//! the reveal cursor use conditional updates for their at-most-once rules.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::games;

pub mod dto;

pub use dto::{GameCreate, GameUpdate};

/// Apply an optimistic update with a lock version check, then refetch.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::LockVersion.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let game = games::Entity::find_by_id(id).one(conn).await?;
        if let Some(game) = game {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected_version, game.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::RecordNotFound("Game not found".to_string()));
        }
    }

    games::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find a game by id or return RecordNotFound.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

/// All games of a tournament in round order.
pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::TournamentId.eq(tournament_id))
        .order_by_asc(games::Column::RoundNo)
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        tournament_id: Set(dto.tournament_id),
        game_type_id: Set(dto.game_type_id),
        round_no: Set(dto.round_no),
        picked_by_team_id: Set(dto.picked_by_team_id),
        status: Set(games::GameStatus::Upcoming),
        winning_team_id: NotSet,
        winner_points: NotSet,
        loser_points: NotSet,
        titles_computed: Set(false),
        reveal_index: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    game_active.insert(conn).await
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::{Alias, Expr};

    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |mut update| {
        if let Some(status) = dto.status {
            update = update.col_expr(
                games::Column::Status,
                Expr::val(status).cast_as(Alias::new("game_status")),
            );
        }
        if let Some(team) = dto.winning_team_id {
            update = update.col_expr(games::Column::WinningTeamId, Expr::val(Some(team)).into());
        }
        if let Some(points) = dto.winner_points {
            update = update.col_expr(games::Column::WinnerPoints, Expr::val(Some(points)).into());
        }
        if let Some(points) = dto.loser_points {
            update = update.col_expr(games::Column::LoserPoints, Expr::val(Some(points)).into());
        }
        update
    })
    .await
}

/// Claim the title compute pass, first caller wins.
///
/// Flips `titles_computed` only when it is still false. Returns whether this
/// call made the flip; a false return means another pass already computed.
pub async fn claim_titles_computed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = games::Entity::update_many()
        .col_expr(games::Column::TitlesComputed, Expr::val(true).into())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::TitlesComputed.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Advance the shared reveal cursor by exactly one step.
///
/// Guarded by the current index, so two simultaneous taps produce a single
/// advance. Returns whether this call moved the cursor.
pub async fn advance_reveal_index<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    from_index: i16,
) -> Result<bool, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = games::Entity::update_many()
        .col_expr(games::Column::RevealIndex, Expr::val(from_index + 1).into())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::RevealIndex.eq(from_index))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
