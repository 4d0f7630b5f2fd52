//! SeaORM adapter for tournament rows.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::tournaments;

pub mod dto;

pub use dto::{TournamentCreate, TournamentUpdate};

/// Apply an optimistic update with a lock version check, then refetch.
///
/// Adds the lock_version increment and updated_at, filters by id and the
/// expected version, and uses rows_affected to distinguish NotFound from
/// OptimisticLock. The caller's closure configures entity-specific columns.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<tournaments::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(
        sea_orm::UpdateMany<tournaments::Entity>,
    ) -> sea_orm::UpdateMany<tournaments::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(tournaments::Entity::update_many())
        .col_expr(tournaments::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            tournaments::Column::LockVersion,
            Expr::col(tournaments::Column::LockVersion).add(1),
        )
        .filter(tournaments::Column::Id.eq(id))
        .filter(tournaments::Column::LockVersion.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let tournament = tournaments::Entity::find_by_id(id).one(conn).await?;
        if let Some(tournament) = tournament {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected_version, tournament.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::RecordNotFound(
                "Tournament not found".to_string(),
            ));
        }
    }

    tournaments::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Tournament not found".to_string()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Option<tournaments::Model>, sea_orm::DbErr> {
    tournaments::Entity::find_by_id(tournament_id).one(conn).await
}

/// Find a tournament by id or return RecordNotFound.
pub async fn require_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<tournaments::Model, sea_orm::DbErr> {
    find_by_id(conn, tournament_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Tournament not found".to_string()))
}

pub async fn find_by_room_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Option<tournaments::Model>, sea_orm::DbErr> {
    tournaments::Entity::find()
        .filter(tournaments::Column::RoomCode.eq(room_code))
        .one(conn)
        .await
}

pub async fn create_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TournamentCreate,
) -> Result<tournaments::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let tournament_active = tournaments::ActiveModel {
        id: NotSet,
        room_code: Set(dto.room_code),
        status: Set(tournaments::TournamentStatus::Lobby),
        num_games: Set(dto.num_games),
        current_round: Set(0),
        draft_turn: NotSet,
        draft_pick_number: Set(0),
        dice_roll_data: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    tournament_active.insert(conn).await
}

pub async fn update_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TournamentUpdate,
) -> Result<tournaments::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::{Alias, Expr};

    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |mut update| {
        if let Some(status) = dto.status {
            update = update.col_expr(
                tournaments::Column::Status,
                Expr::val(status).cast_as(Alias::new("tournament_status")),
            );
        }
        if let Some(round) = dto.current_round {
            update = update.col_expr(tournaments::Column::CurrentRound, Expr::val(round).into());
        }
        if let Some(turn) = dto.draft_turn {
            update = update.col_expr(tournaments::Column::DraftTurn, Expr::val(turn).into());
        }
        if let Some(pick_number) = dto.draft_pick_number {
            update = update.col_expr(
                tournaments::Column::DraftPickNumber,
                Expr::val(pick_number).into(),
            );
        }
        update
    })
    .await
}

/// Persist the tie-break roll, first writer wins.
///
/// The write is guarded by `dice_roll_data IS NULL`, so concurrent rollers
/// race on the row and exactly one lands. Returns the stored row plus whether
/// this call was the writer; losers read back the winner's value.
pub async fn set_dice_roll_once<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    roll: serde_json::Value,
) -> Result<(tournaments::Model, bool), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = tournaments::Entity::update_many()
        .col_expr(
            tournaments::Column::DiceRollData,
            Expr::val(Some(roll)).into(),
        )
        .col_expr(tournaments::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            tournaments::Column::LockVersion,
            Expr::col(tournaments::Column::LockVersion).add(1),
        )
        .filter(tournaments::Column::Id.eq(tournament_id))
        .filter(tournaments::Column::DiceRollData.is_null())
        .exec(conn)
        .await?;

    let tournament = require_tournament(conn, tournament_id).await?;
    Ok((tournament, result.rows_affected == 1))
}
