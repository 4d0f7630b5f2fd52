use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_status")]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[sea_orm(string_value = "UPCOMING")]
    Upcoming,
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "tournament_id")]
    pub tournament_id: i64,
    #[sea_orm(column_name = "game_type_id")]
    pub game_type_id: i64,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    #[sea_orm(column_name = "picked_by_team_id")]
    pub picked_by_team_id: i64,
    pub status: GameStatus,
    #[sea_orm(column_name = "winning_team_id")]
    pub winning_team_id: Option<i64>,
    #[sea_orm(column_name = "winner_points")]
    pub winner_points: Option<i32>,
    #[sea_orm(column_name = "loser_points")]
    pub loser_points: Option<i32>,
    /// Flipped exactly once by the title compute pass.
    #[sea_orm(column_name = "titles_computed")]
    pub titles_computed: bool,
    #[sea_orm(column_name = "reveal_index", column_type = "SmallInteger")]
    pub reveal_index: i16,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournaments::Entity",
        from = "Column::TournamentId",
        to = "super::tournaments::Column::Id"
    )]
    Tournament,
    #[sea_orm(
        belongs_to = "super::game_types::Entity",
        from = "Column::GameTypeId",
        to = "super::game_types::Column::Id"
    )]
    GameType,
    #[sea_orm(has_many = "super::titles::Entity")]
    Titles,
    #[sea_orm(has_many = "super::game_stats::Entity")]
    GameStats,
}

impl Related<super::tournaments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl Related<super::game_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameType.def()
    }
}

impl Related<super::titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Titles.def()
    }
}

impl Related<super::game_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameStats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
