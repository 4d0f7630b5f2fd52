use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----

#[derive(Iden)]
enum Tournaments {
    Table,
    Id,
    RoomCode,
    Status,
    NumGames,
    CurrentRound,
    DraftTurn,
    DraftPickNumber,
    DiceRollData,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    TournamentId,
    Name,
    TotalPoints,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    TournamentId,
    TeamId,
    DisplayName,
    Role,
    IsCaptain,
    IsLeader,
    DeviceToken,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameTypes {
    Table,
    Id,
    TournamentId,
    Name,
    Description,
    IsCustom,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    TournamentId,
    GameTypeId,
    RoundNo,
    PickedByTeamId,
    Status,
    WinningTeamId,
    WinnerPoints,
    LoserPoints,
    TitlesComputed,
    RevealIndex,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum Titles {
    Table,
    Id,
    GameId,
    PlayerId,
    Name,
    Description,
    Points,
    Comedic,
    CreatedAt,
}

#[derive(Iden)]
enum GameStats {
    Table,
    Id,
    GameId,
    PlayerId,
    Metric,
    Value,
    CreatedAt,
}

#[derive(Iden)]
enum TournamentStatusEnum {
    #[iden = "tournament_status"]
    Type,
}

#[derive(Iden)]
enum PlayerRoleEnum {
    #[iden = "player_role"]
    Type,
}

#[derive(Iden)]
enum GameStatusEnum {
    #[iden = "game_status"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ----- enum types -----
        manager
            .create_type(
                PgType::create()
                    .as_enum(TournamentStatusEnum::Type)
                    .values([
                        Alias::new("LOBBY"),
                        Alias::new("DRAFTING"),
                        Alias::new("PLAYING"),
                        Alias::new("COMPLETED"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                PgType::create()
                    .as_enum(PlayerRoleEnum::Type)
                    .values([
                        Alias::new("REFEREE"),
                        Alias::new("PLAYER"),
                        Alias::new("SPECTATOR"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                PgType::create()
                    .as_enum(GameStatusEnum::Type)
                    .values([
                        Alias::new("UPCOMING"),
                        Alias::new("ACTIVE"),
                        Alias::new("COMPLETED"),
                    ])
                    .to_owned(),
            )
            .await?;

        // ----- tournaments -----
        manager
            .create_table(
                Table::create()
                    .table(Tournaments::Table)
                    .col(
                        ColumnDef::new(Tournaments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tournaments::RoomCode).string().not_null())
                    .col(
                        ColumnDef::new(Tournaments::Status)
                            .custom(TournamentStatusEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::NumGames)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::CurrentRound)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Tournaments::DraftTurn).big_integer())
                    .col(
                        ColumnDef::new(Tournaments::DraftPickNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Tournaments::DiceRollData).json_binary())
                    .col(
                        ColumnDef::new(Tournaments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("tournaments_room_code_key")
                    .table(Tournaments::Table)
                    .col(Tournaments::RoomCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ----- teams -----
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::TournamentId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(
                        ColumnDef::new(Teams::TotalPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("teams_tournament_id_fkey")
                            .from(Teams::Table, Teams::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ----- players -----
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Players::TournamentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Players::TeamId).big_integer())
                    .col(ColumnDef::new(Players::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Players::Role)
                            .custom(PlayerRoleEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::IsCaptain)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Players::IsLeader)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Players::DeviceToken).string().not_null())
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("players_tournament_id_fkey")
                            .from(Players::Table, Players::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("players_team_id_fkey")
                            .from(Players::Table, Players::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One identity per device per tournament; session recovery keys on this.
        manager
            .create_index(
                Index::create()
                    .name("players_tournament_device_token_key")
                    .table(Players::Table)
                    .col(Players::TournamentId)
                    .col(Players::DeviceToken)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ----- game_types -----
        manager
            .create_table(
                Table::create()
                    .table(GameTypes::Table)
                    .col(
                        ColumnDef::new(GameTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameTypes::TournamentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameTypes::Name).string().not_null())
                    .col(ColumnDef::new(GameTypes::Description).string().not_null())
                    .col(
                        ColumnDef::new(GameTypes::IsCustom)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("game_types_tournament_id_fkey")
                            .from(GameTypes::Table, GameTypes::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ----- games -----
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::TournamentId).big_integer().not_null())
                    .col(ColumnDef::new(Games::GameTypeId).big_integer().not_null())
                    .col(ColumnDef::new(Games::RoundNo).small_integer().not_null())
                    .col(
                        ColumnDef::new(Games::PickedByTeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::Status)
                            .custom(GameStatusEnum::Type)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::WinningTeamId).big_integer())
                    .col(ColumnDef::new(Games::WinnerPoints).integer())
                    .col(ColumnDef::new(Games::LoserPoints).integer())
                    .col(
                        ColumnDef::new(Games::TitlesComputed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::RevealIndex)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("games_tournament_id_fkey")
                            .from(Games::Table, Games::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("games_game_type_id_fkey")
                            .from(Games::Table, Games::GameTypeId)
                            .to(GameTypes::Table, GameTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // A catalog entry can be picked at most once, and a round holds at most
        // one pick. Racing picks lose at the persistence layer, not in the UI.
        manager
            .create_index(
                Index::create()
                    .name("games_tournament_game_type_key")
                    .table(Games::Table)
                    .col(Games::TournamentId)
                    .col(Games::GameTypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("games_tournament_round_no_key")
                    .table(Games::Table)
                    .col(Games::TournamentId)
                    .col(Games::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ----- titles -----
        manager
            .create_table(
                Table::create()
                    .table(Titles::Table)
                    .col(
                        ColumnDef::new(Titles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Titles::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Titles::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Titles::Name).string().not_null())
                    .col(ColumnDef::new(Titles::Description).string().not_null())
                    .col(ColumnDef::new(Titles::Points).integer().not_null())
                    .col(ColumnDef::new(Titles::Comedic).boolean().not_null())
                    .col(
                        ColumnDef::new(Titles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("titles_game_id_fkey")
                            .from(Titles::Table, Titles::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("titles_player_id_fkey")
                            .from(Titles::Table, Titles::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backstop for the compute-once protocol: even if two referees race past
        // the titles_computed guard, the second insert fails here.
        manager
            .create_index(
                Index::create()
                    .name("titles_game_id_name_key")
                    .table(Titles::Table)
                    .col(Titles::GameId)
                    .col(Titles::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ----- game_stats -----
        manager
            .create_table(
                Table::create()
                    .table(GameStats::Table)
                    .col(
                        ColumnDef::new(GameStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameStats::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GameStats::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(GameStats::Metric).string().not_null())
                    .col(ColumnDef::new(GameStats::Value).integer().not_null())
                    .col(
                        ColumnDef::new(GameStats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("game_stats_game_id_fkey")
                            .from(GameStats::Table, GameStats::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("game_stats_player_id_fkey")
                            .from(GameStats::Table, GameStats::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("game_stats_game_player_metric_key")
                    .table(GameStats::Table)
                    .col(GameStats::GameId)
                    .col(GameStats::PlayerId)
                    .col(GameStats::Metric)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameStats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Titles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tournaments::Table).to_owned())
            .await?;

        manager
            .drop_type(PgType::drop().name(GameStatusEnum::Type).to_owned())
            .await?;
        manager
            .drop_type(PgType::drop().name(PlayerRoleEnum::Type).to_owned())
            .await?;
        manager
            .drop_type(PgType::drop().name(TournamentStatusEnum::Type).to_owned())
            .await?;

        Ok(())
    }
}
