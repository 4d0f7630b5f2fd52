//! Game repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::domain::rotation::PickedGame;
use crate::domain::titles::CompletedGame;
use crate::entities::games;
use crate::entities::games::GameStatus;
use crate::errors::domain::DomainError;

pub use games_adapter::{GameCreate, GameUpdate};

/// Game domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub tournament_id: i64,
    pub game_type_id: i64,
    pub round_no: i16,
    pub picked_by_team_id: i64,
    pub status: GameStatus,
    pub winning_team_id: Option<i64>,
    pub winner_points: Option<i32>,
    pub loser_points: Option<i32>,
    pub titles_computed: bool,
    pub reveal_index: i16,
    pub lock_version: i32,
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: model.tournament_id,
            game_type_id: model.game_type_id,
            round_no: model.round_no,
            picked_by_team_id: model.picked_by_team_id,
            status: model.status,
            winning_team_id: model.winning_team_id,
            winner_points: model.winner_points,
            loser_points: model.loser_points,
            titles_computed: model.titles_computed,
            reveal_index: model.reveal_index,
            lock_version: model.lock_version,
        }
    }
}

impl Game {
    pub fn as_picked_game(&self) -> PickedGame {
        PickedGame {
            game_type_id: self.game_type_id,
            round_no: self.round_no,
            picked_by_team_id: self.picked_by_team_id,
        }
    }

    /// Scoring projection; only valid for completed games with a result.
    pub fn as_completed_game(&self) -> Option<CompletedGame> {
        if self.status != GameStatus::Completed {
            return None;
        }
        Some(CompletedGame {
            winning_team_id: self.winning_team_id?,
            winner_points: self.winner_points?,
            loser_points: self.loser_points?,
        })
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Ok(Game::from(game))
}

pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list_by_tournament(conn, tournament_id).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<Game, DomainError> {
    let game = games_adapter::update_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn claim_titles_computed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, DomainError> {
    Ok(games_adapter::claim_titles_computed(conn, game_id).await?)
}

pub async fn advance_reveal_index<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    from_index: i16,
) -> Result<bool, DomainError> {
    Ok(games_adapter::advance_reveal_index(conn, game_id, from_index).await?)
}
