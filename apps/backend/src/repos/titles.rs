//! Title repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::titles_sea as titles_adapter;
use crate::domain::titles::{TitleAward, TitleResult};
use crate::entities::titles;
use crate::errors::domain::DomainError;

/// Title domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub id: i64,
    pub game_id: i64,
    pub player_id: i64,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub comedic: bool,
}

impl From<titles::Model> for Title {
    fn from(model: titles::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            player_id: model.player_id,
            name: model.name,
            description: model.description,
            points: model.points,
            comedic: model.comedic,
        }
    }
}

impl Title {
    pub fn as_award(&self) -> TitleAward {
        TitleAward {
            player_id: self.player_id,
            points: self.points,
        }
    }
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Title>, DomainError> {
    let titles = titles_adapter::list_by_game(conn, game_id).await?;
    Ok(titles.into_iter().map(Title::from).collect())
}

pub async fn list_by_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: Vec<i64>,
) -> Result<Vec<Title>, DomainError> {
    let titles = titles_adapter::list_by_games(conn, game_ids).await?;
    Ok(titles.into_iter().map(Title::from).collect())
}

pub async fn insert_titles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    results: &[TitleResult],
) -> Result<(), DomainError> {
    Ok(titles_adapter::insert_titles(conn, game_id, results).await?)
}
