//! Team repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::teams_sea as teams_adapter;
use crate::entities::teams;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Team domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub tournament_id: i64,
    pub name: String,
    pub total_points: i32,
}

impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: model.tournament_id,
            name: model.name,
            total_points: model.total_points,
        }
    }
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    let team = teams_adapter::require_team(conn, team_id).await?;
    Ok(Team::from(team))
}

pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<Team>, DomainError> {
    let teams = teams_adapter::list_by_tournament(conn, tournament_id).await?;
    Ok(teams.into_iter().map(Team::from).collect())
}

/// The (team_a, team_b) pair in creation order.
pub async fn require_pair<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<(Team, Team), DomainError> {
    let teams = list_by_tournament(conn, tournament_id).await?;
    if teams.len() != 2 {
        return Err(DomainError::not_found(
            NotFoundKind::Team,
            format!("Expected two teams, found {}", teams.len()),
        ));
    }
    let mut it = teams.into_iter();
    match (it.next(), it.next()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(DomainError::not_found(
            NotFoundKind::Team,
            "Expected two teams",
        )),
    }
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    name: String,
) -> Result<Team, DomainError> {
    let team = teams_adapter::create_team(conn, tournament_id, name).await?;
    Ok(Team::from(team))
}

pub async fn set_total_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    total_points: i32,
) -> Result<(), DomainError> {
    Ok(teams_adapter::set_total_points(conn, team_id, total_points).await?)
}
