//! Tournament lifecycle routes: create, join, state, team totals.

use actix_web::{web, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::entities::players::PlayerRole;
use crate::error::AppError;
use crate::extractors::device_token::DeviceToken;
use crate::routes::views::{GameView, PlayerView, TeamView, TournamentView};
use crate::routes::{notify, require_identity};
use crate::services::flow::TournamentFlowService;
use crate::services::lobby::LobbyService;
use crate::state::app_state::AppState;
use crate::ws::protocol::ChangeEvent;

#[derive(Deserialize)]
struct CreateTournamentRequest {
    display_name: String,
    num_games: i16,
}

#[derive(Serialize)]
struct CreateTournamentResponse {
    tournament: TournamentView,
    teams: Vec<TeamView>,
    player: PlayerView,
}

/// POST /api/tournaments
async fn create_tournament(
    body: web::Json<CreateTournamentRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CreateTournamentResponse>, AppError> {
    let req = body.into_inner();
    let token = device_token.0;

    let created = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = LobbyService::new();
            Ok(service
                .create_tournament(txn, req.display_name, token, req.num_games)
                .await?)
        })
    })
    .await?;

    Ok(web::Json(CreateTournamentResponse {
        tournament: TournamentView::from(&created.tournament),
        teams: created.teams.iter().map(TeamView::from).collect(),
        player: PlayerView::from(&created.referee),
    }))
}

#[derive(Deserialize)]
struct JoinTournamentRequest {
    room_code: String,
    display_name: String,
    #[serde(default)]
    spectator: bool,
}

#[derive(Serialize)]
struct JoinTournamentResponse {
    tournament: TournamentView,
    player: PlayerView,
}

/// POST /api/tournaments/join
async fn join_tournament(
    body: web::Json<JoinTournamentRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<JoinTournamentResponse>, AppError> {
    let req = body.into_inner();
    let token = device_token.0;
    let role = if req.spectator {
        PlayerRole::Spectator
    } else {
        PlayerRole::Player
    };

    let (tournament, player) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = LobbyService::new();
            Ok(service
                .join_tournament(txn, &req.room_code, req.display_name, token, role)
                .await?)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament.id,
        ChangeEvent::insert("players", player.id, 0),
    )
    .await;

    Ok(web::Json(JoinTournamentResponse {
        tournament: TournamentView::from(&tournament),
        player: PlayerView::from(&player),
    }))
}

#[derive(Serialize)]
struct TournamentStateResponse {
    tournament: TournamentView,
    teams: Vec<TeamView>,
    roster: Vec<PlayerView>,
    games: Vec<GameView>,
}

/// GET /api/tournaments/{id}
///
/// Full reconciliation read: consumers re-fetch this after change events.
async fn get_tournament(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentStateResponse>, AppError> {
    let tournament_id = path.into_inner();

    let (tournament, teams, roster, games) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let tournament =
                crate::repos::tournaments::require_tournament(txn, tournament_id).await?;
            let teams = crate::repos::teams::list_by_tournament(txn, tournament_id).await?;
            let roster = crate::repos::players::list_by_tournament(txn, tournament_id).await?;
            let games = crate::repos::games::list_by_tournament(txn, tournament_id).await?;
            Ok((tournament, teams, roster, games))
        })
    })
    .await?;

    Ok(web::Json(TournamentStateResponse {
        tournament: TournamentView::from(&tournament),
        teams: teams.iter().map(TeamView::from).collect(),
        roster: roster.iter().map(PlayerView::from).collect(),
        games: games.iter().map(GameView::from).collect(),
    }))
}

#[derive(Serialize)]
struct TeamPointsResponse {
    teams: Vec<TeamView>,
}

/// POST /api/tournaments/{id}/teams/points
///
/// Recompute both totals from rows. Safe to call repeatedly.
async fn update_team_points(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamPointsResponse>, AppError> {
    let tournament_id = path.into_inner();
    let token = device_token.0;

    let teams = with_txn(&app_state, |txn| {
        Box::pin(async move {
            require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            service.update_team_points(txn, tournament_id).await?;
            Ok(crate::repos::teams::list_by_tournament(txn, tournament_id).await?)
        })
    })
    .await?;

    for team in &teams {
        notify(
            &app_state,
            tournament_id,
            ChangeEvent::update("teams", team.id, 0),
        )
        .await;
    }

    Ok(web::Json(TeamPointsResponse {
        teams: teams.iter().map(TeamView::from).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/tournaments").route(web::post().to(create_tournament)));
    cfg.service(web::resource("/api/tournaments/join").route(web::post().to(join_tournament)));
    cfg.service(web::resource("/api/tournaments/{id}").route(web::get().to(get_tournament)));
    cfg.service(
        web::resource("/api/tournaments/{id}/teams/points")
            .route(web::post().to(update_team_points)),
    );
}
