//! Pick rotation routes: tie-break, pick state, game picks, custom games.

use actix_web::{web, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::rotation::PickState;
use crate::error::AppError;
use crate::extractors::device_token::DeviceToken;
use crate::routes::views::GameView;
use crate::routes::{notify, require_identity};
use crate::services::flow::{TieBreakOutcome, TournamentFlowService};
use crate::state::app_state::AppState;
use crate::ws::protocol::ChangeEvent;

/// POST /api/tournaments/{id}/picks/tiebreak
async fn roll_tiebreak(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TieBreakOutcome>, AppError> {
    let tournament_id = path.into_inner();
    let token = device_token.0;

    let outcome = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let acting = require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service.roll_tiebreak(txn, tournament_id, acting.id).await?)
        })
    })
    .await?;

    if outcome.newly_rolled {
        notify(
            &app_state,
            tournament_id,
            ChangeEvent::update("tournaments", tournament_id, 0),
        )
        .await;
    }

    Ok(web::Json(outcome))
}

#[derive(Serialize)]
struct PickStateResponse {
    #[serde(flatten)]
    phase: crate::domain::rotation::RotationPhase,
    available_game_type_ids: Vec<i64>,
    picked_rounds: Vec<PickedRound>,
}

#[derive(Serialize)]
struct PickedRound {
    game_type_id: i64,
    round_no: i16,
    picked_by_team_id: i64,
}

impl From<PickState> for PickStateResponse {
    fn from(state: PickState) -> Self {
        Self {
            phase: state.phase,
            available_game_type_ids: state.available_game_type_ids.clone(),
            picked_rounds: state
                .picked
                .iter()
                .map(|p| PickedRound {
                    game_type_id: p.game_type_id,
                    round_no: p.round_no,
                    picked_by_team_id: p.picked_by_team_id,
                })
                .collect(),
        }
    }
}

/// GET /api/tournaments/{id}/picks
async fn get_pick_state(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PickStateResponse>, AppError> {
    let tournament_id = path.into_inner();

    let state = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = TournamentFlowService::new();
            Ok(service.pick_state(txn, tournament_id).await?)
        })
    })
    .await?;

    Ok(web::Json(PickStateResponse::from(state)))
}

#[derive(Deserialize)]
struct PickGameRequest {
    game_type_id: i64,
}

/// POST /api/tournaments/{id}/picks/game
async fn pick_game(
    path: web::Path<i64>,
    body: web::Json<PickGameRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let tournament_id = path.into_inner();
    let req = body.into_inner();
    let token = device_token.0;

    let game = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let acting = require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service
                .pick_game(txn, tournament_id, acting.id, req.game_type_id)
                .await?)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::insert("games", game.id, game.lock_version),
    )
    .await;

    Ok(web::Json(GameView::from(&game)))
}

#[derive(Deserialize)]
struct CustomGameRequest {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Serialize)]
struct CustomGameResponse {
    id: i64,
    name: String,
    description: String,
    is_custom: bool,
}

/// POST /api/tournaments/{id}/picks/custom
async fn create_custom_game(
    path: web::Path<i64>,
    body: web::Json<CustomGameRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CustomGameResponse>, AppError> {
    let tournament_id = path.into_inner();
    let req = body.into_inner();
    let token = device_token.0;

    let game_type = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let acting = require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service
                .create_custom_game(txn, tournament_id, acting.id, req.name, req.description)
                .await?)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::insert("game_types", game_type.id, 0),
    )
    .await;

    Ok(web::Json(CustomGameResponse {
        id: game_type.id,
        name: game_type.name,
        description: game_type.description,
        is_custom: game_type.is_custom,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/tournaments/{id}/picks/tiebreak")
            .route(web::post().to(roll_tiebreak)),
    );
    cfg.service(web::resource("/api/tournaments/{id}/picks").route(web::get().to(get_pick_state)));
    cfg.service(
        web::resource("/api/tournaments/{id}/picks/game").route(web::post().to(pick_game)),
    );
    cfg.service(
        web::resource("/api/tournaments/{id}/picks/custom")
            .route(web::post().to(create_custom_game)),
    );
}
