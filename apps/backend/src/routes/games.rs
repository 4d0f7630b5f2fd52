//! Game lifecycle routes: start, complete, stats, titles, reveal, advance.

use actix_web::{web, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::device_token::DeviceToken;
use crate::repos::stats::StatUpsert;
use crate::routes::views::{GameView, TitleView};
use crate::routes::{notify, require_identity};
use crate::services::flow::{AdvanceOutcome, RevealState, TournamentFlowService};
use crate::state::app_state::AppState;
use crate::ws::protocol::ChangeEvent;

/// POST /api/games/{game_id}/start
async fn start_game(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let game_id = path.into_inner();
    let token = device_token.0;

    let game = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let row = crate::repos::games::require_game(txn, game_id).await?;
            let acting = require_identity(txn, row.tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service.start_game(txn, game_id, acting.id).await?)
        })
    })
    .await?;

    notify(
        &app_state,
        game.tournament_id,
        ChangeEvent::update("games", game.id, game.lock_version),
    )
    .await;

    Ok(web::Json(GameView::from(&game)))
}

#[derive(Deserialize)]
struct CompleteGameRequest {
    winning_team_id: i64,
    winner_points: i32,
    loser_points: i32,
}

/// POST /api/games/{game_id}/complete
async fn complete_game(
    path: web::Path<i64>,
    body: web::Json<CompleteGameRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let game_id = path.into_inner();
    let req = body.into_inner();
    let token = device_token.0;

    let game = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let row = crate::repos::games::require_game(txn, game_id).await?;
            let acting = require_identity(txn, row.tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service
                .complete_game(
                    txn,
                    game_id,
                    acting.id,
                    req.winning_team_id,
                    req.winner_points,
                    req.loser_points,
                )
                .await?)
        })
    })
    .await?;

    notify(
        &app_state,
        game.tournament_id,
        ChangeEvent::update("games", game.id, game.lock_version),
    )
    .await;

    Ok(web::Json(GameView::from(&game)))
}

#[derive(Deserialize)]
struct StatLine {
    player_id: i64,
    metric: String,
    value: i32,
}

#[derive(Deserialize)]
struct RecordStatsRequest {
    stats: Vec<StatLine>,
}

/// POST /api/games/{game_id}/stats
async fn record_stats(
    path: web::Path<i64>,
    body: web::Json<RecordStatsRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<serde_json::Value>, AppError> {
    let game_id = path.into_inner();
    let req = body.into_inner();
    let token = device_token.0;

    let tournament_id = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let row = crate::repos::games::require_game(txn, game_id).await?;
            let acting = require_identity(txn, row.tournament_id, &token).await?;
            let lines: Vec<StatUpsert> = req
                .stats
                .into_iter()
                .map(|s| StatUpsert {
                    player_id: s.player_id,
                    metric: s.metric,
                    value: s.value,
                })
                .collect();
            let service = TournamentFlowService::new();
            service.record_stats(txn, game_id, acting.id, lines).await?;
            Ok(row.tournament_id)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("game_stats", game_id, 0),
    )
    .await;

    Ok(web::Json(serde_json::json!({ "recorded": true })))
}

#[derive(Serialize)]
struct TitlesResponse {
    titles: Vec<TitleView>,
}

/// GET /api/games/{game_id}/titles
async fn get_titles(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TitlesResponse>, AppError> {
    let game_id = path.into_inner();

    let titles = with_txn(&app_state, |txn| {
        Box::pin(async move {
            crate::repos::games::require_game(txn, game_id).await?;
            Ok(crate::repos::titles::list_by_game(txn, game_id).await?)
        })
    })
    .await?;

    Ok(web::Json(TitlesResponse {
        titles: titles.iter().map(TitleView::from).collect(),
    }))
}

/// POST /api/games/{game_id}/titles/compute
///
/// Idempotent: returns the persisted set regardless of which caller's
/// compute pass actually landed.
async fn compute_titles(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TitlesResponse>, AppError> {
    let game_id = path.into_inner();
    let token = device_token.0;

    let (tournament_id, titles) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let row = crate::repos::games::require_game(txn, game_id).await?;
            let acting = require_identity(txn, row.tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            let titles = service.compute_titles_once(txn, game_id, acting.id).await?;
            Ok((row.tournament_id, titles))
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("games", game_id, 0),
    )
    .await;

    Ok(web::Json(TitlesResponse {
        titles: titles.iter().map(TitleView::from).collect(),
    }))
}

/// GET /api/games/{game_id}/reveal
async fn get_reveal_state(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RevealState>, AppError> {
    let game_id = path.into_inner();

    let state = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = TournamentFlowService::new();
            Ok(service.reveal_state(txn, game_id).await?)
        })
    })
    .await?;

    Ok(web::Json(state))
}

/// POST /api/games/{game_id}/reveal/advance
async fn advance_reveal(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RevealState>, AppError> {
    let game_id = path.into_inner();
    let token = device_token.0;

    let (tournament_id, state) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let row = crate::repos::games::require_game(txn, game_id).await?;
            let acting = require_identity(txn, row.tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            let state = service.advance_reveal(txn, game_id, acting.id).await?;
            Ok((row.tournament_id, state))
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("games", game_id, 0),
    )
    .await;

    Ok(web::Json(state))
}

/// POST /api/games/{game_id}/advance
async fn advance_to_next_round(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<AdvanceOutcome>, AppError> {
    let game_id = path.into_inner();
    let token = device_token.0;

    let (tournament_id, outcome) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let row = crate::repos::games::require_game(txn, game_id).await?;
            let acting = require_identity(txn, row.tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            let outcome = service.advance_to_next_round(txn, game_id, acting.id).await?;
            Ok((row.tournament_id, outcome))
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("tournaments", tournament_id, 0),
    )
    .await;

    Ok(web::Json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/games/{game_id}/start").route(web::post().to(start_game)));
    cfg.service(
        web::resource("/api/games/{game_id}/complete").route(web::post().to(complete_game)),
    );
    cfg.service(web::resource("/api/games/{game_id}/stats").route(web::post().to(record_stats)));
    cfg.service(web::resource("/api/games/{game_id}/titles").route(web::get().to(get_titles)));
    cfg.service(
        web::resource("/api/games/{game_id}/titles/compute")
            .route(web::post().to(compute_titles)),
    );
    cfg.service(
        web::resource("/api/games/{game_id}/reveal").route(web::get().to(get_reveal_state)),
    );
    cfg.service(
        web::resource("/api/games/{game_id}/reveal/advance")
            .route(web::post().to(advance_reveal)),
    );
    cfg.service(
        web::resource("/api/games/{game_id}/advance")
            .route(web::post().to(advance_to_next_round)),
    );
}
