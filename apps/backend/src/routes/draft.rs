//! Draft routes: captain selection, picks, state, finish.

use actix_web::{web, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::device_token::DeviceToken;
use crate::routes::views::TournamentView;
use crate::routes::{notify, require_identity};
use crate::services::flow::{DraftState, TournamentFlowService};
use crate::state::app_state::AppState;
use crate::ws::protocol::ChangeEvent;

#[derive(Deserialize)]
struct SelectCaptainsRequest {
    first_captain_id: i64,
    second_captain_id: i64,
}

/// POST /api/tournaments/{id}/draft/captains
async fn select_captains(
    path: web::Path<i64>,
    body: web::Json<SelectCaptainsRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentView>, AppError> {
    let tournament_id = path.into_inner();
    let req = body.into_inner();
    let token = device_token.0;

    let tournament = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let acting = require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service
                .select_captains(
                    txn,
                    tournament_id,
                    acting.id,
                    req.first_captain_id,
                    req.second_captain_id,
                )
                .await?)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("tournaments", tournament_id, tournament.lock_version),
    )
    .await;

    Ok(web::Json(TournamentView::from(&tournament)))
}

#[derive(Deserialize)]
struct DraftPickRequest {
    player_id: i64,
    team_id: i64,
}

/// POST /api/tournaments/{id}/draft/pick
async fn draft_pick(
    path: web::Path<i64>,
    body: web::Json<DraftPickRequest>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentView>, AppError> {
    let tournament_id = path.into_inner();
    let req = body.into_inner();
    let token = device_token.0;

    let tournament = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let acting = require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service
                .draft_player(txn, tournament_id, acting.id, req.player_id, req.team_id)
                .await?)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("tournaments", tournament_id, tournament.lock_version),
    )
    .await;

    Ok(web::Json(TournamentView::from(&tournament)))
}

/// GET /api/tournaments/{id}/draft
async fn get_draft_state(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<DraftState>, AppError> {
    let tournament_id = path.into_inner();

    let state = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = TournamentFlowService::new();
            Ok(service.draft_state(txn, tournament_id).await?)
        })
    })
    .await?;

    Ok(web::Json(state))
}

/// POST /api/tournaments/{id}/draft/finish
async fn finish_draft(
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentView>, AppError> {
    let tournament_id = path.into_inner();
    let token = device_token.0;

    let tournament = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let acting = require_identity(txn, tournament_id, &token).await?;
            let service = TournamentFlowService::new();
            Ok(service.finish_draft(txn, tournament_id, acting.id).await?)
        })
    })
    .await?;

    notify(
        &app_state,
        tournament_id,
        ChangeEvent::update("tournaments", tournament_id, tournament.lock_version),
    )
    .await;

    Ok(web::Json(TournamentView::from(&tournament)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/tournaments/{id}/draft/captains")
            .route(web::post().to(select_captains)),
    );
    cfg.service(
        web::resource("/api/tournaments/{id}/draft/pick").route(web::post().to(draft_pick)),
    );
    cfg.service(
        web::resource("/api/tournaments/{id}/draft").route(web::get().to(get_draft_state)),
    );
    cfg.service(
        web::resource("/api/tournaments/{id}/draft/finish").route(web::post().to(finish_draft)),
    );
}
