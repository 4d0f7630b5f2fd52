//! Session recovery route.

use actix_web::{web, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::device_token::DeviceToken;
use crate::routes::views::{GameView, PlayerView, TeamView, TournamentView};
use crate::services::session::{RecoveredSession, SessionRecoveryService, SessionStatus};
use crate::state::app_state::AppState;

#[derive(Deserialize)]
struct RecoverQuery {
    room_code: String,
}

#[derive(Serialize)]
struct RecoverResponse {
    status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    tournament: Option<TournamentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<PlayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    teams: Option<Vec<TeamView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roster: Option<Vec<PlayerView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    games: Option<Vec<GameView>>,
}

/// GET /api/session/recover?room_code=…
///
/// Terminal `expired` is a successful response, never an error; transport
/// faults surface as 5xx and the client keeps its stored identity to retry.
async fn recover(
    query: web::Query<RecoverQuery>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RecoverResponse>, AppError> {
    let room_code = query.into_inner().room_code;
    let token = device_token.0;

    let recovered = with_txn(&app_state, |txn| {
        let room_code = room_code.clone();
        let token = token.clone();
        Box::pin(async move {
            let service = SessionRecoveryService::new();
            Ok(service.recover(txn, &room_code, &token).await?)
        })
    })
    .await?;

    let response = match recovered {
        RecoveredSession::Expired => RecoverResponse {
            status: SessionStatus::Expired,
            tournament: None,
            player: None,
            teams: None,
            roster: None,
            games: None,
        },
        RecoveredSession::Ready(ctx) => RecoverResponse {
            status: SessionStatus::Ready,
            tournament: Some(TournamentView::from(&ctx.tournament)),
            player: Some(PlayerView::from(&ctx.player)),
            teams: Some(ctx.teams.iter().map(TeamView::from).collect()),
            roster: Some(ctx.roster.iter().map(PlayerView::from).collect()),
            games: Some(ctx.games.iter().map(GameView::from).collect()),
        },
    };

    Ok(web::Json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/session/recover").route(web::get().to(recover)));
}
