//! Websocket upgrade route for live tournament change events.

use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::info;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::device_token::DeviceToken;
use crate::routes::require_identity;
use crate::state::app_state::AppState;
use crate::ws::session::TournamentWsSession;

/// GET /api/tournaments/{id}/realtime
///
/// Upgrades to a websocket carrying change events for one tournament. The
/// caller must already hold an identity in that tournament.
async fn realtime(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<i64>,
    device_token: DeviceToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let tournament_id = path.into_inner();
    let token = device_token.0;

    let broker = app_state.broker().ok_or_else(|| {
        AppError::config("Realtime is not configured on this instance (no REDIS_URL)")
    })?;

    let player = with_txn(&app_state, |txn| {
        Box::pin(async move { require_identity(txn, tournament_id, &token).await })
    })
    .await?;

    info!(
        tournament_id,
        player_id = player.id,
        "Opening realtime session"
    );

    let session = TournamentWsSession::new(tournament_id, player.id, broker.registry());
    ws::start(session, &req, stream)
        .map_err(|err| AppError::internal(format!("Websocket upgrade failed: {err}")))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/tournaments/{id}/realtime").route(web::get().to(realtime)));
}
