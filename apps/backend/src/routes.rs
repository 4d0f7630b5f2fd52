use actix_web::web;
use sea_orm::ConnectionTrait;
use tracing::warn;

use crate::error::AppError;
use crate::repos::players::{self, Player};
use crate::state::app_state::AppState;
use crate::ws::protocol::ChangeEvent;

pub mod draft;
pub mod games;
pub mod picks;
pub mod realtime;
pub mod session;
pub mod tournaments;
pub mod views;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .configure(session::configure_routes)
        .configure(tournaments::configure_routes)
        .configure(draft::configure_routes)
        .configure(picks::configure_routes)
        .configure(games::configure_routes)
        .configure(realtime::configure_routes);
}

/// Resolve the caller's identity within a tournament from the device token.
pub(crate) async fn require_identity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    device_token: &str,
) -> Result<Player, AppError> {
    players::find_by_tournament_and_token(conn, tournament_id, device_token)
        .await?
        .ok_or_else(|| AppError::forbidden("No identity in this tournament for this device"))
}

/// Best-effort change notification, sent after the transaction committed.
/// A lost event is not an error: consumers reconcile on the next event or on
/// reconnect, so the committed mutation stands either way.
pub(crate) async fn notify(state: &AppState, tournament_id: i64, event: ChangeEvent) {
    if let Some(broker) = state.broker() {
        if let Err(err) = broker.publish_change(tournament_id, &event).await {
            warn!(
                tournament_id,
                error = %err,
                "Change notification dropped"
            );
        }
    }
}
