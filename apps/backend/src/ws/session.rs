//! Websocket session actor for one tournament subscriber.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ws::hub::{ChangeBroadcast, ScopeRegistry};
use crate::ws::protocol::ServerMsg;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub struct TournamentWsSession {
    tournament_id: i64,
    player_id: i64,
    registry: Arc<ScopeRegistry>,
    registration: Option<Uuid>,
    last_heartbeat: Instant,
}

impl TournamentWsSession {
    pub fn new(tournament_id: i64, player_id: i64, registry: Arc<ScopeRegistry>) -> Self {
        Self {
            tournament_id,
            player_id,
            registry,
            registration: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "Failed to serialize outbound ws message"),
        }
    }

    /// Heartbeat timer owned by the actor context; cancelled with the actor.
    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    tournament_id = actor.tournament_id,
                    player_id = actor.player_id,
                    "Websocket heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for TournamentWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let recipient = ctx.address().recipient::<ChangeBroadcast>();
        self.registration = Some(self.registry.register(self.tournament_id, recipient));
        info!(
            tournament_id = self.tournament_id,
            player_id = self.player_id,
            sessions = self.registry.session_count(self.tournament_id),
            "Websocket session started"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(token) = self.registration.take() {
            self.registry.unregister(self.tournament_id, token);
        }
        info!(
            tournament_id = self.tournament_id,
            player_id = self.player_id,
            sessions = self.registry.session_count(self.tournament_id),
            "Websocket session stopped"
        );
    }
}

impl Handler<ChangeBroadcast> for TournamentWsSession {
    type Result = ();

    fn handle(&mut self, msg: ChangeBroadcast, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &ServerMsg::Change(msg.event));
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for TournamentWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            // The stream is one-way; inbound text only refreshes liveness.
            Ok(ws::Message::Text(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        message: "Binary not supported".to_string(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    tournament_id = self.tournament_id,
                    player_id = self.player_id,
                    error = %err,
                    "Websocket protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
