//! Redis-backed change broker plus the per-tournament session registry.
//!
//! Mutating handlers publish a `ChangeEvent` to `tournament:{id}` after their
//! transaction commits; a background subscriber task fans the event out to
//! every websocket session registered for that tournament. Running the fanout
//! through redis keeps multiple backend instances in sync.

use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use dashmap::DashMap;
use rand::random;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::ws::protocol::ChangeEvent;

/// Actor message carrying one change event to a session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct ChangeBroadcast {
    pub event: ChangeEvent,
}

/// Connection registry keyed by tournament scope.
#[derive(Default)]
pub struct ScopeRegistry {
    sessions: DashMap<i64, DashMap<Uuid, Recipient<ChangeBroadcast>>>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn register(&self, tournament_id: i64, recipient: Recipient<ChangeBroadcast>) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self.sessions.entry(tournament_id).or_default();
        entry.insert(token, recipient);
        token
    }

    pub fn unregister(&self, tournament_id: i64, token: Uuid) {
        if let Some(entry) = self.sessions.get(&tournament_id) {
            entry.remove(&token);
            if entry.is_empty() {
                drop(entry);
                self.sessions.remove_if(&tournament_id, |_, v| v.is_empty());
            }
        }
    }

    pub fn broadcast(&self, tournament_id: i64, message: ChangeBroadcast) {
        if let Some(entry) = self.sessions.get(&tournament_id) {
            for recipient in entry.iter() {
                recipient.value().do_send(message.clone());
            }
        }
    }

    pub fn session_count(&self, tournament_id: i64) -> usize {
        self.sessions
            .get(&tournament_id)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }
}

// Publisher retry configuration (HTTP request path)
const PUBLISHER_MAX_ATTEMPTS: u32 = 3;
const PUBLISHER_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PUBLISHER_MAX_RETRY_DELAY_MS: u64 = 200;

// Subscriber retry configuration (background task)
const SUBSCRIBER_INITIAL_RETRY_DELAY_SECS: u64 = 1;
const SUBSCRIBER_MAX_RETRY_DELAY_SECS: u64 = 60;
const SUBSCRIBER_JITTER_PERCENT: f64 = 0.2;

pub struct RealtimeBroker {
    registry: Arc<ScopeRegistry>,
    publisher: Mutex<ConnectionManager>,
}

impl RealtimeBroker {
    pub async fn connect(redis_url: &str) -> Result<Arc<Self>, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let manager = ConnectionManager::new(client.clone()).await.map_err(|err| {
            AppError::internal(format!("Unable to initialize Redis connection manager: {err}"))
        })?;

        let registry = Arc::new(ScopeRegistry::new());
        let broker = Arc::new(Self {
            registry: registry.clone(),
            publisher: Mutex::new(manager),
        });

        spawn_subscriber(client, registry);

        Ok(broker)
    }

    pub fn registry(&self) -> Arc<ScopeRegistry> {
        self.registry.clone()
    }

    /// Publish one change event on the tournament's channel, with a short
    /// bounded retry. Failures after the retries bubble up; callers decide
    /// whether a lost notification is fatal (it usually is not, clients
    /// reconcile on the next event or reconnect).
    pub async fn publish_change(
        &self,
        tournament_id: i64,
        event: &ChangeEvent,
    ) -> Result<(), AppError> {
        let encoded = serde_json::to_string(event).map_err(|err| {
            AppError::internal(format!("Failed to serialize change event: {err}"))
        })?;
        let channel = format!("tournament:{tournament_id}");

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let publish_res = {
                let mut publisher = self.publisher.lock().await;
                publisher
                    .publish::<_, _, ()>(channel.clone(), encoded.clone())
                    .await
            };

            match publish_res {
                Ok(()) => return Ok(()),
                Err(err) => {
                    if attempt >= PUBLISHER_MAX_ATTEMPTS {
                        return Err(AppError::internal(format!(
                            "Failed to publish change event to Redis: {err}"
                        )));
                    }
                    let delay_ms = PUBLISHER_INITIAL_RETRY_DELAY_MS
                        .saturating_mul(2_u64.pow(attempt - 1))
                        .min(PUBLISHER_MAX_RETRY_DELAY_MS);
                    warn!(
                        error = %err,
                        attempt,
                        retry_delay_ms = delay_ms,
                        "Redis publish failed, retrying"
                    );
                    sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

fn spawn_subscriber(client: Client, registry: Arc<ScopeRegistry>) {
    tokio::spawn(async move {
        run_subscription_loop_with_retry(client, registry).await;
    });
}

fn subscriber_retry_delay(attempt: u32) -> Duration {
    let base = SUBSCRIBER_INITIAL_RETRY_DELAY_SECS as f64 * 2f64.powi(attempt as i32 - 1);
    let capped = base.min(SUBSCRIBER_MAX_RETRY_DELAY_SECS as f64);
    let jitter = (random::<f64>() * 2.0 - 1.0) * capped * SUBSCRIBER_JITTER_PERCENT;
    Duration::from_secs_f64((capped + jitter).max(0.1))
}

async fn run_subscription_loop_with_retry(client: Client, registry: Arc<ScopeRegistry>) {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match run_subscription_loop(&client, registry.clone()).await {
            Ok(()) => {
                info!("Redis subscription loop completed normally");
                break;
            }
            Err(err) => {
                let delay = subscriber_retry_delay(attempt);
                warn!(
                    error = %err,
                    attempt,
                    retry_delay_secs = delay.as_secs_f64(),
                    "Redis subscription failed, retrying"
                );
                sleep(delay).await;
                // Keep the exponent bounded on long outages.
                if attempt >= 20 {
                    attempt = 10;
                }
            }
        }
    }
}

async fn run_subscription_loop(
    client: &Client,
    registry: Arc<ScopeRegistry>,
) -> Result<(), AppError> {
    let mut pubsub = client.get_async_pubsub().await.map_err(|err| {
        AppError::internal(format!("Unable to connect to Redis for subscription: {err}"))
    })?;

    pubsub.psubscribe("tournament:*").await.map_err(|err| {
        AppError::internal(format!(
            "Failed to subscribe to Redis channel pattern tournament:*: {err}"
        ))
    })?;

    info!("Redis subscription established, processing messages");

    let mut stream = pubsub.into_on_message();
    while let Some(msg) = stream.next().await {
        let Ok(channel) = msg.get_channel::<String>() else {
            continue;
        };
        let Ok(payload) = msg.get_payload::<String>() else {
            continue;
        };

        let Some(tournament_id) = parse_tournament_channel(&channel) else {
            warn!(channel = %channel, "Change event on unexpected channel");
            continue;
        };

        match serde_json::from_str::<ChangeEvent>(&payload) {
            Ok(event) => {
                registry.broadcast(tournament_id, ChangeBroadcast { event });
            }
            Err(err) => {
                error!(
                    error = %err,
                    channel = %channel,
                    "Failed to decode Redis change payload"
                );
            }
        }
    }

    warn!("Redis subscription stream ended, connection lost");
    Err(AppError::internal(
        "Redis subscription stream ended unexpectedly",
    ))
}

fn parse_tournament_channel(channel: &str) -> Option<i64> {
    let mut parts = channel.split(':');
    if parts.next()? != "tournament" {
        return None;
    }
    parts.next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tournament_channels_only() {
        assert_eq!(parse_tournament_channel("tournament:42"), Some(42));
        assert_eq!(parse_tournament_channel("tournament:abc"), None);
        assert_eq!(parse_tournament_channel("game:42"), None);
        assert_eq!(parse_tournament_channel("tournament"), None);
    }

    #[test]
    fn retry_delay_is_bounded() {
        for attempt in 1..=30 {
            let delay = subscriber_retry_delay(attempt);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_secs(SUBSCRIBER_MAX_RETRY_DELAY_SECS + 13));
        }
    }
}
