use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::ws::hub::RealtimeBroker;

/// Application state containing shared resources.
///
/// Not `Clone`: the dev-dependency `mock` feature of sea-orm removes
/// `Clone` from `DatabaseConnection`, and callers share this via
/// `web::Data` anyway.
pub struct AppState {
    pub db: DatabaseConnection,
    /// Realtime broker; absent in unit tests that never publish.
    broker: Option<Arc<RealtimeBroker>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, broker: Arc<RealtimeBroker>) -> Self {
        Self {
            db,
            broker: Some(broker),
        }
    }

    pub fn without_broker(db: DatabaseConnection) -> Self {
        Self { db, broker: None }
    }

    pub fn broker(&self) -> Option<&Arc<RealtimeBroker>> {
        self.broker.as_ref()
    }
}
