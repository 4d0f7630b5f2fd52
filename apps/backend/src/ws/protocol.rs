//! Wire protocol for the tournament change stream.
//!
//! Events are intentionally thin: they say *that* a row changed, not what
//! changed. Delivery is at-least-once and best-effort-ordered, so consumers
//! reconcile by re-fetching the row by id (last write wins) instead of
//! applying deltas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One change notification within a tournament scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub table: String,
    pub row_id: i64,
    /// Row lock_version where the table carries one, 0 otherwise. Useful for
    /// consumers to drop notifications older than what they already hold.
    pub version: i32,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, table: impl Into<String>, row_id: i64, version: i32) -> Self {
        Self {
            kind,
            table: table.into(),
            row_id,
            version,
        }
    }

    pub fn insert(table: impl Into<String>, row_id: i64, version: i32) -> Self {
        Self::new(ChangeKind::Insert, table, row_id, version)
    }

    pub fn update(table: impl Into<String>, row_id: i64, version: i32) -> Self {
        Self::new(ChangeKind::Update, table, row_id, version)
    }
}

/// Messages the server pushes down a session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Change(ChangeEvent),
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_event_wire_shape() {
        let event = ChangeEvent::update("tournaments", 7, 3);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "update");
        assert_eq!(json["table"], "tournaments");
        assert_eq!(json["row_id"], 7);
        assert_eq!(json["version"], 3);
    }

    #[test]
    fn server_msg_is_tagged() {
        let msg = ServerMsg::Change(ChangeEvent::insert("games", 1, 1));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "change");
    }
}
