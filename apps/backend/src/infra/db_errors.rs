//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers can then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("tournaments_room_code_key") {
        return Some((ConflictKind::RoomCodeConflict, "Room code already exists"));
    }
    if error_msg.contains("games_tournament_game_type_key")
        || error_msg.contains("games_tournament_round_no_key")
    {
        return Some((
            ConflictKind::PickTaken,
            "Another pick already landed for this round or catalog entry",
        ));
    }
    if error_msg.contains("titles_game_id_name_key") {
        return Some((
            ConflictKind::TitlesAlreadyComputed,
            "A title set already exists for this game",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            // Try to parse structured version info written by the adapters
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Resource was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Resource was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");

        if let Some((kind, detail)) = map_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = map_db_err(sea_orm::DbErr::RecordNotFound("nope".into()));
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }

    #[test]
    fn structured_lock_payload_maps_to_optimistic_lock() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "OPTIMISTIC_LOCK:{\"expected\":3,\"actual\":5}".into(),
        ));
        match err {
            DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                assert!(detail.contains("expected version 3"));
                assert!(detail.contains("actual version 5"));
            }
            other => panic!("expected optimistic lock conflict, got {other:?}"),
        }
    }

    #[test]
    fn pick_unique_violation_maps_to_pick_taken() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "error SQLSTATE(23505): duplicate key value violates unique constraint \"games_tournament_round_no_key\"".into(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::PickTaken, _)
        ));
    }

    #[test]
    fn titles_unique_violation_maps_to_already_computed() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "error SQLSTATE(23505): duplicate key value violates unique constraint \"titles_game_id_name_key\"".into(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::TitlesAlreadyComputed, _)
        ));
    }
}
