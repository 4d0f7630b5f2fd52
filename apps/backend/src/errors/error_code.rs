//! Error codes for the Fieldday backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Fieldday backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Identity
    /// Missing or malformed device token
    MissingDeviceToken,
    /// Access denied
    Forbidden,

    // Request Validation
    /// Acting outside of the caller's turn
    OutOfTurn,
    /// Operation not valid in current phase or status
    PhaseMismatch,
    /// Referee role required
    NotReferee,
    /// Active captain required
    NotCaptain,
    /// Current picking team's leader required
    NotLeader,
    /// Player is not eligible for this operation
    IneligiblePlayer,
    /// Player is already assigned to a team
    AlreadyAssigned,
    /// Captain selection needs exactly two distinct players
    CaptainCount,
    /// Catalog entry is not available
    GameUnavailable,
    /// Reveal index advance out of range
    RevealOutOfRange,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Tournament not found
    TournamentNotFound,
    /// Team not found
    TeamNotFound,
    /// Player not found
    PlayerNotFound,
    /// Game not found
    GameNotFound,
    /// Game type not found
    GameTypeNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Room code already exists
    RoomCodeConflict,
    /// Title set already computed for this game
    TitlesAlreadyComputed,
    /// Another pick landed first
    PickTaken,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingDeviceToken => "MISSING_DEVICE_TOKEN",
            Self::Forbidden => "FORBIDDEN",

            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotReferee => "NOT_REFEREE",
            Self::NotCaptain => "NOT_CAPTAIN",
            Self::NotLeader => "NOT_LEADER",
            Self::IneligiblePlayer => "INELIGIBLE_PLAYER",
            Self::AlreadyAssigned => "ALREADY_ASSIGNED",
            Self::CaptainCount => "CAPTAIN_COUNT",
            Self::GameUnavailable => "GAME_UNAVAILABLE",
            Self::RevealOutOfRange => "REVEAL_OUT_OF_RANGE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::TournamentNotFound => "TOURNAMENT_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GameTypeNotFound => "GAME_TYPE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::RoomCodeConflict => "ROOM_CODE_CONFLICT",
            Self::TitlesAlreadyComputed => "TITLES_ALREADY_COMPUTED",
            Self::PickTaken => "PICK_TAKEN",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        // Verify that all error codes produce the expected SCREAMING_SNAKE_CASE strings
        assert_eq!(ErrorCode::MissingDeviceToken.as_str(), "MISSING_DEVICE_TOKEN");
        assert_eq!(ErrorCode::Forbidden.as_str(), "FORBIDDEN");
        assert_eq!(ErrorCode::OutOfTurn.as_str(), "OUT_OF_TURN");
        assert_eq!(ErrorCode::PhaseMismatch.as_str(), "PHASE_MISMATCH");
        assert_eq!(ErrorCode::NotReferee.as_str(), "NOT_REFEREE");
        assert_eq!(ErrorCode::NotCaptain.as_str(), "NOT_CAPTAIN");
        assert_eq!(ErrorCode::NotLeader.as_str(), "NOT_LEADER");
        assert_eq!(ErrorCode::IneligiblePlayer.as_str(), "INELIGIBLE_PLAYER");
        assert_eq!(ErrorCode::AlreadyAssigned.as_str(), "ALREADY_ASSIGNED");
        assert_eq!(ErrorCode::CaptainCount.as_str(), "CAPTAIN_COUNT");
        assert_eq!(ErrorCode::GameUnavailable.as_str(), "GAME_UNAVAILABLE");
        assert_eq!(ErrorCode::RevealOutOfRange.as_str(), "REVEAL_OUT_OF_RANGE");
        assert_eq!(ErrorCode::TournamentNotFound.as_str(), "TOURNAMENT_NOT_FOUND");
        assert_eq!(ErrorCode::TeamNotFound.as_str(), "TEAM_NOT_FOUND");
        assert_eq!(ErrorCode::PlayerNotFound.as_str(), "PLAYER_NOT_FOUND");
        assert_eq!(ErrorCode::GameNotFound.as_str(), "GAME_NOT_FOUND");
        assert_eq!(ErrorCode::GameTypeNotFound.as_str(), "GAME_TYPE_NOT_FOUND");
        assert_eq!(ErrorCode::RoomCodeConflict.as_str(), "ROOM_CODE_CONFLICT");
        assert_eq!(
            ErrorCode::TitlesAlreadyComputed.as_str(),
            "TITLES_ALREADY_COMPUTED"
        );
        assert_eq!(ErrorCode::PickTaken.as_str(), "PICK_TAKEN");
        assert_eq!(ErrorCode::OptimisticLock.as_str(), "OPTIMISTIC_LOCK");
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
        assert_eq!(ErrorCode::DbTimeout.as_str(), "DB_TIMEOUT");
        assert_eq!(ErrorCode::UniqueViolation.as_str(), "UNIQUE_VIOLATION");
        assert_eq!(ErrorCode::RecordNotFound.as_str(), "RECORD_NOT_FOUND");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
        assert_eq!(ErrorCode::DataCorruption.as_str(), "DATA_CORRUPTION");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::OutOfTurn), "OUT_OF_TURN");
        assert_eq!(format!("{}", ErrorCode::OptimisticLock), "OPTIMISTIC_LOCK");
        assert_eq!(
            format!("{}", ErrorCode::TitlesAlreadyComputed),
            "TITLES_ALREADY_COMPUTED"
        );
    }
}
