//! SeaORM adapters, generic over ConnectionTrait.
//!
//! Adapter functions return DbErr; the repos layer maps to DomainError.
//! Guarded writes (lock version, write-once columns, conditional flips) all
//! live here so every at-most-once rule is enforced by the database, not by
//! whoever happened to read first.

pub mod game_types_sea;
pub mod games_sea;
pub mod players_sea;
pub mod stats_sea;
pub mod teams_sea;
pub mod titles_sea;
pub mod tournaments_sea;
