//! Repository layer: domain models over the SeaORM adapters.
//!
//! Functions here return DomainError; DbErr is mapped at this boundary.

pub mod game_types;
pub mod games;
pub mod players;
pub mod stats;
pub mod teams;
pub mod titles;
pub mod tournaments;
