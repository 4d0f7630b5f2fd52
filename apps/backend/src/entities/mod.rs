pub mod game_stats;
pub mod game_types;
pub mod games;
pub mod players;
pub mod teams;
pub mod titles;
pub mod tournaments;
