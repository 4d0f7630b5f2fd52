//! Domain layer: pure tournament coordination logic.
//!
//! Everything in here is side-effect free and derived from row data. Phases
//! and pick rotation are recomputed from the roster and game rows on every
//! read rather than stored, so local views cannot drift from the authority.

pub mod draft;
pub mod reveal;
pub mod rotation;
pub mod tiebreak;
pub mod titles;

#[cfg(test)]
mod tests_draft;
#[cfg(test)]
mod tests_props_rotation;
#[cfg(test)]
mod tests_reveal;
#[cfg(test)]
mod tests_rotation;
#[cfg(test)]
mod tests_tiebreak;
#[cfg(test)]
mod tests_titles;

// Re-exports for ergonomics
pub use draft::{derive_draft_phase, DraftPhase, RosterPlayer};
pub use rotation::{derive_pick_state, PickState, PickedGame, RotationPhase};
pub use tiebreak::DiceRoll;
pub use titles::{compute_titles, PlayerStat, TitleResult};
