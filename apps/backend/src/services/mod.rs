//! Service layer: validation and guarded writes over the repos.
//!
//! Services are trust boundaries. They load their own validation data inside
//! the caller's transaction and never rely on client-provided state for
//! legality checks.

pub mod flow;
pub mod lobby;
pub mod session;
