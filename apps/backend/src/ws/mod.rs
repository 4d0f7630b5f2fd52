//! Realtime change notifications over websockets.

pub mod hub;
pub mod protocol;
pub mod session;
