//! Sequential reveal cursor over computed titles.
//!
//! The cursor is shared: it lives on the game row and only ever moves
//! forward, one step at a time, through a conditional write. Auto-advance is
//! a client-side timer (the constant below is the contract interval); the
//! first manual tap disables it for that viewing session. Either path ends
//! up proposing the same guarded increment here.

use std::time::Duration;

use crate::errors::domain::{DomainError, ValidationKind};

/// Interval between automatic reveal steps while auto-advance is enabled.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(4);

/// Validate a proposed cursor advance and return the next index.
///
/// The cursor ranges over `0 ..= titles_len`; `reveal_complete` holds exactly
/// when the index equals the title count. Advancing a complete cursor is a
/// range error, so the cursor is monotonic and bounded.
pub fn next_reveal_index(current: i16, titles_len: usize) -> Result<i16, DomainError> {
    let len = titles_len as i16;
    if current < 0 || current > len {
        return Err(DomainError::validation(
            ValidationKind::RevealOutOfRange,
            format!("Reveal index {current} outside 0..={len}"),
        ));
    }
    if current == len {
        return Err(DomainError::validation(
            ValidationKind::RevealOutOfRange,
            "Reveal already complete",
        ));
    }
    Ok(current + 1)
}

pub fn reveal_complete(index: i16, titles_len: usize) -> bool {
    index as usize == titles_len
}

/// Per-viewing-session cursor model used by clients.
///
/// Mirrors the shared row cursor but additionally tracks the auto-advance
/// flag, which is local to a viewing session and permanently disabled by the
/// first manual tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCursor {
    index: i16,
    total: usize,
    auto_advance: bool,
}

impl RevealCursor {
    pub fn new(index: i16, total: usize) -> Self {
        Self {
            index: index.clamp(0, total as i16),
            total,
            auto_advance: true,
        }
    }

    pub fn index(&self) -> i16 {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        reveal_complete(self.index, self.total)
    }

    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_advance
    }

    /// Delay before the next automatic step, or `None` once a manual tap has
    /// disabled the timer.
    pub fn auto_advance_interval(&self) -> Option<Duration> {
        self.auto_advance.then_some(AUTO_ADVANCE_INTERVAL)
    }

    /// Timer tick: advances only while auto-advance is still enabled.
    pub fn auto_tick(self) -> Self {
        if !self.auto_advance {
            return self;
        }
        self.step()
    }

    /// Manual tap: permanently disables auto-advance for this session and
    /// advances once.
    pub fn tap(self) -> Self {
        Self {
            auto_advance: false,
            ..self.step()
        }
    }

    fn step(self) -> Self {
        let index = match next_reveal_index(self.index, self.total) {
            Ok(next) => next,
            Err(_) => self.index,
        };
        Self { index, ..self }
    }
}
