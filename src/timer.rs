//! Turn timing for search time management.
//!
//! The search polls [`TurnTimer::is_expired`]; nothing interrupts it
//! preemptively.

use std::time::Instant;

/// Default share of the remaining clock spent on one move.
pub const DEFAULT_TIME_DIVISOR: u64 = 30;

/// Per-turn limit when `remaining_ms` is left on the clock.
#[inline]
#[must_use]
pub fn allocate_turn_time(remaining_ms: u64, divisor: u64) -> u64 {
    remaining_ms / divisor.max(1)
}

/// Clock for one move-selection call.
#[derive(Clone, Copy, Debug)]
pub struct TurnTimer {
    start: Instant,
    limit_ms: u64,
    clock_ms: u64,
}

impl TurnTimer {
    /// Start timing a turn with `clock_ms` left in the game and
    /// `limit_ms` allowed for this move.
    #[must_use]
    pub fn start(clock_ms: u64, limit_ms: u64) -> Self {
        TurnTimer {
            start: Instant::now(),
            limit_ms,
            clock_ms,
        }
    }

    /// Milliseconds elapsed since the turn started.
    #[inline]
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Milliseconds left on the game clock.
    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        self.clock_ms.saturating_sub(self.elapsed_ms())
    }

    #[must_use]
    pub fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    /// True once more than the per-turn limit has elapsed.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.elapsed_ms() > self.limit_ms
    }
}
