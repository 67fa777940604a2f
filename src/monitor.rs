//! Wall-clock budget for a solve.
//!
//! Solvers poll the budget cooperatively: the greedy pass every few
//! orders, the genetic loop once per generation. [`TimeBudget::poll`]
//! only reads the clock when `step & clock_check_mask == 0`, so hot loops
//! can call it on every step.

use std::time::{Duration, Instant};

/// Overall budget used by the picking challenge (10 minutes).
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(600);

/// A fixed wall-clock budget starting at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
    clock_check_mask: u64,
}

impl TimeBudget {
    /// Check the clock every 1024 steps.
    const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x3FF;

    /// Creates a budget of `limit` starting now.
    pub fn new(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    /// Creates a budget of `limit` that started at `start`.
    pub fn starting_at(start: Instant, limit: Duration) -> Self {
        Self {
            start,
            limit: Some(limit),
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
        }
    }

    /// The 10-minute challenge budget, starting now.
    pub fn challenge_default() -> Self {
        Self::new(DEFAULT_TIME_LIMIT)
    }

    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            limit: None,
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
        }
    }

    /// Sets how often [`poll`](Self::poll) reads the clock. Use `2^k - 1`.
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    /// Time since the budget started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left, or `None` for an unlimited budget.
    pub fn remaining(&self) -> Option<Duration> {
        self.limit.map(|limit| limit.saturating_sub(self.elapsed()))
    }

    /// Whole seconds left, saturating at 0. `u64::MAX` when unlimited.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining().map_or(u64::MAX, |d| d.as_secs())
    }

    /// Whether the budget is spent.
    pub fn is_exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Masked check for hot loops: reads the clock only on masked steps.
    #[inline]
    pub fn poll(&self, step: u64) -> bool {
        (step & self.clock_check_mask) == 0 && self.is_exhausted()
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::challenge_default()
    }
}
