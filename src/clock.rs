//! Window Clock
//!
//! Supplies "now" in unix seconds and derives the lower bound of the first
//! window of a session from the configured horizon.

use std::sync::Arc;

/// Source of the current time, in whole unix seconds
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        // Round rather than truncate, matching how the list UI derived the bound
        // from millisecond time.
        let millis = chrono::Utc::now().timestamp_millis();
        (millis + 500).div_euclid(1000)
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// Computes window bounds relative to a clock
#[derive(Clone)]
pub struct WindowClock {
    clock: Arc<dyn Clock>,
    horizon_seconds: i64,
}

impl WindowClock {
    pub fn new(clock: Arc<dyn Clock>, horizon_seconds: u64) -> Self {
        Self {
            clock,
            horizon_seconds: i64::try_from(horizon_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Wall-clock window clock
    pub fn system(horizon_seconds: u64) -> Self {
        Self::new(Arc::new(SystemClock), horizon_seconds)
    }

    pub fn now_secs(&self) -> i64 {
        self.clock.now_secs()
    }

    pub fn horizon_seconds(&self) -> i64 {
        self.horizon_seconds
    }

    /// Lower bound of the first window: `now - horizon`
    pub fn initial_min_updated_at(&self) -> i64 {
        self.now_secs().saturating_sub(self.horizon_seconds)
    }

    /// Lower bound of the window immediately older than the one starting at `min_updated_at`
    pub fn previous_window(&self, min_updated_at: i64) -> i64 {
        min_updated_at.saturating_sub(self.horizon_seconds)
    }
}

impl std::fmt::Debug for WindowClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowClock")
            .field("now_secs", &self.clock.now_secs())
            .field("horizon_seconds", &self.horizon_seconds)
            .finish()
    }
}
