#![forbid(unsafe_code)]

//! Deterministic fixtures: a manual clock and seed selection.
//!
//! Every timestamp the simulator hands to the coordinator comes from a
//! [`SimClock`], so a script produces the same frames on every run regardless
//! of machine speed.

use std::time::Duration;

use web_time::Instant;

/// One display frame at 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

/// Manually advanced monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    epoch: Instant,
    elapsed: Duration,
}

impl SimClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(epoch: Instant) -> Self {
        Self {
            epoch,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    #[must_use]
    pub fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Nanoseconds since the epoch, saturating.
    #[must_use]
    pub fn elapsed_ns(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }

    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Choose a seed from `FEEDNAV_SEED` or use the provided default.
#[must_use]
pub fn fixture_seed(default_seed: u64) -> u64 {
    env_u64("FEEDNAV_SEED")
        .or_else(|| env_u64("E2E_SEED"))
        .unwrap_or(default_seed)
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
