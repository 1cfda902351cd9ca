#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Animations are advanced explicitly by the host's frame callback through
//! [`Animation::tick`]; nothing here reads a clock.

pub mod spring;

use std::time::Duration;

pub use spring::Spring;

/// A value that evolves over frame ticks.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has settled.
    fn is_complete(&self) -> bool;

    /// Current animated value, in the animation's own units.
    fn value(&self) -> f64;
}
