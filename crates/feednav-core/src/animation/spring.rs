#![forbid(unsafe_code)]

//! Damped spring used to return a cancelled pull to rest.
//!
//! Semi-implicit Euler integration of
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Positions are in surface pixels, so the rest thresholds are pixel-sized
//! rather than normalized.
//!
//! # Invariants
//!
//! 1. A spring at rest stays at rest; `tick` is then a no-op.
//! 2. When it comes to rest the position snaps exactly onto the target.
//! 3. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//!
//! # Failure Modes
//!
//! - Long frames (tab in background): `dt` is split into steps of at most
//!   [`MAX_STEP_SECS`] so high stiffness values stay stable.

use std::time::Duration;

use super::Animation;

/// Largest single integration step (4ms).
pub const MAX_STEP_SECS: f64 = 0.004;

/// Lower bound on stiffness; below it the spring never converges.
pub const MIN_STIFFNESS: f64 = 0.1;

const DEFAULT_REST_DISTANCE: f64 = 0.5;
const DEFAULT_REST_VELOCITY: f64 = 5.0;

/// Stiffness used for pull snap-back.
pub const SNAP_BACK_STIFFNESS: f64 = 320.0;

#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_distance: f64,
    rest_velocity: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring starting at `initial`, heading for `target`.
    ///
    /// Defaults: stiffness 170, damping 26 (slightly underdamped).
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            stiffness: 170.0,
            damping: 26.0,
            rest_distance: DEFAULT_REST_DISTANCE,
            rest_velocity: DEFAULT_REST_VELOCITY,
            at_rest: initial == target,
        }
    }

    /// Critically damped return from `from` to zero: no overshoot past the
    /// resting edge.
    #[must_use]
    pub fn snap_back(from: f64) -> Self {
        Self::new(from, 0.0)
            .with_stiffness(SNAP_BACK_STIFFNESS)
            .critically_damped()
    }

    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set damping to `2√k` for the current stiffness.
    #[must_use]
    pub fn critically_damped(mut self) -> Self {
        self.damping = self.critical_damping();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }
        if (self.position - self.target).abs() < self.rest_distance
            && self.velocity.abs() < self.rest_velocity
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }
}
