#![forbid(unsafe_code)]

//! Pull-threshold state machine.
//!
//! [`PullMachine`] accumulates overscroll while its boundary holds, exposes a
//! continuous progress value, and decides on release whether the pull was long
//! enough to switch views.
//!
//! # State Machine
//!
//! ```text
//!   Idle ──qualifying delta──▶ Pulling(dir)
//!     ▲                          │  │
//!     │◀── boundary lost ────────┘  │ release
//!     │◀── retracted past zero ─────┤
//!     │                             ▼
//!     └──────── ModeSwitch (|acc| ≥ threshold) / Cancelled (snap back)
//! ```
//!
//! # Invariants
//!
//! 1. `accumulated` carries the sign of the pull direction (`Down` ≥ 0,
//!    `Up` ≤ 0) and is exactly 0 whenever the phase is `Idle`.
//! 2. A release below the threshold never switches, whatever the distance
//!    (no snap-to-nearest).
//! 3. A delta observed while the anchoring boundary no longer holds zeroes
//!    the accumulator immediately; the next pull restarts from 0.
//! 4. Wheel pulls are only considered while `Idle`.

use std::time::Duration;

use crate::animation::{Animation, Spring};
use crate::boundary::{Boundary, BoundaryPolicy, PullDirection};
use crate::config::NavConfig;

/// Thresholds used by one pull machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullConfig {
    pub threshold: f64,
    pub show_indicator_min: f64,
    pub wheel_threshold: f64,
}

impl From<&NavConfig> for PullConfig {
    fn from(cfg: &NavConfig) -> Self {
        Self {
            threshold: cfg.pull_threshold,
            show_indicator_min: cfg.show_indicator_min,
            wheel_threshold: cfg.wheel_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullPhase {
    Idle,
    Pulling(PullDirection),
}

/// Effect of one vertical delta on the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PullUpdate {
    /// Not overscroll; the container scrolls normally.
    PassThrough,
    Started(PullDirection),
    Accumulated(f64),
    /// The pull was walked back to zero by the same gesture.
    Retracted,
    /// The boundary stopped holding; the accumulator was zeroed.
    BoundaryLost,
}

/// Result of releasing a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PullRelease {
    /// Nothing was being pulled.
    Idle,
    ModeSwitch { direction: PullDirection, distance: f64 },
    Cancelled { direction: PullDirection, distance: f64 },
}

/// Per-frame pull indicator state for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PullHint {
    pub direction: Option<PullDirection>,
    /// `|displayed| / threshold`; may exceed 1.
    pub progress: f64,
    pub indicator_visible: bool,
    /// Releasing now would switch.
    pub armed: bool,
}

#[derive(Debug, Clone)]
pub struct PullMachine {
    policy: BoundaryPolicy,
    config: PullConfig,
    phase: PullPhase,
    accumulated: f64,
    snap_back: Option<(PullDirection, Spring)>,
}

impl PullMachine {
    #[must_use]
    pub fn new(policy: BoundaryPolicy, config: PullConfig) -> Self {
        Self {
            policy,
            config,
            phase: PullPhase::Idle,
            accumulated: 0.0,
            snap_back: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> PullPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_pulling(&self) -> bool {
        matches!(self.phase, PullPhase::Pulling(_))
    }

    /// Logical signed pull distance.
    #[inline]
    #[must_use]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Distance to draw: the live pull, or the snap-back animation after a cancel.
    #[must_use]
    pub fn displayed(&self) -> f64 {
        match (&self.phase, &self.snap_back) {
            (PullPhase::Pulling(_), _) => self.accumulated,
            (PullPhase::Idle, Some((_, spring))) => spring.value(),
            (PullPhase::Idle, None) => 0.0,
        }
    }

    /// Whether a snap-back animation is still running.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.snap_back.is_some()
    }

    /// Feed one vertical pointer delta observed at `boundary`.
    ///
    /// A non-finite `dy` passes through without touching the pull.
    pub fn on_delta(&mut self, dy: f64, boundary: Boundary) -> PullUpdate {
        if !dy.is_finite() {
            return PullUpdate::PassThrough;
        }
        match self.phase {
            PullPhase::Idle => match self.policy.qualify(boundary, dy) {
                Some(direction) => {
                    self.snap_back = None;
                    self.phase = PullPhase::Pulling(direction);
                    self.accumulated = dy;
                    PullUpdate::Started(direction)
                }
                None => PullUpdate::PassThrough,
            },
            PullPhase::Pulling(direction) => {
                if !direction.anchored_at(boundary) {
                    self.reset();
                    return PullUpdate::BoundaryLost;
                }
                self.accumulated += dy;
                if self.accumulated * direction.sign() <= 0.0 {
                    self.reset();
                    return PullUpdate::Retracted;
                }
                PullUpdate::Accumulated(self.accumulated)
            }
        }
    }

    /// Boundary observed outside a pointer delta (e.g. a scroll event).
    ///
    /// Zeroes an active pull whose anchoring edge no longer holds.
    pub fn observe_boundary(&mut self, boundary: Boundary) -> bool {
        if let PullPhase::Pulling(direction) = self.phase
            && !direction.anchored_at(boundary)
        {
            self.reset();
            return true;
        }
        false
    }

    /// Decide the outcome of a released gesture.
    pub fn release(&mut self) -> PullRelease {
        let PullPhase::Pulling(direction) = self.phase else {
            return PullRelease::Idle;
        };
        let distance = self.accumulated.abs();
        if distance >= self.config.threshold {
            self.reset();
            PullRelease::ModeSwitch {
                direction,
                distance,
            }
        } else {
            self.begin_snap_back(direction);
            PullRelease::Cancelled {
                direction,
                distance,
            }
        }
    }

    /// Abandon the pull (gesture cancelled or claimed by a swipe), animating back.
    pub fn cancel(&mut self) -> Option<f64> {
        let PullPhase::Pulling(direction) = self.phase else {
            return None;
        };
        let distance = self.accumulated.abs();
        self.begin_snap_back(direction);
        Some(distance)
    }

    /// Interpret a wheel notch as an instantaneous full pull.
    ///
    /// `delta_y` uses the DOM convention (negative scrolls toward the top), so
    /// a large negative delta at the top is a downward pull.
    #[must_use]
    pub fn wheel(&self, delta_y: f64, boundary: Boundary) -> Option<PullDirection> {
        if self.is_pulling() || delta_y.abs() <= self.config.wheel_threshold {
            return None;
        }
        self.policy.qualify(boundary, -delta_y)
    }

    /// Advance the snap-back animation.
    pub fn tick(&mut self, dt: Duration) {
        if let Some((_, spring)) = self.snap_back.as_mut() {
            spring.tick(dt);
            if spring.is_complete() {
                self.snap_back = None;
            }
        }
    }

    /// Zero everything immediately, without animation.
    pub fn reset(&mut self) {
        self.phase = PullPhase::Idle;
        self.accumulated = 0.0;
        self.snap_back = None;
    }

    #[must_use]
    pub fn hint(&self) -> PullHint {
        let displayed = self.displayed();
        let direction = match (&self.phase, &self.snap_back) {
            (PullPhase::Pulling(d), _) => Some(*d),
            (PullPhase::Idle, Some((d, _))) => Some(*d),
            (PullPhase::Idle, None) => None,
        };
        PullHint {
            direction,
            progress: displayed.abs() / self.config.threshold,
            indicator_visible: displayed.abs() >= self.config.show_indicator_min,
            armed: self.is_pulling() && self.accumulated.abs() >= self.config.threshold,
        }
    }

    fn begin_snap_back(&mut self, direction: PullDirection) {
        let from = self.accumulated;
        self.phase = PullPhase::Idle;
        self.accumulated = 0.0;
        self.snap_back =
            (from != 0.0 && from.is_finite()).then(|| (direction, Spring::snap_back(from)));
    }
}
