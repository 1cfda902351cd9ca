#![forbid(unsafe_code)]

//! One scrollable surface and its gesture components.
//!
//! A [`Surface`] owns a pointer tracker, a pull machine, a swipe classifier and
//! a header controller, plus the last [`ScrollPosition`] the host reported. It
//! routes each [`GestureEvent`] to the components that care and reports the
//! discrete result as a [`GestureOutcome`].
//!
//! # Invariants
//!
//! 1. For one gesture, at most one of `TabSwipe` and `ModeSwitch` is returned;
//!    the swipe decision is taken first, on release.
//! 2. Scroll events only touch the header and the boundary observation; pointer
//!    and wheel events never touch the header.
//! 3. Wheel input never pulls while a live pointer session is open.
//! 4. Events carrying NaN or infinite values are ignored before any
//!    component sees them.

use std::time::Duration;

use web_time::Instant;

use crate::boundary::{Boundary, BoundaryPolicy, PullDirection, ScrollPosition, classify};
use crate::config::NavConfig;
use crate::event::{CancelReason, GestureEvent};
use crate::geometry::Delta;
use crate::header::HeaderController;
use crate::pointer::{IgnoredReason, PointerDispatch, PointerTracker};
use crate::pull::{PullConfig, PullHint, PullMachine, PullRelease};
use crate::swipe::{SwipeClassifier, SwipeDirection};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which view a surface belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SurfaceKind {
    Feed,
    Grid,
}

impl SurfaceKind {
    /// The feed reveals the grid by pulling down at the top; the grid is
    /// dismissed from either end.
    #[must_use]
    pub const fn policy(self) -> BoundaryPolicy {
        match self {
            Self::Feed => BoundaryPolicy::TopOnly,
            Self::Grid => BoundaryPolicy::Bidirectional,
        }
    }
}

/// What produced a mode switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchTrigger {
    Pointer { distance: f64 },
    Wheel { delta_y: f64 },
}

/// Discrete result of one event on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    None,
    Ignored(IgnoredReason),
    ModeSwitch {
        direction: PullDirection,
        trigger: SwitchTrigger,
    },
    TabSwipe(SwipeDirection),
    PullCancelled { distance: f64 },
    GestureCancelled(CancelReason),
}

#[derive(Debug, Clone)]
pub struct Surface {
    kind: SurfaceKind,
    tracker: PointerTracker,
    pull: PullMachine,
    swipe: SwipeClassifier,
    header: HeaderController,
    scroll: ScrollPosition,
    bottom_epsilon: f64,
}

impl Surface {
    #[must_use]
    pub fn new(kind: SurfaceKind, cfg: &NavConfig) -> Self {
        Self {
            kind,
            tracker: PointerTracker::new(cfg.stale_session_timeout),
            pull: PullMachine::new(kind.policy(), PullConfig::from(cfg)),
            swipe: SwipeClassifier::new(cfg.min_swipe_distance),
            header: HeaderController::from_config(cfg),
            scroll: ScrollPosition::default(),
            bottom_epsilon: cfg.bottom_epsilon,
        }
    }

    /// Seed the scroll snapshot, e.g. with the container size at mount.
    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollPosition) -> Self {
        self.scroll = scroll;
        self.header.reset(scroll.offset);
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    #[must_use]
    pub fn boundary(&self) -> Boundary {
        classify(&self.scroll, self.bottom_epsilon)
    }

    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    #[inline]
    #[must_use]
    pub fn pull(&self) -> &PullMachine {
        &self.pull
    }

    #[inline]
    #[must_use]
    pub fn header(&self) -> &HeaderController {
        &self.header
    }

    #[must_use]
    pub fn pull_hint(&self) -> PullHint {
        self.pull.hint()
    }

    pub fn handle(&mut self, event: &GestureEvent, now: Instant) -> GestureOutcome {
        if !event.is_finite() {
            return GestureOutcome::Ignored(IgnoredReason::NonFiniteInput);
        }
        match *event {
            GestureEvent::PointerDown { pointer, pos } => {
                match self.tracker.pointer_down(pointer, pos, now) {
                    PointerDispatch::Opened { replaced } => {
                        if replaced {
                            self.pull.cancel();
                        }
                        GestureOutcome::None
                    }
                    other => Self::passthrough(other),
                }
            }
            GestureEvent::PointerMove { pointer, pos } => {
                match self.tracker.pointer_move(pointer, pos, now) {
                    PointerDispatch::Moved(delta) => {
                        let boundary = self.boundary();
                        self.pull.on_delta(delta.dy, boundary);
                        GestureOutcome::None
                    }
                    other => Self::passthrough(other),
                }
            }
            GestureEvent::PointerUp { pointer, pos } => match self.tracker.pointer_up(pointer, pos) {
                PointerDispatch::Released { total } => self.on_release(total),
                other => Self::passthrough(other),
            },
            GestureEvent::Cancel { pointer, reason } => match self.tracker.cancel(pointer, reason) {
                PointerDispatch::Cancelled(reason) => {
                    self.pull.cancel();
                    GestureOutcome::GestureCancelled(reason)
                }
                other => Self::passthrough(other),
            },
            GestureEvent::Wheel { delta_y, .. } => {
                if self.tracker.is_live(now) {
                    return GestureOutcome::Ignored(IgnoredReason::ActivePointerInProgress);
                }
                match self.pull.wheel(delta_y, self.boundary()) {
                    Some(direction) => GestureOutcome::ModeSwitch {
                        direction,
                        trigger: SwitchTrigger::Wheel { delta_y },
                    },
                    None => GestureOutcome::None,
                }
            }
            GestureEvent::Scroll(position) => {
                self.scroll = position;
                self.header.on_scroll(position.offset);
                let boundary = self.boundary();
                if self.pull.observe_boundary(boundary) {
                    tracing::debug!(surface = ?self.kind, ?boundary, "pull reset by scroll");
                }
                GestureOutcome::None
            }
        }
    }

    fn on_release(&mut self, total: Delta) -> GestureOutcome {
        if let Some(direction) = self.swipe.classify(total) {
            self.pull.cancel();
            return GestureOutcome::TabSwipe(direction);
        }
        match self.pull.release() {
            PullRelease::Idle => GestureOutcome::None,
            PullRelease::ModeSwitch {
                direction,
                distance,
            } => GestureOutcome::ModeSwitch {
                direction,
                trigger: SwitchTrigger::Pointer { distance },
            },
            PullRelease::Cancelled { distance, .. } => GestureOutcome::PullCancelled { distance },
        }
    }

    fn passthrough(dispatch: PointerDispatch) -> GestureOutcome {
        match dispatch {
            PointerDispatch::Ignored(reason) => GestureOutcome::Ignored(reason),
            _ => GestureOutcome::None,
        }
    }

    /// Advance animations.
    pub fn tick(&mut self, dt: Duration) {
        self.pull.tick(dt);
    }

    /// Drop any live gesture without animation (surface unmounted or frozen).
    pub fn freeze(&mut self) {
        self.tracker.reset();
        self.pull.reset();
    }

    /// Show the header again, anchored at the current offset.
    pub fn reset_header(&mut self) {
        self.header.reset(self.scroll.offset);
    }
}
