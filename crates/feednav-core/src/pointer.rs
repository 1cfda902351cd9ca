#![forbid(unsafe_code)]

//! Pointer tracking: one gesture session per surface.
//!
//! [`PointerTracker`] turns pointer lifecycle signals into incremental deltas
//! while a session is open and a single total displacement on release.
//!
//! # Invariants
//!
//! 1. At most one [`GestureSession`] is live at a time. The first pointer wins;
//!    down/move/up from any other pointer is ignored.
//! 2. A move with no open session emits nothing.
//! 3. Every session ends exactly once: `Released` on pointer-up or `Cancelled`
//!    on cancel/leave/lost-capture/blur.
//! 4. A repeated pointer-down from the live pointer restarts the session.
//!
//! # Failure Modes
//!
//! - A pointer-up that never arrives would leave the session stuck. Hosts are
//!   expected to forward `pointercancel`, `pointerleave` and
//!   `lostpointercapture`; as a backstop, a session idle for longer than the
//!   stale timeout is replaced by the next pointer-down from any pointer.

use std::time::Duration;

use web_time::Instant;

use crate::event::{CancelReason, PointerId};
use crate::geometry::{Delta, Point};

/// Ephemeral state of one press-drag-release interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub pointer: PointerId,
    pub origin: Point,
    pub last: Point,
    pub started_at: Instant,
    pub last_event_at: Instant,
}

impl GestureSession {
    /// Displacement from the origin to the most recent sample.
    #[must_use]
    pub fn total(&self) -> Delta {
        self.origin.delta_to(self.last)
    }
}

/// Why an input was dropped without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    /// Another pointer already owns the session.
    ActivePointerInProgress,
    /// Move/up/cancel with no session open.
    NoActiveSession,
    /// Move/up/cancel from a pointer other than the session owner.
    PointerMismatch,
    /// A coordinate, delta or scroll field was NaN or infinite.
    NonFiniteInput,
}

/// Outcome of one tracker dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDispatch {
    /// A session opened. `replaced` is set when a prior session was discarded.
    Opened { replaced: bool },
    /// Incremental movement since the previous sample.
    Moved(Delta),
    /// The session closed normally; `total` is origin-to-release displacement.
    Released { total: Delta },
    /// The session was discarded without a release.
    Cancelled(CancelReason),
    Ignored(IgnoredReason),
}

/// Single-session pointer tracker.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    session: Option<GestureSession>,
    stale_after: Duration,
}

impl PointerTracker {
    #[must_use]
    pub fn new(stale_after: Duration) -> Self {
        Self {
            session: None,
            stale_after,
        }
    }

    /// The live session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// A session is open and has not gone stale by `now`.
    #[must_use]
    pub fn is_live(&self, now: Instant) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !self.is_stale(s, now))
    }

    fn is_stale(&self, session: &GestureSession, now: Instant) -> bool {
        now.saturating_duration_since(session.last_event_at) >= self.stale_after
    }

    pub fn pointer_down(&mut self, pointer: PointerId, pos: Point, now: Instant) -> PointerDispatch {
        let mut replaced = false;
        if let Some(active) = &self.session {
            let stale = self.is_stale(active, now);
            if active.pointer != pointer && !stale {
                return PointerDispatch::Ignored(IgnoredReason::ActivePointerInProgress);
            }
            tracing::debug!(
                old = active.pointer.0,
                new = pointer.0,
                stale,
                "replacing gesture session"
            );
            replaced = true;
        }
        self.session = Some(GestureSession {
            pointer,
            origin: pos,
            last: pos,
            started_at: now,
            last_event_at: now,
        });
        PointerDispatch::Opened { replaced }
    }

    pub fn pointer_move(&mut self, pointer: PointerId, pos: Point, now: Instant) -> PointerDispatch {
        let session = match self.owned_session(pointer) {
            Ok(session) => session,
            Err(reason) => return PointerDispatch::Ignored(reason),
        };
        let delta = session.last.delta_to(pos);
        session.last = pos;
        session.last_event_at = now;
        PointerDispatch::Moved(delta)
    }

    pub fn pointer_up(&mut self, pointer: PointerId, pos: Point) -> PointerDispatch {
        if let Err(reason) = self.owned_session(pointer) {
            return PointerDispatch::Ignored(reason);
        }
        let Some(session) = self.session.take() else {
            return PointerDispatch::Ignored(IgnoredReason::NoActiveSession);
        };
        PointerDispatch::Released {
            total: session.origin.delta_to(pos),
        }
    }

    /// End the session without a release. `pointer: None` matches any owner.
    pub fn cancel(&mut self, pointer: Option<PointerId>, reason: CancelReason) -> PointerDispatch {
        match (self.session.as_ref(), pointer) {
            (None, _) => PointerDispatch::Ignored(IgnoredReason::NoActiveSession),
            (Some(active), Some(p)) if active.pointer != p => {
                PointerDispatch::Ignored(IgnoredReason::PointerMismatch)
            }
            (Some(_), _) => {
                self.session = None;
                PointerDispatch::Cancelled(reason)
            }
        }
    }

    /// Drop any session silently (surface unmounted).
    pub fn reset(&mut self) {
        self.session = None;
    }

    fn owned_session(&mut self, pointer: PointerId) -> Result<&mut GestureSession, IgnoredReason> {
        match self.session.as_mut() {
            None => Err(IgnoredReason::NoActiveSession),
            Some(s) if s.pointer != pointer => Err(IgnoredReason::PointerMismatch),
            Some(s) => Ok(s),
        }
    }
}
