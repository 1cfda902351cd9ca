#![forbid(unsafe_code)]

//! Effect execution: the bridge between the coordinator and the host.
//!
//! The coordinator is a pure reducer that returns [`Cmd`] values. A
//! [`NavProgram`] owns the coordinator plus the host seams and runs each
//! command against them:
//!
//! ```text
//! host event ──▶ NavProgram::dispatch ──▶ coordinator.update ──▶ Cmd
//!                                                                │
//!       Haptics / ContentLoader / ExternalNavigator / ScrollDriver ◀┘
//! ```
//!
//! Loads follow the same message loop: the loader starts a request, and the
//! host later dispatches [`NavMsg::FeedLoaded`] or [`NavMsg::RecallLoaded`]
//! with the ticket it was given.
//!
//! # Failure Modes
//!
//! - Haptics is fire-and-forget. A backend that panics is caught and logged;
//!   the caller never observes it.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use feednav_core::{ActiveTab, ConfigError, NavConfig, SurfaceKind};
use web_time::Instant;

use crate::content::{LoadTicket, ViewerId};
use crate::coordinator::{NavFrame, NavMsg, NavTarget, ViewModeCoordinator};

/// Side effects requested by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// No operation.
    None,
    /// Execute several commands in order.
    Batch(Vec<Cmd>),
    /// Vibrate for the given duration.
    Haptic(Duration),
    /// Start loading the feed for `tab`.
    LoadFeed { ticket: LoadTicket, tab: ActiveTab },
    /// Start loading recall content for the grid.
    LoadRecall { ticket: LoadTicket },
    /// Move a scroll container.
    ScrollTo {
        surface: SurfaceKind,
        offset: f64,
        smooth: bool,
    },
    /// Hand off to another screen.
    Navigate(NavTarget),
}

impl Cmd {
    /// Combine commands, dropping no-ops and collapsing a single survivor.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten nested batches into execution order, without no-ops.
    #[must_use]
    pub fn into_vec(self) -> Vec<Self> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }

    /// Short static name, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Batch(_) => "batch",
            Self::Haptic(_) => "haptic",
            Self::LoadFeed { .. } => "load_feed",
            Self::LoadRecall { .. } => "load_recall",
            Self::ScrollTo { .. } => "scroll_to",
            Self::Navigate(_) => "navigate",
        }
    }
}

// ---------------------------------------------------------------------------
// Host seams
// ---------------------------------------------------------------------------

/// Device vibration. Hosts without support implement this as a no-op.
pub trait Haptics {
    fn vibrate(&mut self, duration: Duration);
}

/// Starts content requests. Results come back as messages.
pub trait ContentLoader {
    fn load_feed(&mut self, ticket: LoadTicket, tab: ActiveTab, viewer: &ViewerId);
    fn load_recall(&mut self, ticket: LoadTicket, viewer: &ViewerId);
}

/// Routing lives outside the controller; this is the callback it invokes.
pub trait ExternalNavigator {
    fn navigate(&mut self, target: &NavTarget);
}

/// Programmatic scrolling of the host's containers.
pub trait ScrollDriver {
    fn scroll_to(&mut self, surface: SurfaceKind, offset: f64, smooth: bool);
}

/// Everything a host provides.
pub trait NavHost: Haptics + ContentLoader + ExternalNavigator + ScrollDriver {}

impl<T: Haptics + ContentLoader + ExternalNavigator + ScrollDriver> NavHost for T {}

// ---------------------------------------------------------------------------
// NavProgram
// ---------------------------------------------------------------------------

/// Coordinator plus host: the unit an application embeds.
pub struct NavProgram<H: NavHost> {
    coordinator: ViewModeCoordinator,
    host: H,
    initialized: bool,
}

impl<H: NavHost> NavProgram<H> {
    /// Build a program. The configuration is validated first.
    pub fn new(config: NavConfig, viewer: ViewerId, host: H) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            coordinator: ViewModeCoordinator::new(config, viewer),
            host,
            initialized: false,
        })
    }

    /// Issue startup effects (initial feed load). Calling it twice is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let cmd = self.coordinator.init();
        self.execute(cmd);
    }

    /// Feed one message through the coordinator and run its effects.
    pub fn dispatch(&mut self, msg: NavMsg, now: Instant) {
        let cmd = self.coordinator.update(msg, now);
        self.execute(cmd);
    }

    /// Frame callback: advance animations and settle transitions.
    pub fn tick(&mut self, now: Instant) {
        self.dispatch(NavMsg::Tick, now);
    }

    #[must_use]
    pub fn frame(&self) -> NavFrame {
        self.coordinator.frame()
    }

    #[inline]
    #[must_use]
    pub fn coordinator(&self) -> &ViewModeCoordinator {
        &self.coordinator
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn execute(&mut self, cmd: Cmd) {
        for cmd in cmd.into_vec() {
            tracing::trace!(cmd = cmd.kind(), "executing command");
            match cmd {
                Cmd::None | Cmd::Batch(_) => {}
                Cmd::Haptic(duration) => self.vibrate(duration),
                Cmd::LoadFeed { ticket, tab } => {
                    self.host
                        .load_feed(ticket, tab, self.coordinator.viewer());
                }
                Cmd::LoadRecall { ticket } => {
                    self.host.load_recall(ticket, self.coordinator.viewer());
                }
                Cmd::ScrollTo {
                    surface,
                    offset,
                    smooth,
                } => self.host.scroll_to(surface, offset, smooth),
                Cmd::Navigate(target) => self.host.navigate(&target),
            }
        }
    }

    fn vibrate(&mut self, duration: Duration) {
        let host = &mut self.host;
        if catch_unwind(AssertUnwindSafe(|| host.vibrate(duration))).is_err() {
            tracing::warn!(message = "feednav.haptics_failed", caught = true);
        }
    }
}
