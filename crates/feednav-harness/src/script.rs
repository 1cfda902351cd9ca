#![forbid(unsafe_code)]

//! Gesture scripts: a declarative list of user actions for [`SimApp`].
//!
//! Scripts are plain data, so the same script can be run twice and the frame
//! digests compared, or generated from a seed by [`crate::storm`].
//!
//! [`SimApp`]: crate::sim::SimApp

use std::time::Duration;

use feednav_core::{ActiveTab, CancelReason, Delta, Point};
use feednav_runtime::LoadError;

use crate::determinism::FRAME;

/// Where scripted drags start unless told otherwise.
pub const DRAG_ORIGIN: Point = Point::new(200.0, 300.0);

/// Moves per drag in the convenience builders.
pub const DRAG_MOVES: u32 = 10;

/// One user action or host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Down { pointer: u32, at: Point },
    Move { pointer: u32, to: Point },
    Up { pointer: u32, at: Point },
    Cancel {
        pointer: Option<u32>,
        reason: CancelReason,
    },
    Wheel { delta_y: f64 },
    /// Native scroll of the mounted container (positive scrolls down).
    UserScroll { dy: f64 },
    HeaderTap,
    SelectTab(ActiveTab),
    Retry,
    Wait(Duration),
    /// Advance `n` display frames, ticking once per frame.
    Frames(u32),
    /// Deliver every pending load successfully.
    CompleteLoads,
    /// Fail every pending load.
    FailLoads(LoadError),
}

impl Step {
    /// Short static name, used in JSONL logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Move { .. } => "move",
            Self::Up { .. } => "up",
            Self::Cancel { .. } => "cancel",
            Self::Wheel { .. } => "wheel",
            Self::UserScroll { .. } => "user_scroll",
            Self::HeaderTap => "header_tap",
            Self::SelectTab(_) => "select_tab",
            Self::Retry => "retry",
            Self::Wait(_) => "wait",
            Self::Frames(_) => "frames",
            Self::CompleteLoads => "complete_loads",
            Self::FailLoads(_) => "fail_loads",
        }
    }
}

/// Ordered list of [`Step`]s with builder helpers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Pointer 1 goes down at `from`, moves `moves` times by `step` one frame
    /// apart, and lifts where it ended.
    #[must_use]
    pub fn drag(mut self, from: Point, step: Delta, moves: u32) -> Self {
        let pointer = 1;
        self.steps.push(Step::Down { pointer, at: from });
        let mut at = from;
        for i in 1..=moves {
            let n = f64::from(i);
            at = Point::new(from.x + step.dx * n, from.y + step.dy * n);
            self.steps.push(Step::Wait(FRAME));
            self.steps.push(Step::Move { pointer, to: at });
        }
        self.steps.push(Step::Wait(FRAME));
        self.steps.push(Step::Up { pointer, at });
        self
    }

    /// Vertical drag of `dy` from [`DRAG_ORIGIN`].
    #[must_use]
    pub fn pull(self, dy: f64) -> Self {
        self.swipe(0.0, dy)
    }

    /// Drag of (`dx`, `dy`) from [`DRAG_ORIGIN`] in [`DRAG_MOVES`] equal moves.
    #[must_use]
    pub fn swipe(self, dx: f64, dy: f64) -> Self {
        let moves = f64::from(DRAG_MOVES);
        self.drag(DRAG_ORIGIN, Delta::new(dx / moves, dy / moves), DRAG_MOVES)
    }

    #[must_use]
    pub fn wheel(self, delta_y: f64) -> Self {
        self.push(Step::Wheel { delta_y })
    }

    #[must_use]
    pub fn scroll(self, dy: f64) -> Self {
        self.push(Step::UserScroll { dy })
    }

    #[must_use]
    pub fn tap_header(self) -> Self {
        self.push(Step::HeaderTap)
    }

    #[must_use]
    pub fn select_tab(self, tab: ActiveTab) -> Self {
        self.push(Step::SelectTab(tab))
    }

    #[must_use]
    pub fn wait(self, duration: Duration) -> Self {
        self.push(Step::Wait(duration))
    }

    #[must_use]
    pub fn frames(self, n: u32) -> Self {
        self.push(Step::Frames(n))
    }

    #[must_use]
    pub fn complete_loads(self) -> Self {
        self.push(Step::CompleteLoads)
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
