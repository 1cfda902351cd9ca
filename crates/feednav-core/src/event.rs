#![forbid(unsafe_code)]

//! Canonical input events consumed by the gesture components.
//!
//! Each variant carries only the fields its handler needs. Hosts translate
//! platform pointer, wheel and scroll callbacks into [`GestureEvent`] values and
//! deliver them serially.

use crate::boundary::ScrollPosition;
use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Platform pointer identifier (touch id, mouse = 1, pen id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointerId(pub u32);

impl PointerId {
    /// Conventional id for a mouse pointer.
    pub const MOUSE: Self = Self(1);
}

/// Why a session ended without a pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CancelReason {
    /// The platform delivered `pointercancel` / `touchcancel`.
    Platform,
    /// The pointer left the tracked surface.
    Leave,
    /// Pointer capture was lost before the pointer was released.
    LostCapture,
    /// Window blur or the page became hidden.
    Blur,
}

/// Raw input delivered to a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GestureEvent {
    PointerDown { pointer: PointerId, pos: Point },
    PointerMove { pointer: PointerId, pos: Point },
    PointerUp { pointer: PointerId, pos: Point },
    /// `pointer: None` cancels whichever session is live.
    Cancel {
        pointer: Option<PointerId>,
        reason: CancelReason,
    },
    /// DOM sign convention: negative `delta_y` scrolls toward the top.
    Wheel { delta_x: f64, delta_y: f64 },
    Scroll(ScrollPosition),
}

impl GestureEvent {
    #[must_use]
    pub fn down(pointer: u32, x: f64, y: f64) -> Self {
        Self::PointerDown {
            pointer: PointerId(pointer),
            pos: Point::new(x, y),
        }
    }

    #[must_use]
    pub fn moved(pointer: u32, x: f64, y: f64) -> Self {
        Self::PointerMove {
            pointer: PointerId(pointer),
            pos: Point::new(x, y),
        }
    }

    #[must_use]
    pub fn up(pointer: u32, x: f64, y: f64) -> Self {
        Self::PointerUp {
            pointer: PointerId(pointer),
            pos: Point::new(x, y),
        }
    }

    /// Short static name, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp { .. } => "pointer_up",
            Self::Cancel { .. } => "cancel",
            Self::Wheel { .. } => "wheel",
            Self::Scroll(_) => "scroll",
        }
    }

    /// True for the pointer lifecycle variants (down/move/up/cancel).
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerMove { .. }
                | Self::PointerUp { .. }
                | Self::Cancel { .. }
        )
    }

    /// Whether every coordinate, delta and scroll field is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::PointerDown { pos, .. }
            | Self::PointerMove { pos, .. }
            | Self::PointerUp { pos, .. } => pos.is_finite(),
            Self::Cancel { .. } => true,
            Self::Wheel { delta_x, delta_y } => delta_x.is_finite() && delta_y.is_finite(),
            Self::Scroll(position) => position.is_finite(),
        }
    }
}
