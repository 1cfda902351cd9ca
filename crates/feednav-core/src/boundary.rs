#![forbid(unsafe_code)]

//! Boundary detection for scroll containers.
//!
//! [`classify`] turns a [`ScrollPosition`] snapshot into a [`Boundary`], and
//! [`BoundaryPolicy::qualify`] decides whether a vertical pointer delta at that
//! boundary is overscroll (a pull) or ordinary scrolling.
//!
//! # Rules
//!
//! - Feed ([`BoundaryPolicy::TopOnly`]): only a downward delta at the top
//!   qualifies.
//! - Grid ([`BoundaryPolicy::Bidirectional`]): a downward delta at the top or an
//!   upward delta at the bottom qualifies.
//! - Content shorter than its viewport is [`Boundary::Pinned`] and satisfies
//!   both the top and the bottom rule.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Content height stand-in for a container not yet measured.
const UNMEASURED_CONTENT: f64 = f64::MAX;

/// Snapshot of a scroll container, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollPosition {
    pub offset: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollPosition {
    #[must_use]
    pub const fn new(offset: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            offset,
            viewport_height,
            content_height,
        }
    }

    /// A container scrolled to its very start.
    #[must_use]
    pub const fn top(viewport_height: f64, content_height: f64) -> Self {
        Self::new(0.0, viewport_height, content_height)
    }

    /// A freshly mounted container whose content has not been measured yet.
    ///
    /// Classifies as [`Boundary::AtTop`], never as a bottom edge, until the
    /// host reports a real position.
    #[must_use]
    pub const fn unmeasured(viewport_height: f64) -> Self {
        Self::new(0.0, viewport_height, UNMEASURED_CONTENT)
    }

    /// Every field is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.offset.is_finite()
            && self.viewport_height.is_finite()
            && self.content_height.is_finite()
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    #[inline]
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.offset <= 0.0
    }

    /// `epsilon` absorbs sub-pixel rounding of fractional layouts.
    #[inline]
    #[must_use]
    pub fn is_at_bottom(&self, epsilon: f64) -> bool {
        self.offset + self.viewport_height >= self.content_height - epsilon
    }
}

/// Where a scroll container sits relative to its content edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary {
    AtTop,
    AtBottom,
    /// At top and bottom simultaneously (content fits the viewport).
    Pinned,
    Mid,
}

impl Boundary {
    #[must_use]
    pub const fn touches_top(self) -> bool {
        matches!(self, Self::AtTop | Self::Pinned)
    }

    #[must_use]
    pub const fn touches_bottom(self) -> bool {
        matches!(self, Self::AtBottom | Self::Pinned)
    }

    #[must_use]
    pub const fn is_mid(self) -> bool {
        matches!(self, Self::Mid)
    }
}

/// Classify a scroll snapshot.
#[must_use]
pub fn classify(position: &ScrollPosition, bottom_epsilon: f64) -> Boundary {
    match (position.is_at_top(), position.is_at_bottom(bottom_epsilon)) {
        (true, true) => Boundary::Pinned,
        (true, false) => Boundary::AtTop,
        (false, true) => Boundary::AtBottom,
        (false, false) => Boundary::Mid,
    }
}

/// Which boundary a pull is anchored to.
///
/// `Down` is a drag toward the bottom of the screen while at the top edge;
/// `Up` is a push toward the top of the screen while at the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PullDirection {
    Down,
    Up,
}

impl PullDirection {
    /// Sign of the accumulated distance for this direction.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Down => 1.0,
            Self::Up => -1.0,
        }
    }

    /// Whether `boundary` still anchors a pull in this direction.
    #[must_use]
    pub const fn anchored_at(self, boundary: Boundary) -> bool {
        match self {
            Self::Down => boundary.touches_top(),
            Self::Up => boundary.touches_bottom(),
        }
    }
}

/// Which boundaries may start a pull on a given surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundaryPolicy {
    /// Pull down at the top only (the feed).
    TopOnly,
    /// Pull down at the top or push up at the bottom (the grid overlay).
    Bidirectional,
}

impl BoundaryPolicy {
    /// Direction a vertical delta `dy` would pull in at `boundary`, if any.
    #[must_use]
    pub fn qualify(self, boundary: Boundary, dy: f64) -> Option<PullDirection> {
        if dy > 0.0 && boundary.touches_top() {
            return Some(PullDirection::Down);
        }
        if dy < 0.0 && boundary.touches_bottom() && self == Self::Bidirectional {
            return Some(PullDirection::Up);
        }
        None
    }

    /// Whether `direction` is permitted on this surface at all.
    #[must_use]
    pub const fn allows(self, direction: PullDirection) -> bool {
        match self {
            Self::TopOnly => matches!(direction, PullDirection::Down),
            Self::Bidirectional => true,
        }
    }
}
