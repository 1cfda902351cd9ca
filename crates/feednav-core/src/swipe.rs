#![forbid(unsafe_code)]

//! Release-time swipe classification.
//!
//! A released gesture is a tab swipe when horizontal travel strictly dominates
//! vertical travel and exceeds the minimum distance. The decision is made once
//! per gesture; a swipe claims the gesture and the pull logic never sees it.

use crate::geometry::Delta;
use crate::mode::ActiveTab;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal swipe direction, named by finger travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwipeDirection {
    /// Finger moved left (`dx < 0`): go to the next tab.
    Left,
    /// Finger moved right (`dx > 0`): go to the previous tab.
    Right,
}

impl SwipeDirection {
    /// Tab reached by swiping this way from `from`. Saturates at either end.
    #[must_use]
    pub const fn apply(self, from: ActiveTab) -> ActiveTab {
        match self {
            Self::Left => from.next(),
            Self::Right => from.previous(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeClassifier {
    min_distance: f64,
}

impl SwipeClassifier {
    #[must_use]
    pub const fn new(min_distance: f64) -> Self {
        Self { min_distance }
    }

    #[must_use]
    pub fn classify(&self, total: Delta) -> Option<SwipeDirection> {
        if !total.is_mostly_horizontal() || total.dx.abs() <= self.min_distance {
            return None;
        }
        Some(if total.dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    }
}
