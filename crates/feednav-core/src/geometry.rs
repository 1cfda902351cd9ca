#![forbid(unsafe_code)]

//! Pointer-space geometry: points and displacement vectors.
//!
//! Coordinates are CSS-pixel style `f64` values in the surface's own space,
//! with `y` growing downward. A positive `dy` therefore means the finger moved
//! toward the bottom of the screen.

use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pointer location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Displacement from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: Self) -> Delta {
        Delta::new(other.x - self.x, other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A displacement between two pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// True when horizontal travel dominates vertical travel.
    #[must_use]
    pub fn is_mostly_horizontal(self) -> bool {
        self.dx.abs() > self.dy.abs()
    }
}

impl Add for Delta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Sub for Point {
    type Output = Delta;

    fn sub(self, rhs: Self) -> Delta {
        rhs.delta_to(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_to_is_other_minus_self() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, 50.0);
        assert_eq!(a.delta_to(b), Delta::new(-6.0, 30.0));
        assert_eq!(b - a, Delta::new(-6.0, 30.0));
    }

    #[test]
    fn horizontal_dominance_is_strict() {
        assert!(Delta::new(-80.0, 10.0).is_mostly_horizontal());
        assert!(!Delta::new(30.0, 30.0).is_mostly_horizontal());
        assert!(!Delta::new(5.0, -40.0).is_mostly_horizontal());
    }

    #[test]
    fn deltas_add_componentwise() {
        let sum = Delta::new(1.0, -2.0) + Delta::new(3.0, 5.0);
        assert_eq!(sum, Delta::new(4.0, 3.0));
    }
}
