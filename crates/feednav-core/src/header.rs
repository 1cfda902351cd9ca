#![forbid(unsafe_code)]

//! Scroll-linked header translation.
//!
//! The header slides up as content scrolls down and slides back proportionally
//! as content scrolls up. Near the top it is always fully shown.
//!
//! # Invariants
//!
//! 1. `translate_y ∈ [-header_height, 0]` after every update.
//! 2. `translate_y == 0` whenever the latest offset is at or below the small
//!    offset threshold.
//!
//! The controller only reads scroll offsets. It shares no state with the
//! pointer or pull machinery, so scroll and pointer events may interleave in
//! any order.

use crate::config::NavConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderController {
    header_height: f64,
    small_offset_threshold: f64,
    translate_y: f64,
    last_offset: f64,
}

impl HeaderController {
    #[must_use]
    pub fn new(header_height: f64, small_offset_threshold: f64) -> Self {
        Self {
            header_height: header_height.max(0.0),
            small_offset_threshold,
            translate_y: 0.0,
            last_offset: 0.0,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &NavConfig) -> Self {
        Self::new(cfg.header_height, cfg.small_offset_threshold)
    }

    /// Apply a scroll event and return the new translation.
    ///
    /// A non-finite offset is dropped and leaves the header as it was.
    pub fn on_scroll(&mut self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return self.translate_y;
        }
        let delta = offset - self.last_offset;
        self.last_offset = offset;
        self.translate_y = if offset <= self.small_offset_threshold {
            0.0
        } else {
            (self.translate_y - delta).clamp(-self.header_height, 0.0)
        };
        self.translate_y
    }

    /// Show the header and re-anchor scroll tracking at `offset`.
    pub fn reset(&mut self, offset: f64) {
        self.translate_y = 0.0;
        self.last_offset = offset;
    }

    #[inline]
    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.translate_y
    }

    #[must_use]
    pub fn is_fully_hidden(&self) -> bool {
        self.translate_y <= -self.header_height
    }

    #[must_use]
    pub fn header_height(&self) -> f64 {
        self.header_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> HeaderController {
        HeaderController::new(64.0, 10.0)
    }

    #[test]
    fn scrolling_down_hides_up_to_height() {
        let mut h = header();
        assert_eq!(h.on_scroll(40.0), -40.0);
        assert_eq!(h.on_scroll(300.0), -64.0);
        assert!(h.is_fully_hidden());
    }

    #[test]
    fn non_finite_offset_leaves_header_untouched() {
        let mut h = header();
        assert_eq!(h.on_scroll(200.0), -64.0);
        assert_eq!(h.on_scroll(f64::NAN), -64.0);
        assert_eq!(h.on_scroll(f64::INFINITY), -64.0);
        // Tracking stays anchored at 200, so scrolling back 50 reveals 50.
        assert_eq!(h.on_scroll(150.0), -14.0);
    }

    #[test]
    fn scrolling_up_reveals_proportionally() {
        let mut h = header();
        h.on_scroll(500.0);
        assert_eq!(h.on_scroll(480.0), -44.0);
        assert_eq!(h.on_scroll(470.0), -34.0);
        assert_eq!(h.on_scroll(400.0), 0.0);
    }

    #[test]
    fn near_top_always_shows() {
        let mut h = header();
        h.on_scroll(500.0);
        assert_eq!(h.on_scroll(10.0), 0.0);
        // Scrolling down inside the small-offset band still shows the header.
        assert_eq!(h.on_scroll(8.0), 0.0);
        assert_eq!(h.on_scroll(9.5), 0.0);
    }

    #[test]
    fn reset_reanchors() {
        let mut h = header();
        h.on_scroll(900.0);
        h.reset(1200.0);
        assert_eq!(h.translate_y(), 0.0);
        // Restore scroll at the anchored offset is not movement.
        assert_eq!(h.on_scroll(1200.0), 0.0);
        assert_eq!(h.on_scroll(1210.0), -10.0);
    }
}
