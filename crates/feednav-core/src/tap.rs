#![forbid(unsafe_code)]

//! Double-activation debounce for header/logo taps.
//!
//! Same timing rule as multi-click detection, reduced to two levels: a second
//! activation within the window is [`Activation::Second`] and clears the
//! memory, so a third quick tap starts over as [`Activation::First`].

use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    First,
    Second,
}

#[derive(Debug, Clone)]
pub struct DoubleActivation {
    window: Duration,
    last: Option<Instant>,
}

impl DoubleActivation {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn activate(&mut self, now: Instant) -> Activation {
        match self.last {
            Some(prev) if now.saturating_duration_since(prev) <= self.window => {
                self.last = None;
                Activation::Second
            }
            _ => {
                self.last = Some(now);
                Activation::First
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
