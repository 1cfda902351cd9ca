#![forbid(unsafe_code)]

//! Tunable thresholds for the navigation controller.
//!
//! Every distance is in surface pixels. The defaults are product-tuning values
//! and carry no structural meaning beyond the constraints checked by
//! [`NavConfig::validate`].

use std::time::Duration;

use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid navigation config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Thresholds and timeouts for gesture navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Pull distance at which release switches mode (default: 220).
    pub pull_threshold: f64,
    /// Pull distance at which the indicator becomes visible (default: 20).
    pub show_indicator_min: f64,
    /// Single wheel delta treated as an instantaneous full pull (default: 60).
    pub wheel_threshold: f64,
    /// Minimum horizontal travel for a tab swipe (default: 50).
    pub min_swipe_distance: f64,
    /// Header height; the header hides by at most this much (default: 64).
    pub header_height: f64,
    /// Offsets at or below this always show the header (default: 10).
    pub small_offset_threshold: f64,
    /// Sub-pixel tolerance for the bottom boundary (default: 10).
    pub bottom_epsilon: f64,
    /// Window for a second header activation (default: 300ms).
    pub double_activation_window: Duration,
    /// Time for a mode transition to settle visually (default: 350ms).
    pub transition_settle: Duration,
    /// Idle time after which a live session is considered abandoned (default: 2s).
    pub stale_session_timeout: Duration,
    /// Vibration length confirming a mode switch (default: 10ms).
    pub haptic_duration: Duration,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            pull_threshold: 220.0,
            show_indicator_min: 20.0,
            wheel_threshold: 60.0,
            min_swipe_distance: 50.0,
            header_height: 64.0,
            small_offset_threshold: 10.0,
            bottom_epsilon: 10.0,
            double_activation_window: Duration::from_millis(300),
            transition_settle: Duration::from_millis(350),
            stale_session_timeout: Duration::from_secs(2),
            haptic_duration: Duration::from_millis(10),
        }
    }
}

impl NavConfig {
    /// List every constraint violation. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let positive = [
            ("pull_threshold", self.pull_threshold),
            ("wheel_threshold", self.wheel_threshold),
            ("min_swipe_distance", self.min_swipe_distance),
            ("header_height", self.header_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                errors.push(format!("{name} must be > 0, got {value}"));
            }
        }

        let non_negative = [
            ("show_indicator_min", self.show_indicator_min),
            ("small_offset_threshold", self.small_offset_threshold),
            ("bottom_epsilon", self.bottom_epsilon),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }

        if self.show_indicator_min >= self.pull_threshold {
            errors.push(format!(
                "show_indicator_min ({}) must be below pull_threshold ({})",
                self.show_indicator_min, self.pull_threshold
            ));
        }

        if self.double_activation_window.is_zero() {
            errors.push("double_activation_window must be > 0".into());
        }
        if self.stale_session_timeout.is_zero() {
            errors.push("stale_session_timeout must be > 0".into());
        }

        errors
    }

    /// Consume the config, returning it only if [`validate`](Self::validate) is clean.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}
