#![forbid(unsafe_code)]

//! Policy-as-data configuration for the navigation controller.
//!
//! Captures every tunable threshold as a single [`PolicyConfig`] that can be
//! loaded from TOML or JSON at startup, so product tuning does not need a
//! rebuild.
//!
//! # Loading
//!
//! ```toml
//! # feednav-policy.toml
//! [pull]
//! threshold = 240.0
//! wheel_threshold = 80.0
//!
//! [activation]
//! double_window_ms = 250
//! ```
//!
//! ```rust,ignore
//! let policy = PolicyConfig::from_toml_file("feednav-policy.toml")?;
//! let config = policy.to_nav_config();
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the matching [`NavConfig`] default, so
//! `PolicyConfig::default().to_nav_config()` equals `NavConfig::default()`.

use std::time::Duration;

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use feednav_core::NavConfig;

// ---------------------------------------------------------------------------
// Top-level PolicyConfig
// ---------------------------------------------------------------------------

/// Sectioned policy file contents.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct PolicyConfig {
    pub pull: PullPolicyConfig,
    pub swipe: SwipePolicyConfig,
    pub header: HeaderPolicyConfig,
    pub activation: ActivationPolicyConfig,
    pub session: SessionPolicyConfig,
}

impl PolicyConfig {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        toml::from_str(s).map_err(PolicyConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        serde_json::from_str(s).map_err(PolicyConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by extension: `.json` is JSON, anything else is TOML.
    #[cfg(feature = "policy-config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Validate all parameters. An empty list means the policy is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        self.to_nav_config().validate()
    }

    /// Build a [`NavConfig`] from this policy.
    #[must_use]
    pub fn to_nav_config(&self) -> NavConfig {
        NavConfig {
            pull_threshold: self.pull.threshold,
            show_indicator_min: self.pull.show_indicator_min,
            wheel_threshold: self.pull.wheel_threshold,
            min_swipe_distance: self.swipe.min_distance,
            header_height: self.header.height,
            small_offset_threshold: self.header.small_offset_threshold,
            bottom_epsilon: self.pull.bottom_epsilon,
            double_activation_window: Duration::from_millis(self.activation.double_window_ms),
            transition_settle: Duration::from_millis(self.session.transition_settle_ms),
            stale_session_timeout: Duration::from_millis(self.session.stale_after_ms),
            haptic_duration: Duration::from_millis(self.activation.haptic_ms),
        }
    }

    /// Validate and convert in one step.
    pub fn into_nav_config(self) -> Result<NavConfig, PolicyConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self.to_nav_config())
        } else {
            Err(PolicyConfigError::Validation(errors))
        }
    }

    /// Format as a JSONL line for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        format!(
            r#"{{"schema":"feednav-policy-v1","pull_threshold":{},"wheel_threshold":{},"min_swipe_distance":{},"header_height":{},"double_window_ms":{}}}"#,
            self.pull.threshold,
            self.pull.wheel_threshold,
            self.swipe.min_distance,
            self.header.height,
            self.activation.double_window_ms,
        )
    }
}

// ---------------------------------------------------------------------------
// Sub-configs (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Pull-to-switch thresholds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct PullPolicyConfig {
    /// Release distance that switches mode. Default: 220.
    pub threshold: f64,
    /// Distance at which the indicator appears. Default: 20.
    pub show_indicator_min: f64,
    /// Single wheel delta that counts as a full pull. Default: 60.
    pub wheel_threshold: f64,
    /// Sub-pixel tolerance for the bottom edge. Default: 10.
    pub bottom_epsilon: f64,
}

impl Default for PullPolicyConfig {
    fn default() -> Self {
        let d = NavConfig::default();
        Self {
            threshold: d.pull_threshold,
            show_indicator_min: d.show_indicator_min,
            wheel_threshold: d.wheel_threshold,
            bottom_epsilon: d.bottom_epsilon,
        }
    }
}

/// Tab swipe parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct SwipePolicyConfig {
    /// Minimum horizontal travel. Default: 50.
    pub min_distance: f64,
}

impl Default for SwipePolicyConfig {
    fn default() -> Self {
        Self {
            min_distance: NavConfig::default().min_swipe_distance,
        }
    }
}

/// Scroll-linked header parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct HeaderPolicyConfig {
    /// Header height. Default: 64.
    pub height: f64,
    /// Offsets at or below this always show the header. Default: 10.
    pub small_offset_threshold: f64,
}

impl Default for HeaderPolicyConfig {
    fn default() -> Self {
        let d = NavConfig::default();
        Self {
            height: d.header_height,
            small_offset_threshold: d.small_offset_threshold,
        }
    }
}

/// Tap and haptic timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct ActivationPolicyConfig {
    /// Second-tap window in milliseconds. Default: 300.
    pub double_window_ms: u64,
    /// Vibration length on mode switch in milliseconds. Default: 10.
    pub haptic_ms: u64,
}

impl Default for ActivationPolicyConfig {
    fn default() -> Self {
        let d = NavConfig::default();
        Self {
            double_window_ms: duration_ms(d.double_activation_window),
            haptic_ms: duration_ms(d.haptic_duration),
        }
    }
}

/// Gesture session and transition timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct SessionPolicyConfig {
    /// Idle time before a live session may be replaced, in ms. Default: 2000.
    pub stale_after_ms: u64,
    /// Time for a mode transition to settle, in ms. Default: 350.
    pub transition_settle_ms: u64,
}

impl Default for SessionPolicyConfig {
    fn default() -> Self {
        let d = NavConfig::default();
        Self {
            stale_after_ms: duration_ms(d.stale_session_timeout),
            transition_settle_ms: duration_ms(d.transition_settle),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PolicyConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "policy-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[cfg(feature = "policy-config")]
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
