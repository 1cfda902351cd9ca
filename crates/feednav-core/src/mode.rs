#![forbid(unsafe_code)]

//! Navigation state values: view mode and feed tab.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two mutually exclusive view states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NavigationMode {
    /// Linear feed.
    #[default]
    Feed,
    /// Recall grid overlay.
    Grid,
}

impl NavigationMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Feed => Self::Grid,
            Self::Grid => Self::Feed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed tab, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActiveTab {
    #[default]
    Discover,
    Friends,
}

impl ActiveTab {
    pub const ALL: [Self; 2] = [Self::Discover, Self::Friends];

    /// The tab to the right; the last tab stays put.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Discover | Self::Friends => Self::Friends,
        }
    }

    /// The tab to the left; the first tab stays put.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Discover | Self::Friends => Self::Discover,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Discover => 0,
            Self::Friends => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discover => "discover",
            Self::Friends => "friends",
        }
    }
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
