#![forbid(unsafe_code)]

//! Content bookkeeping for the feed and the recall grid.
//!
//! The coordinator never awaits a load. It issues a [`LoadTicket`], the host
//! starts the request, and the completion comes back as a message carrying the
//! same ticket. [`LoadState`] holds the per-slot lifecycle and rejects any
//! completion whose ticket is not the one currently pending.
//!
//! # Invariants
//!
//! 1. Tickets are issued in strictly increasing order per coordinator.
//! 2. Only the pending ticket can complete a slot; everything else is stale.
//! 3. A failed load never touches the navigation mode; it is data only.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The signed-in user the content is loaded for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ViewerId(pub String);

impl ViewerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(pub String);

/// One post in the linear feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedItem {
    pub id: ItemId,
    pub author: UserId,
    pub caption: String,
}

/// One tile in the recall grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridItem {
    pub id: ItemId,
    pub author: UserId,
    pub thumbnail_url: String,
}

/// Correlates a load completion with the request that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LoadTicket(pub u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub fn next(&mut self) -> LoadTicket {
        self.last += 1;
        LoadTicket(self.last)
    }
}

/// Why a content load failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LoadError {
    #[error("network error: {message}")]
    Network { message: String },
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("not authorized to load this content")]
    Unauthorized,
}

impl LoadError {
    /// Whether offering a retry makes sense.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout => true,
            Self::Backend { status, .. } => *status >= 500 || *status == 429,
            Self::Unauthorized => false,
        }
    }
}

/// Lifecycle of one content slot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    NotRequested,
    Loading { ticket: LoadTicket },
    Ready(Vec<T>),
    Failed { error: LoadError },
}

/// Outcome of offering a completion to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket did not match the pending request.
    Stale,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::NotRequested
    }
}

impl<T> LoadState<T> {
    /// Content that is cached or already on its way; no new request is needed.
    #[must_use]
    pub fn is_settled_or_pending(&self) -> bool {
        matches!(self, Self::Loading { .. } | Self::Ready(_))
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        match self {
            Self::Loading { ticket } => Some(*ticket),
            _ => None,
        }
    }

    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Self::Ready(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn start(&mut self, ticket: LoadTicket) {
        *self = Self::Loading { ticket };
    }

    /// Apply a completion if `ticket` is the pending one.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Vec<T>, LoadError>) -> Completion {
        if self.pending_ticket() != Some(ticket) {
            return Completion::Stale;
        }
        *self = match result {
            Ok(items) => Self::Ready(items),
            Err(error) => Self::Failed { error },
        };
        Completion::Applied
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        match self {
            Self::NotRequested => LoadStatus::Idle,
            Self::Loading { .. } => LoadStatus::Loading,
            Self::Ready(items) => LoadStatus::Ready { items: items.len() },
            Self::Failed { error } => LoadStatus::Failed {
                retryable: error.is_retryable(),
            },
        }
    }
}

/// What the presentation layer needs to draw a placeholder, list or retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready { items: usize },
    Failed { retryable: bool },
}
