#![cfg_attr(not(test), forbid(unsafe_code))]

//! Runtime: view-mode coordination, content bookkeeping, and host effects.
//!
//! # Role in feednav
//! `feednav-runtime` sits between the gesture layer (`feednav-core`) and the
//! host application. It decides which view is mounted, which tab is active,
//! and which side effects the host must run.
//!
//! # Primary responsibilities
//! - **ViewModeCoordinator**: Elm-style reducer over [`NavMsg`]; single writer
//!   of mode, tab, transition and content state.
//! - **Cmd**: declarative side effects (haptics, loads, scrolling, navigation).
//! - **NavProgram**: runs commands against the [`NavHost`] seams.
//! - **PolicyConfig**: thresholds loaded from TOML/JSON (`policy-config`).
//! - **event_trace**: message recording and replay (`event-trace`).
//!
//! # How it fits in the system
//! A host embeds a [`NavProgram`], forwards platform input as
//! [`NavMsg::Gesture`], calls `tick` once per frame, and renders from
//! [`NavFrame`]. Load results come back as messages carrying the ticket the
//! loader was given.

pub mod content;
pub mod coordinator;
#[cfg(feature = "event-trace")]
pub mod event_trace;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod policy_config;
pub mod program;

pub use content::{
    Completion, FeedItem, GridItem, ItemId, LoadError, LoadState, LoadStatus, LoadTicket, UserId,
    ViewerId,
};
pub use coordinator::{ModeTransition, NavFrame, NavMsg, NavTarget, ViewModeCoordinator};
pub use policy_config::{PolicyConfig, PolicyConfigError};
pub use program::{Cmd, ContentLoader, ExternalNavigator, Haptics, NavHost, NavProgram, ScrollDriver};
