#![cfg_attr(not(test), forbid(unsafe_code))]

//! Core: gesture tracking, boundary detection, pull thresholds, and the
//! scroll-linked header.
//!
//! # Role in feednav
//! `feednav-core` is the input layer. It owns the per-surface state machines
//! that turn raw pointer, wheel and scroll events into discrete navigation
//! outcomes. Nothing here knows about view modes, content, or the host.
//!
//! # Primary responsibilities
//! - **PointerTracker**: first-pointer-wins gesture sessions with incremental deltas.
//! - **Boundary**: top/bottom/pinned/mid classification of a scroll snapshot.
//! - **PullMachine**: overscroll accumulation, threshold decision, snap-back.
//! - **SwipeClassifier**: horizontal tab swipes, decided on release.
//! - **HeaderController**: scroll-linked header translation.
//! - **Surface**: one scroll container wiring the above together.
//!
//! # How it fits in the system
//! The runtime (`feednav-runtime`) owns one [`Surface`] per mounted view and
//! maps each [`GestureOutcome`] to a mode or tab change. Everything in this
//! crate is a synchronous reducer over explicit timestamps, so the harness can
//! replay it deterministically.

pub mod animation;
pub mod boundary;
pub mod config;
pub mod event;
pub mod geometry;
pub mod header;
pub mod mode;
pub mod pointer;
pub mod pull;
pub mod surface;
pub mod swipe;
pub mod tap;

pub use boundary::{Boundary, BoundaryPolicy, PullDirection, ScrollPosition};
pub use config::{ConfigError, NavConfig};
pub use event::{CancelReason, GestureEvent, PointerId};
pub use geometry::{Delta, Point};
pub use header::HeaderController;
pub use mode::{ActiveTab, NavigationMode};
pub use pointer::{GestureSession, IgnoredReason, PointerDispatch, PointerTracker};
pub use pull::{PullConfig, PullHint, PullMachine, PullPhase, PullRelease, PullUpdate};
pub use surface::{GestureOutcome, Surface, SurfaceKind, SwitchTrigger};
pub use swipe::{SwipeClassifier, SwipeDirection};
pub use tap::{Activation, DoubleActivation};
