#![forbid(unsafe_code)]

//! Harness: deterministic simulation of a feednav host.
//!
//! # Role in feednav
//! `feednav-harness` stands in for the platform. It owns fake scroll
//! containers, records every effect the runtime asks for, and drives the
//! runtime from declarative gesture scripts on a manual clock.
//!
//! # Primary responsibilities
//! - **SimApp**: platform model (clamped scrolling, remount at top, native drag
//!   scrolling) around a real `NavProgram`.
//! - **Script**: user actions as data.
//! - **storm**: seeded random scripts for fault injection.
//! - **frame_hash**: blake3 digests of frames and frame sequences.

pub mod determinism;
pub mod frame_hash;
pub mod script;
pub mod sim;
pub mod storm;

pub use determinism::{FRAME, SimClock, fixture_seed};
pub use frame_hash::{FrameHasher, frame_hash};
pub use script::{DRAG_MOVES, DRAG_ORIGIN, Script, Step};
pub use sim::{FakeScroll, LoadPolicy, PendingLoad, ScrollRequest, SimApp, SimConfig, SimHost};
pub use storm::{GestureStorm, generate_storm, run_storm};
