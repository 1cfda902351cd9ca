#![forbid(unsafe_code)]

//! Stable hashing of [`NavFrame`]s.
//!
//! Floats are hashed by bit pattern, enums by a fixed tag byte, so the digest
//! is identical across platforms and runs. A [`FrameHasher`] folds a sequence
//! of frames into one digest: two runs of the same script must agree on it.

use feednav_core::{ActiveTab, NavigationMode, PullDirection};
use feednav_runtime::{LoadStatus, NavFrame};

/// Prefix on every rendered digest.
pub const HASH_PREFIX: &str = "blake3:";

/// `blake3:<hex>` digest of a single frame.
#[must_use]
pub fn frame_hash(frame: &NavFrame) -> String {
    let mut hasher = blake3::Hasher::new();
    feed_frame(&mut hasher, frame);
    format!("{HASH_PREFIX}{}", hasher.finalize().to_hex())
}

/// Running digest over a frame sequence.
#[derive(Debug, Clone)]
pub struct FrameHasher {
    hasher: blake3::Hasher,
    frames: u64,
}

impl Default for FrameHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHasher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: blake3::Hasher::new(),
            frames: 0,
        }
    }

    pub fn push(&mut self, frame: &NavFrame) {
        self.hasher.update(&self.frames.to_le_bytes());
        feed_frame(&mut self.hasher, frame);
        self.frames += 1;
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn digest(&self) -> String {
        format!("{HASH_PREFIX}{}", self.hasher.finalize().to_hex())
    }
}

fn feed_frame(h: &mut blake3::Hasher, f: &NavFrame) {
    h.update(&[mode_tag(f.mode), tab_tag(f.active_tab), direction_tag(f.pull_direction)]);
    for value in [f.header_translate_y, f.pull_progress, f.feed_offset] {
        h.update(&value.to_bits().to_le_bytes());
    }
    h.update(&[
        u8::from(f.indicator_visible),
        u8::from(f.pull_armed),
        u8::from(f.transitioning),
    ]);
    feed_status(h, f.feed_status);
    feed_status(h, f.recall_status);
}

fn feed_status(h: &mut blake3::Hasher, status: LoadStatus) {
    match status {
        LoadStatus::Idle => h.update(&[0]),
        LoadStatus::Loading => h.update(&[1]),
        LoadStatus::Ready { items } => {
            h.update(&[2]);
            h.update(&(items as u64).to_le_bytes())
        }
        LoadStatus::Failed { retryable } => h.update(&[3, u8::from(retryable)]),
    };
}

const fn mode_tag(mode: NavigationMode) -> u8 {
    match mode {
        NavigationMode::Feed => 0,
        NavigationMode::Grid => 1,
    }
}

const fn tab_tag(tab: ActiveTab) -> u8 {
    match tab {
        ActiveTab::Discover => 0,
        ActiveTab::Friends => 1,
    }
}

const fn direction_tag(direction: Option<PullDirection>) -> u8 {
    match direction {
        None => 0,
        Some(PullDirection::Down) => 1,
        Some(PullDirection::Up) => 2,
    }
}
