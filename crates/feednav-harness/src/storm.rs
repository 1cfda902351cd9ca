#![forbid(unsafe_code)]

//! Seeded gesture storms for fault injection.
//!
//! Generates a reproducible [`Script`] mixing pulls, swipes, wheel notches,
//! native scrolls, header taps, cancels and idle frames. The same seed always
//! yields the same script, so a failing storm can be rerun exactly.
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"storm_start","seed":42,"gestures":200,"steps":1843}
//! {"event":"storm_complete","frames":1844,"mode":"feed","digest":"blake3:..."}
//! ```

use std::time::Duration;

use feednav_core::{ActiveTab, CancelReason, Delta, Point};

use crate::script::{DRAG_ORIGIN, Script, Step};
use crate::sim::SimApp;

/// xorshift64; deterministic and dependency-free.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, n: u64) -> u64 {
        if n == 0 { 0 } else { self.next() % n }
    }

    /// Whole number in `[lo, hi]`, as f64.
    fn range(&mut self, lo: i64, hi: i64) -> f64 {
        let span = u64::try_from(hi - lo + 1).unwrap_or(1);
        let n = i64::try_from(self.below(span)).unwrap_or(0);
        (lo + n) as f64
    }
}

/// A generated storm.
#[derive(Debug, Clone)]
pub struct GestureStorm {
    pub seed: u64,
    pub gestures: usize,
    pub script: Script,
}

/// Build `gestures` random gestures from `seed`.
#[must_use]
pub fn generate_storm(seed: u64, gestures: usize) -> GestureStorm {
    let mut rng = Rng::new(seed);
    let mut script = Script::new();
    for _ in 0..gestures {
        script = match rng.below(9) {
            0 | 1 => script.pull(rng.range(-400, 400)),
            2 => script.swipe(rng.range(-160, 160), rng.range(-40, 40)),
            3 => script.wheel(rng.range(-150, 150)),
            4 => script.scroll(rng.range(-900, 900)),
            5 => script.tap_header(),
            6 => {
                let moves = 1 + u32::try_from(rng.below(6)).unwrap_or(0);
                let step = Delta::new(rng.range(-20, 20), rng.range(-40, 40));
                abandoned_drag(script, step, moves, rng.below(2) == 0)
            }
            7 => script.select_tab(if rng.below(2) == 0 {
                ActiveTab::Discover
            } else {
                ActiveTab::Friends
            }),
            _ => script.frames(1 + u32::try_from(rng.below(30)).unwrap_or(0)),
        };
        script = script.wait(Duration::from_millis(rng.below(400)));
    }
    GestureStorm {
        seed,
        gestures,
        script,
    }
}

/// A drag that ends in a cancel instead of a release.
fn abandoned_drag(script: Script, step: Delta, moves: u32, by_blur: bool) -> Script {
    let mut script = script.push(Step::Down {
        pointer: 1,
        at: DRAG_ORIGIN,
    });
    for i in 1..=moves {
        let n = f64::from(i);
        script = script.push(Step::Move {
            pointer: 1,
            to: Point::new(DRAG_ORIGIN.x + step.dx * n, DRAG_ORIGIN.y + step.dy * n),
        });
    }
    let (pointer, reason) = if by_blur {
        (None, CancelReason::Blur)
    } else {
        (Some(1), CancelReason::Platform)
    };
    script.push(Step::Cancel { pointer, reason })
}

/// Run a storm and return the JSONL start/complete lines.
pub fn run_storm(app: &mut SimApp, storm: &GestureStorm) -> Vec<String> {
    let start = serde_json::json!({
        "event": "storm_start",
        "seed": storm.seed,
        "gestures": storm.gestures,
        "steps": storm.script.len(),
    });
    app.run(&storm.script);
    let complete = serde_json::json!({
        "event": "storm_complete",
        "frames": app.frames_recorded(),
        "mode": app.mode().as_str(),
        "tab": app.active_tab().as_str(),
        "digest": app.digest(),
    });
    vec![start.to_string(), complete.to_string()]
}
