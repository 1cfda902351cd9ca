#![forbid(unsafe_code)]

//! Headless reference run.
//!
//! Plays a seeded gesture storm through [`SimApp`] and prints one JSONL line
//! per recorded frame, followed by the storm summary.
//!
//! # Running
//!
//! ```sh
//! FEEDNAV_SEED=7 cargo run -p feednav-harness -- 300
//! ```
//!
//! The optional argument is the number of gestures (default 200).

use std::io::{self, Write};
use std::process::ExitCode;

use feednav_harness::{SimApp, SimConfig, fixture_seed, generate_storm, run_storm};

const DEFAULT_SEED: u64 = 0x5eed_f00d;
const DEFAULT_GESTURES: usize = 200;

fn main() -> ExitCode {
    let gestures = match std::env::args().nth(1).map(|a| a.parse::<usize>()) {
        None => DEFAULT_GESTURES,
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            eprintln!("feednav-sim: gesture count must be a number: {err}");
            return ExitCode::from(2);
        }
    };

    let mut app = match SimApp::new(SimConfig::default()) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("feednav-sim: {err}");
            return ExitCode::FAILURE;
        }
    };

    let storm = generate_storm(fixture_seed(DEFAULT_SEED), gestures);
    let summary = run_storm(&mut app, &storm);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let (start, complete) = summary.split_at(1.min(summary.len()));
    for line in start.iter().chain(app.jsonl()).chain(complete) {
        if writeln!(out, "{line}").is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
