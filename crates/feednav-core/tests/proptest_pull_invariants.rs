//! Property-based invariant tests for the pull-threshold machine.
//!
//! 1. Release below the threshold never switches; at or above it always does
//! 2. A pull interrupted by a mid-content observation restarts from zero
//! 3. `accumulated` is 0 while idle and carries the pull direction's sign
//! 4. Snap-back always settles to exactly 0
//! 5. Wheel and pointer pulls never combine

use std::time::Duration;

use feednav_core::{
    Boundary, BoundaryPolicy, NavConfig, PullConfig, PullDirection, PullMachine, PullPhase,
    PullRelease,
};
use proptest::prelude::*;

const THRESHOLD: f64 = 220.0;

fn machine(policy: BoundaryPolicy) -> PullMachine {
    PullMachine::new(policy, PullConfig::from(&NavConfig::default()))
}

// ── Strategies ──────────────────────────────────────────────────────────

fn downward_deltas() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.5f64..40.0, 1..40)
}

fn boundary_strategy() -> impl Strategy<Value = Boundary> {
    prop_oneof![
        Just(Boundary::AtTop),
        Just(Boundary::AtBottom),
        Just(Boundary::Pinned),
        Just(Boundary::Mid),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Delta(f64, Boundary),
    Observe(Boundary),
    Release,
    Cancel,
    Tick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (-60.0f64..60.0, boundary_strategy()).prop_map(|(dy, b)| Op::Delta(dy, b)),
        1 => boundary_strategy().prop_map(Op::Observe),
        1 => Just(Op::Release),
        1 => Just(Op::Cancel),
        2 => (1u64..40).prop_map(Op::Tick),
    ]
}

fn apply(m: &mut PullMachine, op: &Op) {
    match *op {
        Op::Delta(dy, b) => {
            m.on_delta(dy, b);
        }
        Op::Observe(b) => {
            m.observe_boundary(b);
        }
        Op::Release => {
            m.release();
        }
        Op::Cancel => {
            m.cancel();
        }
        Op::Tick(ms) => m.tick(Duration::from_millis(ms)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Threshold monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_switches_iff_threshold_reached(deltas in downward_deltas()) {
        let mut m = machine(BoundaryPolicy::TopOnly);
        for dy in &deltas {
            m.on_delta(*dy, Boundary::AtTop);
        }
        let total = deltas.iter().fold(0.0, |acc, dy| acc + dy);
        match m.release() {
            PullRelease::ModeSwitch { direction, distance } => {
                prop_assert!(total >= THRESHOLD, "switched at {total}");
                prop_assert_eq!(direction, PullDirection::Down);
                prop_assert_eq!(distance, total);
            }
            PullRelease::Cancelled { distance, .. } => {
                prop_assert!(total < THRESHOLD, "cancelled at {total}");
                prop_assert_eq!(distance, total);
            }
            PullRelease::Idle => prop_assert!(false, "a downward pull at the top must start"),
        }
        prop_assert_eq!(m.phase(), PullPhase::Idle);
    }

    #[test]
    fn grid_push_up_mirrors_pull_down(deltas in downward_deltas()) {
        let mut m = machine(BoundaryPolicy::Bidirectional);
        for dy in &deltas {
            m.on_delta(-dy, Boundary::AtBottom);
        }
        let total = deltas.iter().fold(0.0, |acc, dy| acc + dy);
        let switched = matches!(m.release(), PullRelease::ModeSwitch { direction: PullDirection::Up, .. });
        prop_assert_eq!(switched, total >= THRESHOLD);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Boundary reset
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mid_delta_restarts_accumulation(
        before in downward_deltas(),
        mid_dy in -30.0f64..30.0,
        after in downward_deltas(),
    ) {
        let mut m = machine(BoundaryPolicy::TopOnly);
        for dy in &before {
            m.on_delta(*dy, Boundary::AtTop);
        }
        m.on_delta(mid_dy, Boundary::Mid);
        prop_assert_eq!(m.accumulated(), 0.0);
        for dy in &after {
            m.on_delta(*dy, Boundary::AtTop);
        }
        let expected = after.iter().fold(0.0, |acc, dy| acc + dy);
        prop_assert_eq!(m.accumulated(), expected);
    }

    #[test]
    fn observed_mid_restarts_accumulation(
        before in downward_deltas(),
        after in downward_deltas(),
    ) {
        let mut m = machine(BoundaryPolicy::Bidirectional);
        for dy in &before {
            m.on_delta(*dy, Boundary::AtTop);
        }
        m.observe_boundary(Boundary::Mid);
        for dy in &after {
            m.on_delta(*dy, Boundary::AtTop);
        }
        let expected = after.iter().fold(0.0, |acc, dy| acc + dy);
        prop_assert_eq!(m.accumulated(), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Sign and idle invariants under arbitrary input
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn accumulated_tracks_phase(ops in prop::collection::vec(op_strategy(), 0..120)) {
        for policy in [BoundaryPolicy::TopOnly, BoundaryPolicy::Bidirectional] {
            let mut m = machine(policy);
            for op in &ops {
                apply(&mut m, op);
                match m.phase() {
                    PullPhase::Idle => prop_assert_eq!(m.accumulated(), 0.0),
                    PullPhase::Pulling(PullDirection::Down) => prop_assert!(m.accumulated() > 0.0),
                    PullPhase::Pulling(PullDirection::Up) => {
                        prop_assert!(policy.allows(PullDirection::Up));
                        prop_assert!(m.accumulated() < 0.0);
                    }
                }
                prop_assert!(m.displayed().is_finite());
                let hint = m.hint();
                prop_assert!(hint.progress >= 0.0);
                prop_assert!(!hint.armed || m.is_pulling());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Snap-back settles
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cancelled_pull_settles_to_zero(
        distance in 1.0f64..219.0,
        frame_ms in 4u64..50,
    ) {
        let mut m = machine(BoundaryPolicy::TopOnly);
        m.on_delta(distance, Boundary::AtTop);
        let released = matches!(m.release(), PullRelease::Cancelled { .. });
        prop_assert!(released);
        let mut elapsed = 0u64;
        let mut last = m.displayed().abs();
        while m.is_settling() && elapsed < 3_000 {
            m.tick(Duration::from_millis(frame_ms));
            elapsed += frame_ms;
            let now = m.displayed().abs();
            // Critically damped: never grows on the way back.
            prop_assert!(now <= last + 1e-9, "grew from {last} to {now}");
            last = now;
        }
        prop_assert!(!m.is_settling(), "still settling after {elapsed}ms");
        prop_assert_eq!(m.displayed(), 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Wheel is never combined with a live pull
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wheel_never_fires_mid_pull(dy in 0.5f64..200.0, wheel in -2_000.0f64..2_000.0) {
        let mut m = machine(BoundaryPolicy::Bidirectional);
        m.on_delta(dy, Boundary::Pinned);
        prop_assert!(m.is_pulling());
        prop_assert_eq!(m.wheel(wheel, Boundary::Pinned), None);
    }
}
