//! Property tests over whole gestures, run through the simulated host.
//!
//! 1. Release switches mode iff the pull reached the threshold (feed top and
//!    grid bottom)
//! 2. One gesture never changes both the tab and the mode
//! 3. The feed offset survives any grid excursion

use std::time::Duration;

use feednav_core::{Delta, NavigationMode};
use feednav_harness::{DRAG_ORIGIN, Script, SimApp, SimConfig};
use proptest::prelude::*;

const THRESHOLD: u32 = 220;
const SETTLE: Duration = Duration::from_millis(400);

fn app() -> SimApp {
    SimApp::new(SimConfig::default()).expect("default config is valid")
}

fn vertical_drag(step: i32, moves: u32) -> Script {
    Script::new().drag(DRAG_ORIGIN, Delta::new(0.0, f64::from(step)), moves)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn feed_release_switches_iff_threshold(step in 1i32..=60, moves in 1u32..=12) {
        let mut app = app();
        app.run(&vertical_drag(step, moves));

        let reached = step.unsigned_abs() * moves >= THRESHOLD;
        let expected = if reached { NavigationMode::Grid } else { NavigationMode::Feed };
        prop_assert_eq!(app.mode(), expected);
        prop_assert_eq!(app.host().vibrations.len(), usize::from(reached));
    }

    #[test]
    fn grid_bottom_release_switches_iff_threshold(step in 1i32..=60, moves in 1u32..=12) {
        let mut app = app();
        app.run(&Script::new().pull(250.0).wait(SETTLE).scroll(10_000.0));
        prop_assert_eq!(app.mode(), NavigationMode::Grid);

        app.run(&vertical_drag(-step, moves));
        let reached = step.unsigned_abs() * moves >= THRESHOLD;
        let expected = if reached { NavigationMode::Feed } else { NavigationMode::Grid };
        prop_assert_eq!(app.mode(), expected);
    }

    #[test]
    fn gesture_never_changes_tab_and_mode(
        start in 0i32..2000,
        gestures in prop::collection::vec((-300i32..=300, -300i32..=300), 1..12),
    ) {
        let mut app = app();
        app.run(&Script::new().scroll(f64::from(start)));

        for (dx, dy) in gestures {
            let mode = app.mode();
            let tab = app.active_tab();
            app.run(&Script::new().swipe(f64::from(dx), f64::from(dy)).wait(SETTLE));
            let both = app.mode() != mode && app.active_tab() != tab;
            prop_assert!(!both, "gesture ({dx}, {dy}) changed tab and mode");
        }
    }

    #[test]
    fn feed_offset_survives_grid_excursion(
        grid_scrolls in prop::collection::vec(-3000i32..3000, 0..6),
    ) {
        let mut app = app();
        let before = app.frame().feed_offset;

        let mut script = Script::new().pull(250.0).wait(SETTLE);
        for dy in grid_scrolls {
            script = script.scroll(f64::from(dy));
        }
        app.run(&script.scroll(-10_000.0).pull(250.0));

        prop_assert_eq!(app.mode(), NavigationMode::Feed);
        prop_assert_eq!(app.frame().feed_offset, before);
        prop_assert_eq!(app.feed_scroll().offset(), before);
    }
}
