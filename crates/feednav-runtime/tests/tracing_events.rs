//! Structured log contract: span names and event messages the coordinator emits.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use feednav_core::{GestureEvent, NavConfig, ScrollPosition};
use feednav_runtime::{LoadError, NavMsg, ViewModeCoordinator, ViewerId};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use web_time::Instant;

#[derive(Default)]
struct NavTraceState {
    spans: Vec<String>,
    messages: Vec<String>,
}

impl NavTraceState {
    fn saw(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

struct NavTraceCapture {
    state: Arc<Mutex<NavTraceState>>,
}

impl<S> Layer<S> for NavTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        self.state
            .lock()
            .expect("nav trace lock")
            .spans
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.state.lock().expect("nav trace lock").messages.push(message);
        }
    }
}

fn capture() -> (Arc<Mutex<NavTraceState>>, tracing::subscriber::DefaultGuard) {
    let state = Arc::new(Mutex::new(NavTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(NavTraceCapture {
        state: Arc::clone(&state),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    (state, guard)
}

fn coordinator(t: Instant) -> ViewModeCoordinator {
    let mut c = ViewModeCoordinator::new(NavConfig::default(), ViewerId::new("viewer"));
    c.update(
        GestureEvent::Scroll(ScrollPosition::top(800.0, 5000.0)).into(),
        t,
    );
    c
}

fn pull(c: &mut ViewModeCoordinator, dy: f64, t: Instant) {
    c.update(GestureEvent::down(1, 100.0, 100.0).into(), t);
    c.update(GestureEvent::moved(1, 100.0, 100.0 + dy / 2.0).into(), t);
    c.update(GestureEvent::moved(1, 100.0, 100.0 + dy).into(), t);
    c.update(GestureEvent::up(1, 100.0, 100.0 + dy).into(), t);
}

#[test]
fn mode_switch_emits_span_and_event() {
    let (state, _guard) = capture();
    let t = Instant::now();
    let mut c = coordinator(t);
    pull(&mut c, 260.0, t);

    let snapshot = state.lock().expect("nav trace lock");
    assert!(
        snapshot.spans.iter().any(|s| s == "feednav.update"),
        "expected feednav.update span"
    );
    assert!(snapshot.saw("feednav.mode_switch"), "expected feednav.mode_switch event");
}

#[test]
fn dropped_switch_and_stale_load_are_logged() {
    let (state, _guard) = capture();
    let t = Instant::now();
    let mut c = coordinator(t);
    pull(&mut c, 260.0, t);
    c.update(
        GestureEvent::Scroll(ScrollPosition::top(800.0, 2000.0)).into(),
        t,
    );
    pull(&mut c, 260.0, t + Duration::from_millis(50));
    c.update(
        NavMsg::RecallLoaded {
            ticket: feednav_runtime::LoadTicket(999),
            result: Err(LoadError::Timeout),
        },
        t,
    );

    let snapshot = state.lock().expect("nav trace lock");
    assert!(snapshot.saw("feednav.mode_switch_dropped"));
    assert!(snapshot.saw("feednav.load_stale"));
    assert!(!snapshot.saw("feednav.load_failed"));
}

#[test]
fn wheel_during_drag_is_logged_as_ignored() {
    let (state, _guard) = capture();
    let t = Instant::now();
    let mut c = coordinator(t);
    c.update(GestureEvent::down(1, 100.0, 100.0).into(), t);
    c.update(
        GestureEvent::Wheel {
            delta_x: 0.0,
            delta_y: -200.0,
        }
        .into(),
        t,
    );

    let snapshot = state.lock().expect("nav trace lock");
    assert!(snapshot.saw("feednav.input_ignored"));
    assert!(!snapshot.saw("feednav.mode_switch"));
}
