//! Benchmark: surface dispatch cost of a long drag.
//!
//! Run with: `cargo bench -p feednav-core --bench pull_drag_bench`
//!
//! A 120 Hz touch stream delivers a pointer move every ~8ms; the per-event
//! cost here bounds how much of a frame the gesture layer can take.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use feednav_core::{GestureEvent, NavConfig, ScrollPosition, Surface, SurfaceKind};
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(8);

fn drag_events(steps: usize, dy_total: f64) -> Vec<GestureEvent> {
    let mut events = Vec::with_capacity(steps + 2);
    events.push(GestureEvent::down(1, 200.0, 100.0));
    for i in 1..=steps {
        let y = 100.0 + dy_total * (i as f64 / steps as f64);
        events.push(GestureEvent::moved(1, 200.0, y));
    }
    events.push(GestureEvent::up(1, 200.0, 100.0 + dy_total));
    events
}

fn run(surface: &mut Surface, events: &[GestureEvent], start: Instant) {
    for (i, event) in events.iter().enumerate() {
        black_box(surface.handle(event, start + FRAME * i as u32));
    }
}

// ===========================================================================
// Pull at the top edge (accumulating) vs mid-content (pass-through)
// ===========================================================================

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_drag");
    let cfg = NavConfig::default();

    for steps in [16usize, 64, 256] {
        let events = drag_events(steps, 260.0);

        group.bench_with_input(BenchmarkId::new("pull_at_top", steps), &events, |b, ev| {
            b.iter(|| {
                let mut s = Surface::new(SurfaceKind::Feed, &cfg)
                    .with_scroll(ScrollPosition::top(800.0, 6000.0));
                run(&mut s, ev, Instant::now());
            });
        });

        group.bench_with_input(BenchmarkId::new("mid_scroll", steps), &events, |b, ev| {
            b.iter(|| {
                let mut s = Surface::new(SurfaceKind::Feed, &cfg)
                    .with_scroll(ScrollPosition::new(2400.0, 800.0, 6000.0));
                run(&mut s, ev, Instant::now());
            });
        });
    }

    group.finish();
}

// ===========================================================================
// Snap-back settling
// ===========================================================================

fn bench_snap_back(c: &mut Criterion) {
    let cfg = NavConfig::default();
    let events = drag_events(32, 180.0);

    c.bench_function("snap_back_settle", |b| {
        b.iter(|| {
            let mut s = Surface::new(SurfaceKind::Feed, &cfg)
                .with_scroll(ScrollPosition::top(800.0, 6000.0));
            run(&mut s, &events, Instant::now());
            let mut frames = 0u32;
            while s.pull().is_settling() && frames < 600 {
                s.tick(Duration::from_millis(16));
                frames += 1;
            }
            black_box(frames)
        });
    });
}

criterion_group!(benches, bench_drag, bench_snap_back);
criterion_main!(benches);
