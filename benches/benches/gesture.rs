// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use understory_gesture::{
    FrameRequest, GestureConfig, GestureHost, InsetTransHelper, OutsetTransHelper, PointerEvent,
    PointerId, PointerSample,
};
use understory_shape_policy::{IntRect, IntSize};

#[derive(Default)]
struct NullHost {
    frames: u64,
}

impl GestureHost for NullHost {
    fn request_frame(&mut self) -> FrameRequest {
        self.frames += 1;
        FrameRequest(self.frames)
    }

    fn cancel_frame(&mut self, _request: FrameRequest) {}

    fn request_redraw(&mut self) {}
}

fn finger(id: u32, x: f64, y: f64) -> PointerSample {
    PointerSample::new(PointerId(id), Point::new(x, y)).with_touch_major(60.0)
}

/// One finger wandering back and forth across the viewport.
fn drag_stream(moves: usize) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(moves + 2);
    events.push(PointerEvent::down(0, finger(0, 500.0, 500.0)));
    for i in 0..moves {
        let t = i as f64;
        let x = 500.0 + 300.0 * (t * 0.05).sin();
        let y = 500.0 + 200.0 * (t * 0.03).cos();
        events.push(PointerEvent::moved(8 * (i as u64 + 1), [finger(0, x, y)]));
    }
    // Slow release so no fling is started.
    events.push(PointerEvent::up(8 * moves as u64 + 500, finger(0, 500.0, 500.0)));
    events
}

/// Two fingers opening and closing around the viewport center.
fn pinch_stream(moves: usize) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(moves + 4);
    let pair = |spread: f64| [finger(0, 500.0 - spread, 500.0), finger(1, 500.0 + spread, 500.0)];
    events.push(PointerEvent::down(0, finger(0, 400.0, 500.0)));
    events.push(PointerEvent::pointer_down(4, 1, pair(100.0)));
    for i in 0..moves {
        let spread = 150.0 + 100.0 * (i as f64 * 0.05).sin();
        events.push(PointerEvent::moved(8 * (i as u64 + 1), pair(spread)));
    }
    let end = 8 * moves as u64 + 8;
    events.push(PointerEvent::pointer_up(end, 1, pair(150.0)));
    events.push(PointerEvent::up(end + 8, finger(0, 350.0, 500.0)));
    events
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/drag");

    for moves in [64usize, 512, 4_096] {
        let events = drag_stream(moves);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(BenchmarkId::new("inset", moves), &events, |b, events| {
            b.iter_batched(
                || {
                    InsetTransHelper::inset(
                        IntRect::new(0, 0, 1000, 1000),
                        IntSize::new(400, 400),
                        IntSize::new(50, 50),
                        GestureConfig::default(),
                    )
                    .unwrap()
                },
                |mut helper| {
                    let mut host = NullHost::default();
                    helper.set_current_shape(IntRect::new(300, 300, 700, 700));
                    for event in events {
                        black_box(helper.process_event(&mut host, event));
                    }
                    black_box(helper.current_shape());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("outset", moves), &events, |b, events| {
            b.iter_batched(
                || {
                    OutsetTransHelper::outset(
                        IntRect::new(0, 0, 1000, 1000),
                        IntSize::new(2000, 2000),
                        IntSize::new(4000, 4000),
                        GestureConfig::default(),
                    )
                    .unwrap()
                },
                |mut helper| {
                    let mut host = NullHost::default();
                    for event in events {
                        black_box(helper.process_event(&mut host, event));
                    }
                    black_box(helper.current_shape());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/pinch");

    for moves in [64usize, 512, 4_096] {
        let events = pinch_stream(moves);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(BenchmarkId::new("outset", moves), &events, |b, events| {
            b.iter_batched(
                || {
                    OutsetTransHelper::outset(
                        IntRect::new(0, 0, 1000, 1000),
                        IntSize::new(1000, 1000),
                        IntSize::new(4000, 4000),
                        GestureConfig::default(),
                    )
                    .unwrap()
                },
                |mut helper| {
                    let mut host = NullHost::default();
                    for event in events {
                        black_box(helper.process_event(&mut host, event));
                    }
                    black_box(helper.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_fling(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/fling");

    // A fast flick across a large photo, then frames until the fling settles.
    let flick = [
        PointerEvent::down(0, finger(0, 900.0, 500.0)),
        PointerEvent::moved(8, [finger(0, 850.0, 500.0)]),
        PointerEvent::moved(16, [finger(0, 700.0, 480.0)]),
        PointerEvent::moved(24, [finger(0, 500.0, 460.0)]),
        PointerEvent::up(32, finger(0, 500.0, 460.0)),
    ];

    group.bench_function("outset_until_settled", |b| {
        b.iter_batched(
            || {
                OutsetTransHelper::outset(
                    IntRect::new(0, 0, 1000, 1000),
                    IntSize::new(1000, 1000),
                    IntSize::new(40_000, 40_000),
                    GestureConfig::default(),
                )
                .unwrap()
            },
            |mut helper| {
                let mut host = NullHost::default();
                helper.set_current_shape(IntRect::new(-10_000, -10_000, 20_000, 20_000));
                for event in &flick {
                    helper.process_event(&mut host, event);
                }
                let mut time = 32;
                while helper.machine().is_frame_pending() {
                    time += 16;
                    helper.on_frame(&mut host, time);
                }
                black_box(helper.current_shape());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_drag, bench_pinch, bench_fling);
criterion_main!(benches);
