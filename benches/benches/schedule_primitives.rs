// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_schedule::{BurstThrottle, Debounce, FrameGate, Timestamp};

const EVENTS: u64 = 10_000;

fn bench_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("burst_throttle");
    group.throughput(Throughput::Elements(EVENTS));
    for &(interval, burst) in &[(10_u64, 1_u32), (100, 1), (100, 8)] {
        group.bench_function(format!("run_i{interval}_b{burst}"), |b| {
            b.iter(|| {
                let mut throttle = BurstThrottle::new(Duration::from_millis(interval), burst);
                (0..EVENTS)
                    .filter(|&t| throttle.run(Timestamp::from_millis(t)))
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_debounce(c: &mut Criterion) {
    let mut group = c.benchmark_group("debounce");
    group.throughput(Throughput::Elements(EVENTS));
    group.bench_function("run_then_poll", |b| {
        b.iter(|| {
            let mut debounce = Debounce::new(Duration::from_millis(100));
            let mut fired = 0_u64;
            for t in 0..EVENTS {
                let now = Timestamp::from_millis(t);
                if debounce.poll(now).is_some() {
                    fired += 1;
                }
                // Bursts of 50 events separated by quiet gaps.
                if t % 200 < 50 {
                    debounce.run(now, t);
                }
            }
            black_box(fired)
        });
    });
    group.finish();
}

fn bench_frame_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_gate");
    group.throughput(Throughput::Elements(EVENTS));
    group.bench_function("request_fire", |b| {
        b.iter(|| {
            let mut gate = FrameGate::new();
            let mut frames = 0_u64;
            for t in 0..EVENTS {
                gate.request();
                if t % 16 == 0 && gate.fire() {
                    frames += 1;
                }
            }
            black_box(frames)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_throttle, bench_debounce, bench_frame_gate);
criterion_main!(benches);
