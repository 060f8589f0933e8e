// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_prefetch::dispatch::sector_hits;
use understory_prefetch::trig::{deg_to_rad, point_in_sector};
use understory_prefetch::{
    CandidateSet, PrefetchConfig, PrefetchDispatcher, Prefetcher, ProbeRegion, RefreshCause,
    TargetSource, Timestamp, VisibilityTest,
};

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A page of `n` link-sized rectangles scattered over (and slightly beyond) the viewport.
struct Page {
    links: Vec<Rect>,
}

impl Page {
    fn random(n: usize, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let links = (0..n)
            .map(|_| {
                let x = rng.next_f64() * VIEWPORT.width * 1.2 - 0.1 * VIEWPORT.width;
                let y = rng.next_f64() * VIEWPORT.height * 1.5 - 0.25 * VIEWPORT.height;
                Rect::from_origin_size((x, y), (40.0 + rng.next_f64() * 120.0, 18.0))
            })
            .collect();
        Self { links }
    }
}

impl TargetSource for Page {
    type Target = usize;

    fn targets(&self) -> Vec<usize> {
        (0..self.links.len()).collect()
    }

    fn bounds(&self, target: &usize) -> Rect {
        self.links[*target]
    }

    fn viewport(&self) -> Size {
        VIEWPORT
    }
}

fn bench_point_in_sector(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_in_sector");
    let mut rng = Rng::new(7);
    let points: Vec<Point> = (0..1024)
        .map(|_| Point::new(rng.next_f64() * 600.0 - 300.0, rng.next_f64() * 600.0 - 300.0))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    for (name, start, end) in [
        ("plain", deg_to_rad(30.0), deg_to_rad(90.0)),
        ("wrapping", deg_to_rad(350.0), deg_to_rad(10.0)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                points
                    .iter()
                    .filter(|p| point_in_sector(**p, Point::ZERO, 250.0, start, end))
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_refresh");
    for &n in &[100_usize, 1_000, 10_000] {
        let page = Page::random(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        for visibility in [VisibilityTest::TopLeft, VisibilityTest::Intersects] {
            group.bench_function(format!("{visibility:?}_n{n}"), |b| {
                b.iter_batched(
                    || CandidateSet::new(visibility),
                    |mut set| {
                        black_box(set.refresh(&page, RefreshCause::SCROLL));
                        set
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_dispatch_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_tick");
    for &n in &[100_usize, 1_000, 10_000] {
        let page = Page::random(n, 9);
        let mut set = CandidateSet::new(VisibilityTest::Intersects);
        let _ = set.refresh(&page, RefreshCause::ATTACH);
        let probe = ProbeRegion {
            origin: Point::new(960.0, 540.0),
            direction: deg_to_rad(20.0),
        };
        group.throughput(Throughput::Elements(set.len() as u64));
        group.bench_function(format!("sector_hits_n{n}"), |b| {
            let sector = probe.sector(250.0, deg_to_rad(60.0));
            b.iter(|| sector_hits(&sector, &set).count());
        });
        group.bench_function(format!("tick_n{n}"), |b| {
            // Zero interval: every tick is permitted.
            let mut dispatcher =
                PrefetchDispatcher::new(Duration::ZERO, 1, 250.0, deg_to_rad(60.0));
            let mut t = 0_u64;
            let mut sink = |target: &usize| {
                black_box(*target);
            };
            b.iter(|| {
                t += 1;
                dispatcher.tick(Timestamp::from_millis(t), &probe, &set, &mut sink)
            });
        });
    }
    group.finish();
}

// A pointer sweeping across the page at 1kHz, with the default 10ms/100ms throttles.
fn bench_pointer_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_stream");
    let path: Vec<Point> = (0..1_000)
        .map(|i| {
            let s = f64::from(i) / 1_000.0;
            Point::new(100.0 + s * 1_700.0, 200.0 + s * 600.0)
        })
        .collect();
    group.throughput(Throughput::Elements(path.len() as u64));
    group.bench_function("sweep_1000_links", |b| {
        b.iter_batched(
            || {
                let sink = |target: &usize| {
                    black_box(*target);
                };
                let mut p =
                    Prefetcher::new(PrefetchConfig::default(), Page::random(1_000, 3), sink)
                        .unwrap();
                let _ = p.attach(Timestamp::ZERO);
                p
            },
            |mut p| {
                for (i, pos) in path.iter().enumerate() {
                    black_box(p.pointer_move(Timestamp::from_millis(i as u64), *pos));
                }
                p
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_point_in_sector,
    bench_refresh,
    bench_dispatch_tick,
    bench_pointer_stream,
);
criterion_main!(benches);
