// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing the probe sector as an overlay.
//!
//! Prints the wedge outline as SVG path data, then drives an overlay that records
//! the CSS transform it would apply on each display frame.
//!
//! Run:
//! - `cargo run -p understory_demos --example probe_overlay`

use std::f64::consts::PI;

use kurbo::{Affine, Point, Rect, Shape, Size};
use understory_prefetch::render::css_transform;
use understory_prefetch::{
    Overlay, PrefetchConfig, Prefetcher, ProbeArea, ProbeRegion, TargetSource, Timestamp,
};

struct EmptyPage;

impl TargetSource for EmptyPage {
    type Target = u32;

    fn targets(&self) -> Vec<u32> {
        Vec::new()
    }

    fn bounds(&self, _target: &u32) -> Rect {
        Rect::ZERO
    }

    fn viewport(&self) -> Size {
        Size::new(800.0, 600.0)
    }
}

#[derive(Default)]
struct StyleOverlay {
    frame_requests: usize,
    transforms: Vec<Affine>,
}

impl Overlay for StyleOverlay {
    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn apply_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }
}

fn main() {
    env_logger::init();

    let config = PrefetchConfig::default().with_probe_area(true);
    let area = ProbeArea::new(config.proximity, config.coverage_radians());
    println!("== Wedge ==");
    println!("  box {:?}, apex offset {:?}", area.size(), area.offset());
    println!("  d=\"{}\"", area.svg_path_data());
    let outline = area.to_path(0.1);
    println!("  bbox {:?}", outline.bounding_box());

    let mut prefetcher =
        Prefetcher::with_overlay(config, EmptyPage, |_: &u32| {}, StyleOverlay::default())
            .expect("valid config");
    let ms = Timestamp::from_millis;
    let _ = prefetcher.attach(ms(0));

    println!("== Frames ==");
    // Three moves land before the display frame; only one frame is requested.
    let _ = prefetcher.pointer_move(ms(0), Point::new(100.0, 100.0));
    let _ = prefetcher.pointer_move(ms(12), Point::new(140.0, 100.0));
    let _ = prefetcher.pointer_move(ms(24), Point::new(140.0, 140.0));
    assert_eq!(prefetcher.overlay().frame_requests, 1);
    assert!(prefetcher.frame());
    println!("  style.transform = {}", css_transform(&prefetcher.probe()));

    let _ = prefetcher.pointer_move(ms(40), Point::new(100.0, 140.0));
    assert!(prefetcher.frame());
    println!("  style.transform = {}", css_transform(&prefetcher.probe()));

    assert_eq!(prefetcher.overlay().transforms.len(), 2);
    assert_eq!(
        css_transform(&ProbeRegion {
            origin: Point::new(100.0, 140.0),
            direction: PI,
        }),
        css_transform(&prefetcher.probe())
    );

    // Placing the path directly puts the apex on the pointer.
    let apex = area.placement(&prefetcher.probe()) * area.center();
    println!("  apex at {apex:?}");
}
