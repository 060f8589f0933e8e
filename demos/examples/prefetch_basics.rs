// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefetching links along a simulated pointer path.
//!
//! A host loop feeds pointer moves, a scroll, and a structural change into a
//! `Prefetcher`, polling whenever `next_deadline` has passed.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example prefetch_basics`

use kurbo::{Point, Rect, Size, Vec2};
use understory_prefetch::{PrefetchConfig, PrefetchSink, Prefetcher, TargetSource, Timestamp};

struct Link {
    href: &'static str,
    // Document-space rectangle; the page applies the scroll offset.
    rect: Rect,
}

struct Page {
    links: Vec<Link>,
    scroll_y: f64,
}

impl TargetSource for Page {
    type Target = &'static str;

    fn targets(&self) -> Vec<&'static str> {
        self.links.iter().map(|l| l.href).collect()
    }

    fn bounds(&self, href: &&'static str) -> Rect {
        self.links
            .iter()
            .find(|l| l.href == *href)
            .map(|l| l.rect - Vec2::new(0.0, self.scroll_y))
            .unwrap_or(Rect::ZERO)
    }

    fn viewport(&self) -> Size {
        Size::new(1280.0, 720.0)
    }
}

#[derive(Default)]
struct Warmer {
    fetched: Vec<&'static str>,
}

impl PrefetchSink<&'static str> for Warmer {
    fn prefetch(&mut self, href: &&'static str) {
        if !self.fetched.contains(href) {
            println!("  prefetch {href}");
            self.fetched.push(*href);
        }
    }
}

fn link(href: &'static str, x: f64, y: f64) -> Link {
    Link {
        href,
        rect: Rect::from_origin_size((x, y), (120.0, 24.0)),
    }
}

fn main() {
    env_logger::init();

    let page = Page {
        links: vec![
            link("/pricing", 500.0, 90.0),
            link("/docs", 200.0, 500.0),
            link("/blog", 900.0, 900.0),
        ],
        scroll_y: 0.0,
    };
    let mut prefetcher = Prefetcher::new(PrefetchConfig::default(), page, Warmer::default())
        .expect("default config is valid");
    let ms = Timestamp::from_millis;

    let report = prefetcher.attach(ms(0));
    println!("== Attach ==\n  {} of {} links visible", report.kept, report.enumerated);

    println!("== Move right toward /pricing ==");
    for (i, t) in (0..400).step_by(16).enumerate() {
        let x = 120.0 + 20.0 * i as f64;
        let _ = prefetcher.pointer_move(ms(t), Point::new(x, 100.0));
    }

    println!("== Scroll so /blog comes into view ==");
    prefetcher.source_mut().scroll_y = 400.0;
    prefetcher.scroll(ms(420));
    prefetcher.scroll(ms(440));
    let due = prefetcher.next_deadline().expect("scroll refresh pending");
    assert_eq!(due, ms(540));
    if let Some(report) = prefetcher.poll(due) {
        println!("  refreshed ({:?}): {} visible", report.cause, report.kept);
    }

    println!("== Move down-right toward /blog ==");
    for i in 0..12_u32 {
        let step = f64::from(i);
        let p = Point::new(650.0 + 25.0 * step, 250.0 + 20.0 * step);
        let _ = prefetcher.pointer_move(ms(550 + 16 * u64::from(i)), p);
    }

    println!("== Detach ==");
    prefetcher.detach();
    println!("  probe reset to {:?}", prefetcher.probe());

    assert_eq!(prefetcher.sink().fetched, ["/pricing", "/blog"]);
}
