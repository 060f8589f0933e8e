// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Throttle and debounce on a millisecond timeline.
//!
//! A host timer loop: after every event, ask the primitive for its deadline and
//! poll it when that time arrives.
//!
//! Run:
//! - `cargo run -p understory_demos --example schedule_timeline`

use std::time::Duration;

use understory_schedule::{BurstThrottle, Debounce, Timestamp};

fn main() {
    env_logger::init();
    let ms = Timestamp::from_millis;

    println!("== BurstThrottle (1 per 100ms) ==");
    let mut throttle = BurstThrottle::new(Duration::from_millis(100), 1);
    let mut invoked = Vec::new();
    for t in [0, 3, 7, 150, 160, 260] {
        let ran = throttle.call(ms(t), || t).is_some();
        println!("  t={t:>3}ms run -> {}", if ran { "invoked" } else { "dropped" });
        if ran {
            invoked.push(t);
        }
    }
    assert_eq!(invoked, [0, 150, 260]);

    println!("== Debounce (100ms) ==");
    let mut debounce = Debounce::new(Duration::from_millis(100));
    for (i, t) in [0, 10, 20, 30, 40].into_iter().enumerate() {
        debounce.run(ms(t), i + 1);
        log::debug!("debounce armed until {:?}", debounce.deadline());
    }
    let deadline = debounce.deadline().expect("pending after run");
    assert_eq!(deadline, ms(140));
    assert_eq!(debounce.poll(ms(139)), None);
    let fired = debounce.poll(deadline);
    println!("  fired at {:?} with call #{}", deadline.since_epoch(), fired.unwrap_or(0));
    assert_eq!(fired, Some(5));
    assert!(!debounce.is_pending());
}
