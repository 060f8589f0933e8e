// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_prefetch --heading-base-level=0

//! Understory Prefetch: pointer-intent prefetching for navigable targets.
//!
//! ## Overview
//!
//! Watching where the pointer is heading is a cheap predictor of what the user clicks next.
//! This crate turns a stream of pointer positions into a *probe*: the latest position plus the
//! heading of the last step.
//! A circular *sector* extends from the probe, `proximity` long and `coverage` degrees wide.
//! On a throttled cadence, every visible target whose rectangle midpoint falls inside the sector
//! is handed to the host for prefetching.
//!
//! - [`motion`]: sampled pointer input to [`ProbeRegion`].
//! - [`sector`] and [`trig`]: the angular-wedge geometry, on Kurbo types.
//! - [`candidates`]: the snapshot of visible targets, refreshed on attach, scroll, and structure changes.
//! - [`dispatch`]: rate-limited hit testing of the sector against the snapshot.
//! - [`render`]: optional overlay drawing of the sector, coalesced to display frames.
//! - [`Prefetcher`]: owns all of the above and exposes the host event handlers.
//!
//! ## Host integration
//!
//! The host implements [`TargetSource`] (enumerate targets and report their rectangles),
//! [`PrefetchSink`] (warm a target; closures work), and optionally [`Overlay`].
//! Time is a host-supplied monotonic [`Timestamp`]; nothing reads a clock or spawns timers.
//! After each event, ask [`Prefetcher::next_deadline`] when to call [`Prefetcher::poll`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_prefetch::{PrefetchConfig, Prefetcher, TargetSource, Timestamp};
//!
//! struct Links(Vec<(&'static str, Rect)>);
//!
//! impl TargetSource for Links {
//!     type Target = &'static str;
//!     fn targets(&self) -> Vec<&'static str> {
//!         self.0.iter().map(|(href, _)| *href).collect()
//!     }
//!     fn bounds(&self, href: &&'static str) -> Rect {
//!         self.0.iter().find(|(h, _)| h == href).map(|(_, r)| *r).unwrap_or(Rect::ZERO)
//!     }
//!     fn viewport(&self) -> Size {
//!         Size::new(1024.0, 768.0)
//!     }
//! }
//!
//! let links = Links(vec![
//!     ("/docs", Rect::new(380.0, 90.0, 420.0, 110.0)),
//!     ("/blog", Rect::new(80.0, 590.0, 120.0, 610.0)),
//! ]);
//!
//! let mut warmed = Vec::new();
//! let sink = |href: &&'static str| warmed.push(*href);
//! let mut prefetcher = Prefetcher::new(PrefetchConfig::default(), links, sink)?;
//! let ms = Timestamp::from_millis;
//!
//! prefetcher.attach(ms(0));
//! // Moving right along y = 100, heading for /docs.
//! prefetcher.pointer_move(ms(0), Point::new(100.0, 100.0));
//! prefetcher.pointer_move(ms(120), Point::new(200.0, 100.0));
//! drop(prefetcher);
//!
//! assert_eq!(warmed, ["/docs"]);
//! # Ok::<(), understory_prefetch::ConfigError>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std`.
//! - `libm`: forwards to Kurbo's `libm` for `no_std` float math.
//! - `serde`: `Serialize`/`Deserialize` for [`PrefetchConfig`] and its enums.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod candidates;
pub mod config;
pub mod dispatch;
pub mod motion;
pub mod prefetcher;
pub mod render;
pub mod sector;
pub mod trig;

pub use candidates::{
    Candidate, CandidateSet, RefreshCause, RefreshReport, TargetSource, VisibilityTest,
};
pub use config::{ConfigError, DetachPolicy, PrefetchConfig};
pub use dispatch::{DispatchOutcome, PrefetchDispatcher, PrefetchSink};
pub use motion::{MotionTracker, ProbeRegion};
pub use prefetcher::Prefetcher;
pub use render::{NoOverlay, Overlay, ProbeArea, RenderSync};
pub use sector::Sector;
pub use understory_schedule::Timestamp;
