// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_schedule --heading-base-level=0

//! Understory Schedule: deterministic, `no_std` timing combinators for UI input.
//!
//! ## Overview
//!
//! Pointer, scroll, and structural-change signals arrive far more often than the work they
//! trigger should run. This crate turns such high-frequency streams into bounded-rate work.
//!
//! - [`Debounce`]: coalesce a burst and act once after a quiet period; the last call's arguments win.
//! - [`BurstThrottle`]: allow up to N calls per window, then drop calls until the window resets.
//! - [`FrameGate`]: allow at most one pending display-frame request at a time.
//!
//! ## Time
//!
//! Nothing here reads a clock or spawns a timer.
//! The host passes a monotonic [`Timestamp`] into every operation and calls `poll(now)` when a
//! deadline reported by the primitive has elapsed (for example from a `setTimeout`, a `calloop`
//! timer, or a test loop).
//! Each primitive owns at most one outstanding deadline, stored as an explicit `Option`.
//!
//! Primitives also process their own due deadline lazily at the start of `run`, so an event that
//! arrives at or after a deadline observes the expired timer even if the host has not polled yet.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use understory_schedule::{BurstThrottle, Debounce, Timestamp};
//!
//! let ms = Timestamp::from_millis;
//!
//! // One call per 100ms window.
//! let mut throttle = BurstThrottle::new(Duration::from_millis(100), 1);
//! assert!(throttle.run(ms(0)));
//! assert!(!throttle.run(ms(5)));
//! assert!(throttle.run(ms(150)));
//!
//! // Act once, 100ms after the burst ends, with the last arguments.
//! let mut debounce = Debounce::new(Duration::from_millis(100));
//! for (i, t) in [0, 10, 20].into_iter().enumerate() {
//!     debounce.run(ms(t), i);
//! }
//! assert_eq!(debounce.poll(ms(119)), None);
//! assert_eq!(debounce.poll(ms(120)), Some(2));
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

pub mod debounce;
pub mod frame;
pub mod throttle;
pub mod time;

pub use debounce::Debounce;
pub use frame::FrameGate;
pub use throttle::BurstThrottle;
pub use time::Timestamp;
