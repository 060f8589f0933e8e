// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Burst throttle: up to N calls per window, excess calls dropped.
//!
//! ## Semantics
//!
//! The throttle keeps a remaining-call counter, initially `max_runs`.
//!
//! - A call with the counter at zero is dropped. It is not queued and it is not an error.
//! - Otherwise the call is permitted and the counter is decremented. If no reset is pending, one
//!   is scheduled `interval` after this call; when it fires the counter is restored to `max_runs`.
//! - [`BurstThrottle::clear`] cancels the pending reset without touching the counter.
//!
//! The window is anchored at the first permitted call after the previous reset. It is not a
//! strict sliding window: a call landing exactly on the reset deadline opens a fresh window.
//!
//! With `max_runs == 1` this is a minimum-spacing limiter.

use core::time::Duration;

use crate::time::Timestamp;

/// A burst-limited throttle.
///
/// ```
/// use core::time::Duration;
/// use understory_schedule::{BurstThrottle, Timestamp};
///
/// let mut t = BurstThrottle::new(Duration::from_millis(100), 2);
/// let ms = Timestamp::from_millis;
/// assert!(t.run(ms(0)));
/// assert!(t.run(ms(1)));
/// assert!(!t.run(ms(2)));
/// assert_eq!(t.reset_deadline(), Some(ms(100)));
/// assert!(t.run(ms(100)));
/// ```
#[derive(Clone, Debug)]
pub struct BurstThrottle {
    interval: Duration,
    max_runs: u32,
    remaining: u32,
    reset_at: Option<Timestamp>,
}

impl BurstThrottle {
    /// Create a throttle permitting `max_runs` calls per `interval`.
    ///
    /// A `max_runs` of zero produces a throttle that drops every call.
    pub const fn new(interval: Duration, max_runs: u32) -> Self {
        Self {
            interval,
            max_runs,
            remaining: max_runs,
            reset_at: None,
        }
    }

    /// The window length.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Calls permitted per window.
    pub const fn max_runs(&self) -> u32 {
        self.max_runs
    }

    /// Calls still permitted in the current window.
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// When the pending counter reset fires, if one is scheduled.
    pub const fn reset_deadline(&self) -> Option<Timestamp> {
        self.reset_at
    }

    /// Fire the pending reset if it is due at `now`.
    ///
    /// Returns `true` if the counter was restored.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.reset_at {
            Some(deadline) if deadline <= now => {
                self.remaining = self.max_runs;
                self.reset_at = None;
                true
            }
            _ => false,
        }
    }

    /// Attempt a call at `now`.
    ///
    /// Returns `true` if the call is permitted; the caller then performs the wrapped work.
    pub fn run(&mut self, now: Timestamp) -> bool {
        self.poll(now);
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.reset_at.is_none() {
            self.reset_at = Some(now.saturating_add(self.interval));
        }
        true
    }

    /// Run `f` if the call at `now` is permitted, returning its result.
    pub fn call<R>(&mut self, now: Timestamp, f: impl FnOnce() -> R) -> Option<R> {
        self.run(now).then(f)
    }

    /// Cancel the pending reset without altering the counter.
    ///
    /// A throttle cleared while exhausted stays exhausted.
    pub fn clear(&mut self) {
        self.reset_at = None;
    }
}
