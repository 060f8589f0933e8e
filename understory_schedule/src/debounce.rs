// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce: coalesce a burst of calls and act once after a quiet period.
//!
//! ## Semantics
//!
//! - [`Debounce::run`] cancels any pending invocation and schedules a new one `delay` after `now`.
//! - [`Debounce::poll`] hands back the pending arguments once their deadline has been reached.
//! - [`Debounce::clear`] cancels the pending invocation without firing it.
//!
//! At most one invocation is pending at a time and the last call's arguments win.

use core::time::Duration;

use crate::time::Timestamp;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pending<A> {
    deadline: Timestamp,
    args: A,
}

/// A debounced invocation slot carrying arguments of type `A`.
///
/// The combinator does not own the wrapped function. The caller invokes it with the
/// arguments returned by [`poll`](Self::poll), which keeps the state machine free of
/// captured closures and lets the caller keep `&mut` access to its own state.
///
/// ```
/// use core::time::Duration;
/// use understory_schedule::{Debounce, Timestamp};
///
/// let mut d = Debounce::new(Duration::from_millis(100));
/// d.run(Timestamp::from_millis(0), "first");
/// d.run(Timestamp::from_millis(30), "second");
/// assert_eq!(d.deadline(), Some(Timestamp::from_millis(130)));
/// assert_eq!(d.poll(Timestamp::from_millis(130)), Some("second"));
/// assert!(!d.is_pending());
/// ```
#[derive(Clone, Debug)]
pub struct Debounce<A = ()> {
    delay: Duration,
    pending: Option<Pending<A>>,
}

impl<A> Debounce<A> {
    /// Create a debounce with the given quiet period.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured quiet period.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule an invocation with `args`, replacing any pending one.
    pub fn run(&mut self, now: Timestamp, args: A) {
        self.pending = Some(Pending {
            deadline: now.saturating_add(self.delay),
            args,
        });
    }

    /// Cancel the pending invocation, if any, without firing it.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Whether an invocation is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending invocation is due, if any.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending arguments if their deadline is at or before `now`.
    ///
    /// Returns `None` when nothing is pending or the quiet period has not elapsed yet.
    pub fn poll(&mut self, now: Timestamp) -> Option<A> {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            self.pending.take().map(|p| p.args)
        } else {
            None
        }
    }
}
