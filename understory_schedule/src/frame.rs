// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame gate: at most one pending display-frame request.
//!
//! Unlike the wall-clock primitives, a frame gate is driven by frame availability.
//! A request made while a frame is already queued is dropped, not queued behind it.
//!
//! ## Usage
//!
//! 1) On each visual update, call [`FrameGate::request`]. Ask the host for a frame
//!    (for example `requestAnimationFrame`) only when it returns `true`.
//! 2) In the frame callback, call [`FrameGate::fire`] and apply the update when it returns `true`.
//! 3) On teardown, call [`FrameGate::cancel`] and cancel the host frame when it returns `true`.

/// Pending-flag guard for display-frame requests.
///
/// ```
/// use understory_schedule::FrameGate;
///
/// let mut gate = FrameGate::new();
/// assert!(gate.request());
/// assert!(!gate.request());
/// assert!(gate.fire());
/// assert!(gate.request());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Create a gate with no frame pending.
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Whether a frame is queued.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Mark a frame as queued.
    ///
    /// Returns `true` if the caller should schedule a host frame, `false` if one is already queued.
    pub fn request(&mut self) -> bool {
        !core::mem::replace(&mut self.pending, true)
    }

    /// Consume the queued frame.
    ///
    /// Returns `true` if a frame was queued. A stray host callback after [`cancel`](Self::cancel)
    /// returns `false` and should apply nothing.
    pub fn fire(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    /// Drop the queued frame.
    ///
    /// Returns `true` if a frame was queued and the host request should be cancelled.
    pub fn cancel(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }
}
