// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion tracking: derive the probe (origin + facing) from pointer samples.
//!
//! ## Semantics
//!
//! For each accepted sample the direction vector is `current - previous`.
//! Its normalized angle becomes the probe direction and the sample becomes the probe origin.
//! The sample is then stored as the previous position unconditionally, so the direction is always
//! measured against the immediately preceding accepted sample.
//!
//! A sample equal to the previous one is a zero-length move; the direction falls back to `0`.
//!
//! Samples pass through a [`BurstThrottle`] first. Rejected samples leave the tracker untouched.

use core::time::Duration;

use kurbo::Point;
use understory_schedule::{BurstThrottle, Timestamp};

use crate::sector::Sector;
use crate::trig::{angle_of, unit_vector};

/// The predicted aim: where the pointer is and which way it is heading.
///
/// `direction` is in radians, normalized into `[0, 2π)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeRegion {
    /// Latest accepted pointer position.
    pub origin: Point,
    /// Heading in radians, `[0, 2π)`.
    pub direction: f64,
}

impl ProbeRegion {
    /// The idle probe used before any motion and after a detach: origin `(0, 0)`, facing `0`.
    pub const IDLE: Self = Self {
        origin: Point::ZERO,
        direction: 0.0,
    };

    /// The sector of `radius` and `coverage` (radians) facing this probe's direction.
    pub fn sector(&self, radius: f64, coverage: f64) -> Sector {
        Sector::from_probe(self, radius, coverage)
    }
}

impl Default for ProbeRegion {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Consumes pointer positions and maintains the [`ProbeRegion`].
///
/// The tracker is the only writer of the probe; everything else reads snapshots via
/// [`MotionTracker::probe`].
///
/// ```
/// use core::time::Duration;
/// use kurbo::Point;
/// use understory_prefetch::motion::MotionTracker;
///
/// let mut tracker = MotionTracker::new(Duration::ZERO);
/// tracker.update(Point::new(100.0, 0.0));
/// assert_eq!(tracker.probe().direction, 0.0);
/// tracker.update(Point::new(100.0, 100.0));
/// assert!((tracker.probe().direction - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct MotionTracker {
    previous: Point,
    probe: ProbeRegion,
    sampler: BurstThrottle,
}

impl MotionTracker {
    /// Create a tracker accepting at most one sample per `sample_interval`.
    ///
    /// A zero interval accepts every sample.
    pub fn new(sample_interval: Duration) -> Self {
        Self {
            previous: Point::ZERO,
            probe: ProbeRegion::IDLE,
            sampler: BurstThrottle::new(sample_interval, 1),
        }
    }

    /// Snapshot of the current probe.
    pub fn probe(&self) -> ProbeRegion {
        self.probe
    }

    /// The last accepted position.
    pub fn previous(&self) -> Point {
        self.previous
    }

    /// Offer a pointer sample at `now`.
    ///
    /// Returns `true` if the sampling throttle accepted it and the probe was updated.
    pub fn sample(&mut self, now: Timestamp, position: Point) -> bool {
        if !self.sampler.run(now) {
            return false;
        }
        self.update(position);
        true
    }

    /// Apply a sample unconditionally, bypassing the sampling throttle.
    pub fn update(&mut self, position: Point) {
        let direction = angle_of(unit_vector(position - self.previous));
        self.probe = ProbeRegion {
            origin: position,
            direction,
        };
        self.previous = position;
        log::trace!(
            "probe origin=({:.1}, {:.1}) direction={:.3}",
            position.x,
            position.y,
            direction
        );
    }

    /// Snap back to the idle probe, forget the previous position, and drop the sampling window.
    pub fn reset(&mut self) {
        self.previous = Point::ZERO;
        self.probe = ProbeRegion::IDLE;
        self.rearm();
    }

    /// Cancel the pending sampling reset, keeping the probe as is.
    pub fn freeze(&mut self) {
        self.sampler.clear();
    }

    /// Restore the sampling window so the next sample is accepted.
    pub(crate) fn rearm(&mut self) {
        self.sampler = BurstThrottle::new(self.sampler.interval(), 1);
    }
}
