// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The angular wedge extending from the probe.

use core::f64::consts::TAU;

use kurbo::Point;

use crate::motion::ProbeRegion;
use crate::trig::point_in_sector;

/// A circular sector in viewport space.
///
/// Built fresh for every dispatch tick from the current [`ProbeRegion`] and the configured
/// proximity and coverage; never stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sector {
    /// Apex of the wedge.
    pub origin: Point,
    /// Inclusive reach from the apex.
    pub radius: f64,
    /// Lower angular bound in radians (not necessarily normalized).
    pub start_angle: f64,
    /// Upper angular bound in radians (not necessarily normalized).
    pub end_angle: f64,
}

impl Sector {
    /// The sector facing `probe.direction`, `coverage` radians wide.
    ///
    /// `start_angle = direction - coverage / 2` and `end_angle = direction + coverage / 2`.
    pub fn from_probe(probe: &ProbeRegion, radius: f64, coverage: f64) -> Self {
        let half = coverage / 2.0;
        Self {
            origin: probe.origin,
            radius,
            start_angle: probe.direction - half,
            end_angle: probe.direction + half,
        }
    }

    /// Angular width in radians.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether `point` lies inside the sector.
    ///
    /// A sweep of a full turn or more covers every direction, so only the radius applies.
    pub fn contains(&self, point: Point) -> bool {
        if self.sweep() >= TAU {
            return point.distance_squared(self.origin) <= self.radius * self.radius;
        }
        point_in_sector(
            point,
            self.origin,
            self.radius,
            self.start_angle,
            self.end_angle,
        )
    }
}
