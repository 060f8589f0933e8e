// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle and sector math on Kurbo points and vectors.
//!
//! ## Conventions
//!
//! Coordinates are viewport space: `x` grows right, `y` grows down.
//! Angles are radians measured from the positive `x` axis, so in this space a positive angle
//! turns clockwise on screen. Every angle produced here is normalized into `[0, 2π)`.
//!
//! Degenerate inputs are defined values, not errors: a zero vector has the unit vector `(0, 0)`
//! and the angle `0`.

use core::f64::consts::TAU;

use kurbo::{Point, Vec2};

/// Reduce an angle into `[0, 2π)`.
///
/// Non-finite input is returned unchanged.
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle % TAU;
    // Adding 0.0 also turns -0.0 into 0.0.
    let r = if r < 0.0 { r + TAU } else { r + 0.0 };
    // `r + TAU` can round up to exactly TAU for tiny negative remainders.
    if r >= TAU { 0.0 } else { r }
}

/// The unit vector along `v`, or `(0, 0)` when `v` has zero length.
///
/// Vectors whose squared length underflows to zero count as zero length.
pub fn unit_vector(v: Vec2) -> Vec2 {
    if v.dot(v) == 0.0 {
        Vec2::ZERO
    } else {
        v.normalize()
    }
}

/// The direction of `v`, normalized into `[0, 2π)`.
///
/// The zero vector has angle `0`.
pub fn angle_of(v: Vec2) -> f64 {
    normalize_angle(v.atan2())
}

/// The point at `angle` on the circle of `radius` around `center`.
///
/// This is the plain polar-to-Cartesian map. Callers drawing arcs in a counter-clockwise
/// convention swap their start and end angles before calling it; see
/// [`ProbeArea`](crate::render::ProbeArea).
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

/// Whether `point` lies in the sector of `radius` around `origin` spanning
/// `start_angle..=end_angle`.
///
/// Both bounds are reduced into `[0, 2π)` first. Unless the reduced start is less than the
/// reduced end, the sector crosses the `0`/`2π` seam and membership becomes
/// `angle >= start || angle <= end`; equal bounds therefore cover the full circle.
/// The distance test is inclusive.
///
/// A point exactly at `origin` has angle `0`.
///
/// ```
/// use kurbo::Point;
/// use understory_prefetch::trig::{deg_to_rad, point_in_sector};
///
/// let origin = Point::ZERO;
/// let (start, end) = (deg_to_rad(350.0), deg_to_rad(10.0));
/// assert!(point_in_sector(Point::new(5.0, 0.0), origin, 10.0, start, end));
/// assert!(!point_in_sector(Point::new(-5.0, 0.0), origin, 10.0, start, end));
/// ```
pub fn point_in_sector(
    point: Point,
    origin: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> bool {
    if point.distance_squared(origin) > radius * radius {
        return false;
    }
    let angle = angle_of(point - origin);
    let start = normalize_angle(start_angle);
    let end = normalize_angle(end_angle);
    if start < end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Convert degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Convert radians to degrees.
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}
