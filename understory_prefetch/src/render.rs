// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render sync for the optional probe overlay.
//!
//! ## Overview
//!
//! The overlay is a wedge drawn in its own `2r × 2r` box and moved onto the pointer with a
//! translate + rotate transform. [`ProbeArea`] describes the wedge; [`RenderSync`] coalesces
//! transform updates so at most one is applied per display frame.
//!
//! Nothing here affects prediction or dispatch. Hosts without an overlay use [`NoOverlay`].
//!
//! ## Arc direction
//!
//! Viewport angles turn clockwise on screen, while an SVG arc with sweep flag `0` is traced in the
//! counter-clockwise sense. The wedge outline therefore starts at the point for the *end* angle
//! and arcs back to the point for the *start* angle. Drawing it the other way round produces the
//! complementary wedge.

use alloc::format;
use alloc::string::String;
use core::f64::consts::PI;

use kurbo::{Affine, Arc, BezPath, Point, Size, Vec2};
use understory_schedule::FrameGate;

use crate::motion::ProbeRegion;
use crate::trig::{point_on_circle, rad_to_deg};

/// Host surface for the probe overlay.
///
/// All calls are best-effort.
pub trait Overlay {
    /// Whether an overlay element exists. A missing overlay disables visual feedback.
    fn is_present(&self) -> bool {
        true
    }

    /// Ask the host for a display-frame callback, which must call
    /// [`Prefetcher::frame`](crate::Prefetcher::frame).
    fn request_frame(&mut self);

    /// Cancel a previously requested frame.
    fn cancel_frame(&mut self) {}

    /// Position the overlay: `transform` maps the wedge apex onto the pointer and rotates it to
    /// the probe direction (see [`overlay_transform`]).
    fn apply_transform(&mut self, transform: Affine);
}

/// The absent overlay.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    #[inline]
    fn is_present(&self) -> bool {
        false
    }

    #[inline]
    fn request_frame(&mut self) {}

    #[inline]
    fn apply_transform(&mut self, _transform: Affine) {}
}

/// The transform applied to the overlay element for `probe`: translate to the origin, then
/// rotate by the direction, about the element's centre.
pub fn overlay_transform(probe: &ProbeRegion) -> Affine {
    Affine::translate(probe.origin.to_vec2()) * Affine::rotate(probe.direction)
}

/// [`overlay_transform`] as a CSS `transform` value.
pub fn css_transform(probe: &ProbeRegion) -> String {
    format!(
        "translate({}px, {}px) rotate({}deg)",
        probe.origin.x,
        probe.origin.y,
        rad_to_deg(probe.direction)
    )
}

/// Geometry of the overlay wedge in its local `2r × 2r` box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeArea {
    radius: f64,
    coverage: f64,
}

impl ProbeArea {
    /// A wedge of `radius` and `coverage` radians, facing angle `0`.
    pub fn new(radius: f64, coverage: f64) -> Self {
        Self { radius, coverage }
    }

    /// Wedge radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Size of the overlay box.
    pub fn size(&self) -> Size {
        Size::new(2.0 * self.radius, 2.0 * self.radius)
    }

    /// Apex of the wedge in box coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.radius, self.radius)
    }

    /// Where to place the box's top-left corner relative to the pointer so the apex sits on it.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(-self.radius, -self.radius)
    }

    /// Lower angular bound.
    pub fn start_angle(&self) -> f64 {
        -self.coverage / 2.0
    }

    /// Upper angular bound.
    pub fn end_angle(&self) -> f64 {
        self.coverage / 2.0
    }

    /// Whether the arc spans more than half a turn.
    pub fn large_arc(&self) -> bool {
        self.end_angle() - self.start_angle() > PI
    }

    /// Arc endpoints in drawing order: the end-angle point first, then the start-angle point.
    pub fn arc_endpoints(&self) -> (Point, Point) {
        let c = self.center();
        (
            point_on_circle(c, self.radius, self.end_angle()),
            point_on_circle(c, self.radius, self.start_angle()),
        )
    }

    /// The wedge outline as a Bézier path; the arc is approximated within `tolerance`.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        let c = self.center();
        let (from, _) = self.arc_endpoints();
        let arc = Arc {
            center: c,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: self.end_angle(),
            sweep_angle: -self.coverage,
            x_rotation: 0.0,
        };
        let mut path = BezPath::new();
        path.move_to(c);
        path.line_to(from);
        path.extend(arc.append_iter(tolerance));
        path.line_to(c);
        path.close_path();
        path
    }

    /// The wedge outline as SVG path data.
    pub fn svg_path_data(&self) -> String {
        let c = self.center();
        let r = self.radius;
        let (from, to) = self.arc_endpoints();
        format!(
            "M{} {} L {} {} A {r} {r} 0 {} 0 {} {} L {} {}",
            c.x,
            c.y,
            from.x,
            from.y,
            u8::from(self.large_arc()),
            to.x,
            to.y,
            c.x,
            c.y,
        )
    }

    /// Full box-to-viewport transform for `probe`: apex onto the pointer, rotated to its direction.
    ///
    /// Use this when drawing [`to_path`](Self::to_path) directly instead of positioning an element.
    pub fn placement(&self, probe: &ProbeRegion) -> Affine {
        overlay_transform(probe) * Affine::translate(-self.center().to_vec2())
    }
}

/// Coalesces overlay transforms to at most one per display frame.
#[derive(Clone, Debug, Default)]
pub struct RenderSync {
    gate: FrameGate,
    enabled: bool,
}

impl RenderSync {
    /// Create a render sync; a disabled one never requests frames.
    pub fn new(enabled: bool) -> Self {
        Self {
            gate: FrameGate::new(),
            enabled,
        }
    }

    /// Whether overlay updates are produced.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a frame is queued.
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Queue a transform update. Requests a host frame only if none is queued.
    ///
    /// Returns `true` if a frame was requested.
    pub fn request<O: Overlay + ?Sized>(&mut self, overlay: &mut O) -> bool {
        if !self.enabled || !self.gate.request() {
            return false;
        }
        overlay.request_frame();
        true
    }

    /// The host frame arrived: apply the transform for the probe as of now.
    ///
    /// Returns `true` if a transform was applied.
    pub fn frame<O: Overlay + ?Sized>(&mut self, probe: &ProbeRegion, overlay: &mut O) -> bool {
        if !self.gate.fire() {
            return false;
        }
        overlay.apply_transform(overlay_transform(probe));
        true
    }

    /// Drop a queued frame, cancelling the host request.
    pub fn cancel<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        if self.gate.cancel() {
            overlay.cancel_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::deg_to_rad;
    use alloc::vec::Vec;
    use core::f64::consts::FRAC_PI_2;
    use kurbo::{PathEl, Shape};

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < EPS
    }

    #[derive(Default)]
    struct Surface {
        requested: usize,
        cancelled: usize,
        applied: Vec<Affine>,
    }

    impl Overlay for Surface {
        fn request_frame(&mut self) {
            self.requested += 1;
        }

        fn cancel_frame(&mut self) {
            self.cancelled += 1;
        }

        fn apply_transform(&mut self, transform: Affine) {
            self.applied.push(transform);
        }
    }

    // With the start/end swap, the first endpoint is below the axis (positive y) on screen.
    #[test]
    fn endpoints_are_swapped() {
        let area = ProbeArea::new(100.0, deg_to_rad(60.0));
        let (from, to) = area.arc_endpoints();
        assert!(from.y > area.center().y);
        assert!(to.y < area.center().y);
        assert!((from.x - to.x).abs() < EPS);
        assert!(!area.large_arc());
        assert!(ProbeArea::new(100.0, deg_to_rad(270.0)).large_arc());
    }

    #[test]
    fn svg_data_matches_geometry() {
        let area = ProbeArea::new(10.0, PI);
        let d = area.svg_path_data();
        assert!(d.starts_with("M10 10 L "), "{d}");
        assert!(d.contains(" A 10 10 0 0 0 "), "{d}");
        assert!(d.ends_with(" L 10 10"), "{d}");
    }

    #[test]
    fn path_spans_the_wedge() {
        let area = ProbeArea::new(50.0, deg_to_rad(60.0));
        let path = area.to_path(0.1);
        let els = path.elements();
        assert!(matches!(els[0], PathEl::MoveTo(p) if close(p, area.center())));
        assert!(els.iter().any(|e| matches!(e, PathEl::CurveTo(..))));
        assert!(matches!(els.last(), Some(PathEl::ClosePath)));
        let bbox = path.bounding_box();
        // Wedge faces +x from the apex and stays within the box (up to curve fitting error).
        assert!(bbox.x0 >= area.center().x - EPS);
        assert!(bbox.x1 <= area.size().width + 0.1);
        assert!(bbox.y0 >= 0.0 && bbox.y1 <= area.size().height);
    }

    #[test]
    fn placement_puts_apex_on_pointer() {
        let area = ProbeArea::new(50.0, deg_to_rad(60.0));
        let probe = ProbeRegion {
            origin: Point::new(300.0, 200.0),
            direction: FRAC_PI_2,
        };
        let m = area.placement(&probe);
        assert!(close(m * area.center(), probe.origin));
        // The wedge tip at local angle 0 now points down the screen.
        let tip = Point::new(2.0 * area.radius(), area.radius());
        assert!(close(m * tip, Point::new(300.0, 250.0)));
    }

    #[test]
    fn css_string_uses_degrees() {
        let probe = ProbeRegion {
            origin: Point::new(12.0, 34.0),
            direction: FRAC_PI_2,
        };
        assert_eq!(css_transform(&probe), "translate(12px, 34px) rotate(90deg)");
    }

    #[test]
    fn frames_coalesce() {
        let mut sync = RenderSync::new(true);
        let mut surface = Surface::default();
        let probe = ProbeRegion::IDLE;
        assert!(sync.request(&mut surface));
        assert!(!sync.request(&mut surface));
        assert!(!sync.request(&mut surface));
        assert_eq!(surface.requested, 1);
        assert!(sync.frame(&probe, &mut surface));
        assert_eq!(surface.applied, [Affine::IDENTITY]);
        assert!(!sync.frame(&probe, &mut surface));
        assert!(sync.request(&mut surface));
        assert_eq!(surface.requested, 2);
    }

    #[test]
    fn cancel_only_when_pending() {
        let mut sync = RenderSync::new(true);
        let mut surface = Surface::default();
        sync.cancel(&mut surface);
        assert_eq!(surface.cancelled, 0);
        assert!(sync.request(&mut surface));
        sync.cancel(&mut surface);
        assert_eq!(surface.cancelled, 1);
        assert!(!sync.frame(&ProbeRegion::IDLE, &mut surface));
        assert!(surface.applied.is_empty());
    }

    #[test]
    fn disabled_sync_is_inert() {
        let mut sync = RenderSync::new(false);
        let mut surface = Surface::default();
        assert!(!sync.request(&mut surface));
        assert_eq!(surface.requested, 0);
        assert!(!NoOverlay.is_present());
    }
}
