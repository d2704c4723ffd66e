// Copyright 2015 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use tiny_pathops_path::PathVerb;

use super::axis_intersections;
use super::conic64::Conic64;
use super::cubic64::Cubic64;
use super::line64::Line64;
use super::point64::Point64;
use super::quad64::Quad64;
use super::rect64::Rect64;
use super::{pin_t, Scalar64};

const SEPARATION_EPSILON: f64 = 1e-9;

/// Any curve a path operation can work with (SkDCurve).
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Curve64 {
    Line(Line64),
    Quad(Quad64),
    Conic(Conic64),
    Cubic(Cubic64),
}

impl Curve64 {
    pub fn verb(&self) -> PathVerb {
        match self {
            Curve64::Line(_) => PathVerb::Line,
            Curve64::Quad(_) => PathVerb::Quad,
            Curve64::Conic(_) => PathVerb::Conic,
            Curve64::Cubic(_) => PathVerb::Cubic,
        }
    }

    pub fn points(&self) -> &[Point64] {
        match self {
            Curve64::Line(c) => &c.points,
            Curve64::Quad(c) => &c.points,
            Curve64::Conic(c) => &c.points,
            Curve64::Cubic(c) => &c.points,
        }
    }

    /// Returns the conic weight, or 1 for other curves.
    pub fn weight(&self) -> f64 {
        match self {
            Curve64::Conic(c) => c.weight,
            _ => 1.0,
        }
    }

    pub fn start(&self) -> Point64 {
        self.points()[0]
    }

    pub fn end(&self) -> Point64 {
        let points = self.points();
        points[points.len() - 1]
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Curve64::Line(_))
    }

    /// Applies `f` to every control point.
    pub fn map<F: Fn(Point64) -> Point64>(&self, f: F) -> Curve64 {
        match self {
            Curve64::Line(c) => Curve64::Line(Line64::new(f(c.points[0]), f(c.points[1]))),
            Curve64::Quad(c) => Curve64::Quad(Quad64::new([
                f(c.points[0]),
                f(c.points[1]),
                f(c.points[2]),
            ])),
            Curve64::Conic(c) => Curve64::Conic(Conic64::new(
                [f(c.points[0]), f(c.points[1]), f(c.points[2])],
                c.weight,
            )),
            Curve64::Cubic(c) => Curve64::Cubic(Cubic64::new([
                f(c.points[0]),
                f(c.points[1]),
                f(c.points[2]),
                f(c.points[3]),
            ])),
        }
    }

    pub fn point_at_t(&self, t: f64) -> Point64 {
        match self {
            Curve64::Line(c) => c.point_at_t(t),
            Curve64::Quad(c) => c.point_at_t(t),
            Curve64::Conic(c) => c.point_at_t(t),
            Curve64::Cubic(c) => c.point_at_t(t),
        }
    }

    /// Returns a vector pointing along the curve at `t`.
    ///
    /// Only the direction is meaningful, the length differs between curve kinds.
    pub fn dxdy_at_t(&self, t: f64) -> Point64 {
        match self {
            Curve64::Line(c) => c.dxdy(),
            Curve64::Quad(c) => c.dxdy_at_t(t),
            Curve64::Conic(c) => c.dxdy_at_t(t),
            Curve64::Cubic(c) => c.dxdy_at_t(t),
        }
    }

    pub fn sub_divide(&self, t1: f64, t2: f64) -> Curve64 {
        match self {
            Curve64::Line(c) => Curve64::Line(c.sub_divide(t1, t2)),
            Curve64::Quad(c) => Curve64::Quad(c.sub_divide(t1, t2)),
            Curve64::Conic(c) => Curve64::Conic(c.sub_divide(t1, t2)),
            Curve64::Cubic(c) => Curve64::Cubic(c.sub_divide(t1, t2)),
        }
    }

    pub fn bounds(&self) -> Rect64 {
        match self {
            Curve64::Line(c) => c.bounds(),
            Curve64::Quad(c) => c.bounds(),
            Curve64::Conic(c) => c.bounds(),
            Curve64::Cubic(c) => c.bounds(),
        }
    }

    pub fn collapsed(&self) -> bool {
        match self {
            Curve64::Line(c) => c.collapsed(),
            Curve64::Quad(c) => c.collapsed(),
            Curve64::Conic(c) => c.collapsed(),
            Curve64::Cubic(c) => c.collapsed(),
        }
    }

    pub fn controls_inside(&self) -> bool {
        controls_inside(self.points())
    }

    pub fn hull_intersects(&self, other: &Curve64) -> bool {
        hull_intersects(self.points(), other.points())
    }

    /// Returns the curve with reversed direction.
    pub fn reversed(&self) -> Curve64 {
        match self {
            Curve64::Line(c) => Curve64::Line(Line64::new(c.points[1], c.points[0])),
            Curve64::Quad(c) => Curve64::Quad(Quad64::new([c.points[2], c.points[1], c.points[0]])),
            Curve64::Conic(c) => Curve64::Conic(Conic64::new(
                [c.points[2], c.points[1], c.points[0]],
                c.weight,
            )),
            Curve64::Cubic(c) => Curve64::Cubic(Cubic64::new([
                c.points[3],
                c.points[2],
                c.points[1],
                c.points[0],
            ])),
        }
    }

    /// Returns the curve with end points replaced.
    pub fn with_ends(&self, start: Point64, end: Point64) -> Curve64 {
        let mut curve = *self;
        let points: &mut [Point64] = match curve {
            Curve64::Line(ref mut c) => &mut c.points,
            Curve64::Quad(ref mut c) => &mut c.points,
            Curve64::Conic(ref mut c) => &mut c.points,
            Curve64::Cubic(ref mut c) => &mut c.points,
        };
        let last = points.len() - 1;
        points[0] = start;
        points[last] = end;
        curve
    }

    /// Returns `t` values where the curve crosses the infinite line through `ray`.
    pub fn ray_intersect(&self, ray: &Line64) -> ArrayVec<f64, 3> {
        let mut roots = [0.0; 3];
        let count = axis_intersections::ray_intersect(self, ray, &mut roots);
        roots[0..count].iter().copied().collect()
    }

    /// Finds `t` of the curve point closest to `xy`, provided it is within
    /// ULPs tolerance of `xy`.
    ///
    /// `opp` is a point of the other curve, `xy` and `opp` define the
    /// direction perpendicular to the search ray.
    pub fn near_point(&self, xy: Point64, opp: Point64) -> Option<f64> {
        if let Curve64::Line(line) = self {
            return line.near_point(xy).map(|(t, _)| t);
        }

        let bounds = Rect64::from_points(self.points());
        if !bounds.left.almost_between_ulps(xy.x, bounds.right)
            || !bounds.top.almost_between_ulps(xy.y, bounds.bottom)
        {
            return None;
        }

        let perp = Line64::new(
            xy,
            Point64::from_xy(xy.x + opp.y - xy.y, xy.y + xy.x - opp.x),
        );
        let mut closest: Option<(f64, f64)> = None;
        for t in self.ray_intersect(&perp) {
            let dist = xy.distance(self.point_at_t(t));
            if closest.map_or(true, |(_, d)| dist < d) {
                closest = Some((t, dist));
            }
        }

        let (t, dist) = closest?;
        let largest = bounds
            .right
            .max(bounds.bottom)
            .max(-bounds.left.min(bounds.top));
        if !largest.almost_equal_ulps_pin(largest + dist) {
            return None;
        }

        Some(pin_t(t))
    }

    /// Returns `t` for an exact end point match.
    pub fn exact_end(&self, xy: Point64) -> Option<f64> {
        if xy == self.start() {
            Some(0.0)
        } else if xy == self.end() {
            Some(1.0)
        } else {
            None
        }
    }
}

/// Checks that every control point projects strictly between the end points.
pub fn controls_inside(points: &[Point64]) -> bool {
    let first = points[0];
    let last = points[points.len() - 1];
    let chord = first - last;
    points[1..points.len() - 1]
        .iter()
        .all(|p| chord.dot(first - *p) > 0.0 && chord.dot(*p - last) > 0.0)
}

/// Checks whether the convex hulls of two control polygons overlap.
///
/// Uses separating axes taken from the edges of both polygons.
/// May report an overlap for polygons that only come close.
pub fn hull_intersects(a: &[Point64], b: &[Point64]) -> bool {
    let bounds_a = Rect64::from_points(a);
    let bounds_b = Rect64::from_points(b);
    if !bounds_a.intersects(&bounds_b) {
        return false;
    }

    !(has_separating_edge(a, b) || has_separating_edge(b, a))
}

fn has_separating_edge(hull: &[Point64], other: &[Point64]) -> bool {
    let tolerance = Rect64::from_points(hull).magnitude().max(1.0) * SEPARATION_EPSILON;
    for i in 0..hull.len() {
        for j in i + 1..hull.len() {
            let edge = hull[j] - hull[i];
            let len = edge.length();
            if len.approximately_zero() {
                continue;
            }

            let normal = Point64::from_xy(-edge.y, edge.x) / len;
            let (min, max) = project(hull, hull[i], normal);
            // Only edges that have the whole polygon on one side count.
            let (other_min, other_max) = project(other, hull[i], normal);
            if (min >= -tolerance && other_max < -tolerance)
                || (max <= tolerance && other_min > tolerance)
            {
                return true;
            }
        }
    }

    false
}

// Returns the signed distances range of `points` from the line through `origin`.
fn project(points: &[Point64], origin: Point64, normal: Point64) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for p in points {
        let d = normal.dot(*p - origin);
        min = min.min(d);
        max = max.max(d);
    }

    (min, max)
}
