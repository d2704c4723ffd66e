// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::point64::Point64;
use super::rect64::Rect64;
use super::{between, pin_t, Scalar64};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Line64 {
    pub points: [Point64; 2],
}

impl Line64 {
    pub fn new(p0: Point64, p1: Point64) -> Self {
        Line64 { points: [p0, p1] }
    }

    pub fn point_at_t(&self, t: f64) -> Point64 {
        if t == 0.0 {
            return self.points[0];
        }

        if t == 1.0 {
            return self.points[1];
        }

        let one_t = 1.0 - t;
        Point64::from_xy(
            one_t * self.points[0].x + t * self.points[1].x,
            one_t * self.points[0].y + t * self.points[1].y,
        )
    }

    pub fn dxdy(&self) -> Point64 {
        self.points[1] - self.points[0]
    }

    pub fn bounds(&self) -> Rect64 {
        Rect64::from_points(&self.points)
    }

    pub fn sub_divide(&self, t1: f64, t2: f64) -> Line64 {
        Line64::new(self.point_at_t(t1), self.point_at_t(t2))
    }

    pub fn collapsed(&self) -> bool {
        self.points[0].approximately_equal(self.points[1])
    }

    /// Returns 0 or 1 when `xy` is exactly one of the end points.
    pub fn exact_point(&self, xy: Point64) -> Option<f64> {
        if xy == self.points[0] {
            Some(0.0)
        } else if xy == self.points[1] {
            Some(1.0)
        } else {
            None
        }
    }

    /// Projects `xy` onto the line and returns its `t` when the projected
    /// point is within ULPs tolerance of `xy`.
    ///
    /// The flag is set when the point is near, but not equal in `f32`.
    pub fn near_point(&self, xy: Point64) -> Option<(f64, bool)> {
        let p0 = self.points[0];
        let p1 = self.points[1];
        if !p0.x.almost_between_ulps(xy.x, p1.x) || !p0.y.almost_between_ulps(xy.y, p1.y) {
            return None;
        }

        // project a perpendicular ray from the point to the line; find the T on the line
        let len = p1 - p0;
        let denom = len.x * len.x + len.y * len.y;
        let ab0 = xy - p0;
        let numer = len.x * ab0.x + ab0.y * len.y;
        if !between(0.0, numer, denom) {
            return None;
        }

        if denom == 0.0 {
            return Some((0.0, false));
        }

        let t = numer / denom;
        let real_pt = self.point_at_t(t);
        let dist = real_pt.distance(xy);
        // find the ordinal in the original line with the largest unsigned exponent
        let tiniest = p0.x.min(p0.y).min(p1.x).min(p1.y);
        let largest = p0.x.max(p0.y).max(p1.x).max(p1.y).max(-tiniest);
        if !largest.almost_equal_ulps_pin(largest + dist) {
            return None;
        }

        let unequal = largest as f32 != (largest + dist) as f32;
        Some((pin_t(t), unequal))
    }

    /// Returns `t` of `xy` on an infinite line through the points.
    pub fn exact_t(&self, xy: Point64) -> f64 {
        let d = self.dxdy();
        if d.x.abs() > d.y.abs() {
            (xy.x - self.points[0].x) / d.x
        } else if d.y != 0.0 {
            (xy.y - self.points[0].y) / d.y
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_point() {
        let line = Line64::new(Point64::from_xy(0.0, 0.0), Point64::from_xy(4.0, 0.0));
        assert_eq!(line.near_point(Point64::from_xy(1.0, 0.0)), Some((0.25, false)));
        assert_eq!(line.near_point(Point64::from_xy(1.0, 0.5)), None);
        assert_eq!(line.near_point(Point64::from_xy(5.0, 0.0)), None);
        assert_eq!(line.exact_point(Point64::from_xy(4.0, 0.0)), Some(1.0));
        assert_eq!(line.exact_point(Point64::from_xy(2.0, 0.0)), None);
    }

    #[test]
    fn evaluation() {
        let line = Line64::new(Point64::from_xy(1.0, 1.0), Point64::from_xy(3.0, 5.0));
        assert_eq!(line.point_at_t(0.5), Point64::from_xy(2.0, 3.0));
        assert_eq!(line.exact_t(Point64::from_xy(2.0, 3.0)), 0.5);
        let sub = line.sub_divide(0.5, 1.0);
        assert_eq!(sub.points[0], Point64::from_xy(2.0, 3.0));
        assert_eq!(sub.points[1], Point64::from_xy(3.0, 5.0));
    }
}
