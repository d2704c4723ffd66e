// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::point64::Point64;
use super::rect64::Rect64;
use super::Scalar64;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

pub const POINT_COUNT: usize = 3;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Quad64 {
    pub points: [Point64; POINT_COUNT],
}

impl Quad64 {
    pub fn new(points: [Point64; POINT_COUNT]) -> Self {
        Quad64 { points }
    }

    /// Coordinates interleaved as `x0 y0 x1 y1 x2 y2`.
    pub fn as_f64_slice(&self) -> [f64; POINT_COUNT * 2] {
        let [p0, p1, p2] = self.points;
        [p0.x, p0.y, p1.x, p1.y, p2.x, p2.y]
    }

    pub fn point_at_t(&self, t: f64) -> Point64 {
        let [p0, p1, p2] = self.points;
        match t {
            t if t == 0.0 => p0,
            t if t == 1.0 => p2,
            _ => {
                let s = 1.0 - t;
                p0 * (s * s) + p1 * (2.0 * s * t) + p2 * (t * t)
            }
        }
    }

    /// Returns the tangent direction at `t`.
    ///
    /// The result is half of the derivative. At the end points a degenerate
    /// tangent falls back to the chord.
    pub fn dxdy_at_t(&self, t: f64) -> Point64 {
        let [p0, p1, p2] = self.points;
        let d = (p1 - p0) * (1.0 - t) + (p2 - p1) * t;
        if d == Point64::zero() && t.zero_or_one() {
            p2 - p0
        } else {
            d
        }
    }

    /// Returns the quad over `[t1, t2]`.
    pub fn sub_divide(&self, t1: f64, t2: f64) -> Quad64 {
        if t1 == 0.0 && t2 == 1.0 {
            return *self;
        }

        let a = self.point_at_t(t1);
        let d = self.point_at_t((t1 + t2) / 2.0);
        let c = self.point_at_t(t2);
        // The control point that makes the middle of the piece pass through `d`.
        Quad64::new([a, d * 2.0 - (a + c) / 2.0, c])
    }

    pub fn bounds(&self) -> Rect64 {
        let mut rect = Rect64::from_point(self.points[0]);
        rect.add(self.points[2]);
        let src = self.as_f64_slice();
        for offset in 0..2 {
            let mut t = [0.0];
            if find_extrema(&src[offset..], &mut t) == 1 {
                rect.add(self.point_at_t(t[0]));
            }
        }

        rect
    }

    pub fn collapsed(&self) -> bool {
        self.points[0].approximately_equal(self.points[1])
            && self.points[0].approximately_equal(self.points[2])
    }

    /// Checks that the control point projects between the end points.
    pub fn controls_inside(&self) -> bool {
        super::curve64::controls_inside(&self.points)
    }

    pub fn hull_intersects(&self, points: &[Point64]) -> bool {
        super::curve64::hull_intersects(&self.points, points)
    }

    /// Returns the equivalent cubic.
    pub fn to_cubic(&self) -> super::cubic64::Cubic64 {
        let p = &self.points;
        super::cubic64::Cubic64::new([
            p[0],
            p[0] + (p[1] - p[0]) * (2.0 / 3.0),
            p[2] + (p[1] - p[2]) * (2.0 / 3.0),
            p[2],
        ])
    }
}

/// Finds the parameter where one coordinate of a quad has an extremum.
///
/// `src` holds the coordinate in every second value. The derivative vanishes
/// at `(a - b) / (a - 2b + c)`, only strictly inside `(0, 1)` is reported.
pub fn find_extrema(src: &[f64], t_value: &mut [f64]) -> usize {
    let (a, b, c) = (src[0], src[2], src[4]);
    let (numer, denom) = (a - b, a - 2.0 * b + c);
    let (numer, denom) = if numer < 0.0 { (-numer, -denom) } else { (numer, denom) };
    if denom == 0.0 || numer == 0.0 || numer >= denom {
        return 0;
    }

    let ratio = numer / denom;
    if ratio == 0.0 {
        return 0;
    }

    t_value[0] = ratio;
    1
}

/// Keeps the roots that lie in `[0, 1]`, clamped and without near duplicates.
pub fn push_valid_ts(s: &[f64], real_roots: usize, t: &mut [f64]) -> usize {
    let mut found = 0;
    for root in &s[..real_roots] {
        if !root.approximately_zero_or_more() || !root.approximately_one_or_less() {
            continue;
        }

        let root = root.bound(0.0, 1.0);
        if !t[..found].iter().any(|v| v.approximately_equal(root)) {
            t[found] = root;
            found += 1;
        }
    }

    found
}

pub fn roots_valid_t(a: f64, b: f64, c: f64, t: &mut [f64]) -> usize {
    let mut s = [0.0; 3];
    let real_roots = roots_real(a, b, c, &mut s);
    push_valid_ts(&s, real_roots, t)
}

/// Finds the real roots of `At^2 + Bt + C`, including the ones outside of `[0, 1]`.
///
/// Nearly linear equations are solved as linear ones.
pub fn roots_real(a: f64, b: f64, c: f64, s: &mut [f64; 3]) -> usize {
    if a == 0.0 {
        return handle_zero(b, c, s);
    }

    let p = b / (2.0 * a);
    let q = c / a;
    if a.approximately_zero() && (p.approximately_zero_inverse() || q.approximately_zero_inverse())
    {
        return handle_zero(b, c, s);
    }

    // t^2 + 2pt + q = 0
    let p2 = p * p;
    if !p2.almost_dequal_ulps(q) && p2 < q {
        return 0;
    }

    let mut sqrt_d = 0.0;
    if p2 > q {
        sqrt_d = (p2 - q).sqrt();
    }

    s[0] = sqrt_d - p;
    s[1] = -sqrt_d - p;
    1 + usize::from(!s[0].almost_dequal_ulps(s[1]))
}

fn handle_zero(b: f64, c: f64, s: &mut [f64; 3]) -> usize {
    if b.approximately_zero() {
        s[0] = 0.0;
        (c == 0.0) as usize
    } else {
        s[0] = -c / b;
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Quad64 {
        Quad64::new([
            Point64::from_xy(0.0, 0.0),
            Point64::from_xy(4.0, 8.0),
            Point64::from_xy(8.0, 0.0),
        ])
    }

    #[test]
    fn end_points() {
        let q = quad();
        assert_eq!(q.point_at_t(0.0), q.points[0]);
        assert_eq!(q.point_at_t(1.0), q.points[2]);
        assert_eq!(q.point_at_t(0.5), Point64::from_xy(4.0, 4.0));
    }

    #[test]
    fn tangents() {
        let q = quad();
        assert_eq!(q.dxdy_at_t(0.5), Point64::from_xy(4.0, 0.0));
        let degenerate = Quad64::new([Point64::zero(), Point64::zero(), Point64::from_xy(2.0, 0.0)]);
        assert_eq!(degenerate.dxdy_at_t(0.0), Point64::from_xy(2.0, 0.0));
    }

    #[test]
    fn extrema_bounds() {
        let b = quad().bounds();
        assert_eq!((b.left, b.top, b.right, b.bottom), (0.0, 0.0, 8.0, 4.0));
    }

    #[test]
    fn quadratic_roots() {
        let mut t = [0.0; 3];
        // (t - 0.25)(t - 0.75)
        let n = roots_valid_t(1.0, -1.0, 0.1875, &mut t);
        assert_eq!(n, 2);
        let mut found = [t[0], t[1]];
        found.sort_by(super::super::cmp_f64);
        assert!((found[0] - 0.25).abs() < 1e-12);
        assert!((found[1] - 0.75).abs() < 1e-12);

        // no real roots
        assert_eq!(roots_valid_t(1.0, 0.0, 1.0, &mut t), 0);
        // linear
        assert_eq!(roots_valid_t(0.0, 2.0, -1.0, &mut t), 1);
        assert_eq!(t[0], 0.5);
    }

    proptest::proptest! {
        #[test]
        fn sub_divide_matches_original(t1 in 0.0f64..1.0, t2 in 0.0f64..1.0, s in 0.0f64..1.0) {
            let q = quad();
            let sub = q.sub_divide(t1, t2);
            let expected = q.point_at_t(t1 + (t2 - t1) * s);
            let actual = sub.point_at_t(s);
            proptest::prop_assert!(expected.distance(actual) < 1e-9);
        }
    }
}
