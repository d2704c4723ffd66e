// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::f64::consts::PI;

use super::point64::{Point64, SearchAxis};
use super::quad64;
use super::rect64::Rect64;
use super::{cmp_f64, Scalar64};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

pub const POINT_COUNT: usize = 4;

/// Bisection steps before a root search gives up narrowing the interval.
const MAX_BISECTIONS: usize = 64;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Cubic64 {
    pub points: [Point64; POINT_COUNT],
}

impl Cubic64 {
    pub fn new(points: [Point64; POINT_COUNT]) -> Self {
        Cubic64 { points }
    }

    /// Coordinates interleaved as `x0 y0 x1 y1 ...`.
    pub fn as_f64_slice(&self) -> [f64; POINT_COUNT * 2] {
        let mut values = [0.0; POINT_COUNT * 2];
        for (pair, p) in values.chunks_exact_mut(2).zip(self.points.iter()) {
            pair[0] = p.x;
            pair[1] = p.y;
        }

        values
    }

    pub fn point_at_t(&self, t: f64) -> Point64 {
        let p = &self.points;
        if t == 0.0 {
            return p[0];
        }

        if t == 1.0 {
            return p[3];
        }

        let s = 1.0 - t;
        p[0] * (s * s * s) + p[1] * (3.0 * s * s * t) + p[2] * (3.0 * s * t * t) + p[3] * (t * t * t)
    }

    /// Returns the derivative at `t`, divided by 3.
    ///
    /// Coincident control points make the derivative vanish at the ends,
    /// in which case the direction to the next distinct point is used.
    pub fn dxdy_at_t(&self, t: f64) -> Point64 {
        let p = &self.points;
        let s = 1.0 - t;
        let d = (p[1] - p[0]) * (s * s) + (p[2] - p[1]) * (2.0 * s * t) + (p[3] - p[2]) * (t * t);
        if d != Point64::zero() || !t.zero_or_one() {
            return d;
        }

        let near = if t == 0.0 { p[2] - p[0] } else { p[3] - p[1] };
        if near != Point64::zero() {
            near
        } else {
            p[3] - p[0]
        }
    }

    /// Splits the cubic at `t` using de Casteljau's algorithm.
    pub fn split_at(&self, t: f64) -> (Cubic64, Cubic64) {
        let lerp = |a: Point64, b: Point64| a + (b - a) * t;
        let p = &self.points;
        let ab = lerp(p[0], p[1]);
        let bc = lerp(p[1], p[2]);
        let cd = lerp(p[2], p[3]);
        let abc = lerp(ab, bc);
        let bcd = lerp(bc, cd);
        let mid = lerp(abc, bcd);
        (
            Cubic64::new([p[0], ab, abc, mid]),
            Cubic64::new([mid, bcd, cd, p[3]]),
        )
    }

    /// Returns the cubic over `[t1, t2]`.
    pub fn sub_divide(&self, t1: f64, t2: f64) -> Cubic64 {
        match (t1 == 0.0, t2 == 1.0) {
            (true, true) => return *self,
            (true, false) => return self.split_at(t2).0,
            (false, true) => return self.split_at(t1).1,
            (false, false) => {}
        }

        // Solve for the two inner control points from points at 1/3 and 2/3.
        let a = self.point_at_t(t1);
        let e = self.point_at_t((t1 * 2.0 + t2) / 3.0);
        let f = self.point_at_t((t1 + t2 * 2.0) / 3.0);
        let d = self.point_at_t(t2);
        let m = e * 27.0 - a * 8.0 - d;
        let n = f * 27.0 - a - d * 8.0;
        Cubic64::new([a, (m * 2.0 - n) / 18.0, (n * 2.0 - m) / 18.0, d])
    }

    pub fn bounds(&self) -> Rect64 {
        let mut rect = Rect64::from_point(self.points[0]);
        rect.add(self.points[3]);
        let src = self.as_f64_slice();
        for offset in 0..2 {
            let mut ts = [0.0; 3];
            let count = find_extrema(&src[offset..], &mut ts);
            for t in &ts[..count] {
                rect.add(self.point_at_t(*t));
            }
        }

        rect
    }

    pub fn collapsed(&self) -> bool {
        self.points[1..]
            .iter()
            .all(|p| self.points[0].approximately_equal(*p))
    }

    pub fn controls_inside(&self) -> bool {
        super::curve64::controls_inside(&self.points)
    }

    pub fn hull_intersects(&self, points: &[Point64]) -> bool {
        super::curve64::hull_intersects(&self.points, points)
    }

    /// Finds the parameters of a loop, if the cubic crosses itself.
    ///
    /// With the cubic in power basis `At^3 + Bt^2 + Ct + D`, a loop `P(s) == P(t)`
    /// has `s + t` and `s * t` solving a pair of linear equations.
    pub fn self_intersection(&self) -> Option<(f64, f64)> {
        let p = &self.points;
        let a = p[3] - p[0] + (p[1] - p[2]) * 3.0;
        let b = (p[0] - p[1] * 2.0 + p[2]) * 3.0;
        let c = (p[1] - p[0]) * 3.0;

        let denom = a.y * b.x - a.x * b.y;
        if denom.approximately_zero_when_compared_to(a.length() * b.length()) || denom == 0.0 {
            return None;
        }

        let u = -(a.y * c.x - a.x * c.y) / denom;
        let v = if a.x.abs() >= a.y.abs() {
            u * u + (b.x * u + c.x) / a.x
        } else {
            u * u + (b.y * u + c.y) / a.y
        };

        let discriminant = u * u - 4.0 * v;
        if !(discriminant > 0.0) {
            return None;
        }

        let root = discriminant.sqrt();
        let s = (u - root) / 2.0;
        let t = (u + root) / 2.0;
        if s <= 0.0 || t >= 1.0 || s.approximately_equal(t) {
            return None;
        }

        if !self.point_at_t(s).roughly_equal(self.point_at_t(t)) {
            return None;
        }

        Some((s, t))
    }

    /// Finds where the cubic crosses `axis == intercept` by bisection.
    ///
    /// Slower than solving the cubic, but doesn't lose precision on
    /// nearly flat curves. The curve is split at the extrema of the
    /// axis coordinate, so each piece crosses the intercept at most once.
    pub fn search_roots(&self, intercept: f64, axis: SearchAxis, roots: &mut [f64; 3]) -> usize {
        let offset = match axis {
            SearchAxis::X => 0,
            SearchAxis::Y => 1,
        };

        let mut ts = [0.0, 1.0, 1.0, 1.0, 1.0];
        let mut extrema = [0.0; 3];
        let count = find_extrema(&self.as_f64_slice()[offset..], &mut extrema);
        ts[1..=count].copy_from_slice(&extrema[..count]);
        ts[1..=count].sort_by(cmp_f64);
        let ts = &ts[..count + 2];

        let distance = |t: f64| self.point_at_t(t).axis_coord(axis) - intercept;
        let mut found = 0;
        let mut push = |t: f64, found: &mut usize| {
            if *found < 3 && !roots[..*found].iter().any(|r| r.approximately_equal(t)) {
                roots[*found] = t;
                *found += 1;
            }
        };

        for pair in ts.windows(2) {
            let (mut lo, mut hi) = (pair[0], pair[1]);
            if lo == hi {
                continue;
            }

            let lo_dist = distance(lo);
            if lo_dist == 0.0 {
                push(lo, &mut found);
                continue;
            }

            let hi_dist = distance(hi);
            if hi_dist != 0.0 && (lo_dist < 0.0) == (hi_dist < 0.0) {
                continue;
            }

            for _ in 0..MAX_BISECTIONS {
                let mid = (lo + hi) / 2.0;
                let mid_dist = distance(mid);
                if mid_dist.approximately_zero() || mid == lo || mid == hi {
                    lo = mid;
                    hi = mid;
                    break;
                }

                if (mid_dist < 0.0) == (lo_dist < 0.0) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }

            push((lo + hi) / 2.0, &mut found);
        }

        if distance(1.0) == 0.0 {
            push(1.0, &mut found);
        }

        found
    }
}

/// Converts one coordinate of a cubic (every second value of `src`) to power basis.
pub fn coefficients(src: &[f64]) -> (f64, f64, f64, f64) {
    power_basis(src[0], src[2], src[4], src[6])
}

/// Converts Bezier coefficients to `At^3 + Bt^2 + Ct + D`.
pub fn power_basis(p0: f64, p1: f64, p2: f64, p3: f64) -> (f64, f64, f64, f64) {
    (
        p3 - p0 + 3.0 * (p1 - p2),
        3.0 * (p0 - 2.0 * p1 + p2),
        3.0 * (p1 - p0),
        p0,
    )
}

/// Returns the roots in `[0, 1]`.
///
/// Roots just outside of the range are snapped to its ends.
pub fn roots_valid_t(a: f64, b: f64, c: f64, d: f64, t: &mut [f64; 3]) -> usize {
    let mut s = [0.0; 3];
    let real_roots = roots_real(a, b, c, d, &mut s);
    let mut found = quad64::push_valid_ts(&s, real_roots, t);
    for root in &s[..real_roots] {
        let end = if !root.approximately_one_or_less() && root.between(1.0, 1.00005) {
            1.0
        } else if !root.approximately_zero_or_more() && root.between(-0.00005, 0.0) {
            0.0
        } else {
            continue;
        };

        if found < 3 && !t[..found].iter().any(|v| v.approximately_equal(end)) {
            t[found] = end;
            found += 1;
        }
    }

    found
}

/// Finds the real roots of `At^3 + Bt^2 + Ct + D` (Numerical Recipes, 5.6).
pub fn roots_real(a: f64, b: f64, c: f64, d: f64, s: &mut [f64; 3]) -> usize {
    if a.approximately_zero()
        && a.approximately_zero_when_compared_to(b)
        && a.approximately_zero_when_compared_to(c)
        && a.approximately_zero_when_compared_to(d)
    {
        return quad64::roots_real(b, c, d, s);
    }

    if d.approximately_zero_when_compared_to(a)
        && d.approximately_zero_when_compared_to(b)
        && d.approximately_zero_when_compared_to(c)
    {
        // Zero is a root, the rest come from the remaining quadratic.
        let num = quad64::roots_real(a, b, c, s);
        if s[..num].iter().any(|r| r.approximately_zero()) {
            return num;
        }

        s[num] = 0.0;
        return num + 1;
    }

    if (a + b + c + d).approximately_zero() {
        // One is a root.
        let num = quad64::roots_real(a, a + b, -d, s);
        if s[..num].iter().any(|r| r.almost_dequal_ulps(1.0)) {
            return num;
        }

        s[num] = 1.0;
        return num + 1;
    }

    // Normalize to t^3 + at^2 + bt + c.
    let (a, b, c) = (b / a, c / a, d / a);
    let a2 = a * a;
    let q = (a2 - b * 3.0) / 9.0;
    let r = (2.0 * a2 * a - 9.0 * a * b + 27.0 * c) / 54.0;
    let q3 = q * q * q;
    let adiv3 = a / 3.0;

    let mut count = 0;
    let mut push_distinct = |root: f64, s: &mut [f64; 3]| {
        if !s[..count].iter().any(|v| v.almost_dequal_ulps(root)) {
            s[count] = root;
            count += 1;
        }
    };

    let r2_minus_q3 = r * r - q3;
    if r2_minus_q3 < 0.0 {
        // Three real roots. The ratio can drift slightly out of [-1, 1].
        let theta = (r / q3.sqrt()).bound(-1.0, 1.0).acos();
        let neg2_root_q = -2.0 * q.sqrt();
        for shift in &[0.0, 2.0 * PI, -2.0 * PI] {
            push_distinct(neg2_root_q * ((theta + *shift) / 3.0).cos() - adiv3, s);
        }
    } else {
        // One real root.
        let mut e = super::cube_root(r.abs() + r2_minus_q3.sqrt());
        if r > 0.0 {
            e = -e;
        }

        if e != 0.0 {
            e += q / e;
        }

        let root = e - adiv3;
        push_distinct(root, s);
        if root.almost_dequal_ulps(q3) {
            push_distinct(-e / 2.0 - adiv3, s);
        }
    }

    count
}

/// Finds the parameters where one coordinate of a cubic has an extremum.
///
/// `src` holds the coordinate in every second value. The derivative, divided by 3,
/// is `(d - a + 3(b - c))t^2 + 2(a - 2b + c)t + (b - a)`.
pub fn find_extrema(src: &[f64], t_values: &mut [f64]) -> usize {
    let (a, b, c, d) = (src[0], src[2], src[4], src[6]);
    quad64::roots_valid_t(
        d - a + 3.0 * (b - c),
        2.0 * (a - 2.0 * b + c),
        b - a,
        t_values,
    )
}
