// Copyright 2015 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::point64::Point64;
use super::quad64::{self, Quad64};
use super::rect64::Rect64;
use super::Scalar64;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

/// A rational quadratic curve (SkDConic).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Conic64 {
    pub points: [Point64; 3],
    pub weight: f64,
}

impl Conic64 {
    pub fn new(points: [Point64; 3], weight: f64) -> Self {
        Conic64 { points, weight }
    }

    pub fn as_f64_slice(&self) -> [f64; 6] {
        self.as_quad().as_f64_slice()
    }

    pub fn as_quad(&self) -> Quad64 {
        Quad64::new(self.points)
    }

    pub fn point_at_t(&self, t: f64) -> Point64 {
        if t == 0.0 {
            return self.points[0];
        }

        if t == 1.0 {
            return self.points[2];
        }

        let src = self.as_f64_slice();
        let denominator = eval_denominator(self.weight, t);
        Point64::from_xy(
            eval_numerator(&src, self.weight, t) / denominator,
            eval_numerator(&src[1..], self.weight, t) / denominator,
        )
    }

    pub fn dxdy_at_t(&self, t: f64) -> Point64 {
        let src = self.as_f64_slice();
        let result = Point64::from_xy(
            eval_tan(&src, self.weight, t),
            eval_tan(&src[1..], self.weight, t),
        );

        if result.x == 0.0 && result.y == 0.0 && t.zero_or_one() {
            return self.points[2] - self.points[0];
        }

        result
    }

    /// Returns the conic over `[t1, t2]`.
    ///
    /// End points are evaluated in homogeneous coordinates and the weight is recomputed.
    pub fn sub_divide(&self, t1: f64, t2: f64) -> Conic64 {
        if t1 == 0.0 && t2 == 1.0 {
            return *self;
        }

        let src = self.as_f64_slice();
        let w = self.weight;
        let homogeneous = |t: f64| -> (f64, f64, f64) {
            if t == 0.0 {
                (self.points[0].x, self.points[0].y, 1.0)
            } else if t == 1.0 {
                (self.points[2].x, self.points[2].y, 1.0)
            } else {
                (
                    eval_numerator(&src, w, t),
                    eval_numerator(&src[1..], w, t),
                    eval_denominator(w, t),
                )
            }
        };

        let (ax, ay, az) = homogeneous(t1);
        let mid_t = (t1 + t2) / 2.0;
        let dx = eval_numerator(&src, w, mid_t);
        let dy = eval_numerator(&src[1..], w, mid_t);
        let dz = eval_denominator(w, mid_t);
        let (cx, cy, cz) = homogeneous(t2);
        let bx = 2.0 * dx - (ax + cx) / 2.0;
        let by = 2.0 * dy - (ay + cy) / 2.0;
        let mut bz = 2.0 * dz - (az + cz) / 2.0;
        // if bz is 0, weight is 0, control point has no effect: any value will do
        if bz == 0.0 {
            bz = 1.0;
        }

        Conic64::new(
            [
                Point64::from_xy(ax / az, ay / az),
                Point64::from_xy(bx / bz, by / bz),
                Point64::from_xy(cx / cz, cy / cz),
            ],
            bz / (az * cz).sqrt(),
        )
    }

    pub fn bounds(&self) -> Rect64 {
        let mut rect = Rect64::from_point(self.points[0]);
        rect.add(self.points[2]);
        let src = self.as_f64_slice();
        let mut t_values = [0.0; 2];
        let mut count = find_extrema(&src, self.weight, &mut t_values[0..]);
        count += find_extrema(&src[1..], self.weight, &mut t_values[count..]);
        for t in &t_values[0..count] {
            rect.add(self.point_at_t(*t));
        }

        rect
    }

    pub fn collapsed(&self) -> bool {
        self.as_quad().collapsed()
    }

    pub fn controls_inside(&self) -> bool {
        self.as_quad().controls_inside()
    }

    // A conic lies within the hull of its control points for any positive weight.
    pub fn hull_intersects(&self, points: &[Point64]) -> bool {
        self.as_quad().hull_intersects(points)
    }
}

fn eval_numerator(src: &[f64], w: f64, t: f64) -> f64 {
    let src2w = src[2] * w;
    let c = src[0];
    let a = src[4] - 2.0 * src2w + c;
    let b = 2.0 * (src2w - c);
    (a * t + b) * t + c
}

fn eval_denominator(w: f64, t: f64) -> f64 {
    let b = 2.0 * (w - 1.0);
    let c = 1.0;
    let a = -b;
    (a * t + b) * t + c
}

fn deriv_coefficients(src: &[f64], w: f64) -> [f64; 3] {
    let p20 = src[4] - src[0];
    let p10 = src[2] - src[0];
    let wp10 = w * p10;
    [w * p20 - p20, p20 - 2.0 * wp10, wp10]
}

fn eval_tan(src: &[f64], w: f64, t: f64) -> f64 {
    let [a, b, c] = deriv_coefficients(src, w);
    (a * t + b) * t + c
}

/// Finds the single extremum of a coordinate, if any.
pub fn find_extrema(src: &[f64], w: f64, t: &mut [f64]) -> usize {
    let [a, b, c] = deriv_coefficients(src, w);
    let mut t_values = [0.0; 3];
    let roots = quad64::roots_valid_t(a, b, c, &mut t_values);
    // In extreme cases, the number of roots returned can be 2. Path operations
    // will fail later on, so there's no advantage in reporting them.
    if roots == 1 {
        t[0] = t_values[0];
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A quarter of a unit circle.
    fn arc() -> Conic64 {
        Conic64::new(
            [
                Point64::from_xy(1.0, 0.0),
                Point64::from_xy(1.0, 1.0),
                Point64::from_xy(0.0, 1.0),
            ],
            core::f64::consts::FRAC_1_SQRT_2,
        )
    }

    #[test]
    fn lies_on_circle() {
        let c = arc();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = c.point_at_t(t);
            assert!((p.length() - 1.0).abs() < 1e-12);
        }

        assert_eq!(c.point_at_t(0.0), c.points[0]);
        assert_eq!(c.point_at_t(1.0), c.points[2]);
    }

    #[test]
    fn tangent_is_perpendicular_to_radius() {
        let c = arc();
        let p = c.point_at_t(0.3);
        let d = c.dxdy_at_t(0.3);
        assert!(p.dot(d).abs() < 1e-9);
    }

    #[test]
    fn half_conic_keeps_circle() {
        let half = arc().sub_divide(0.0, 0.5);
        for i in 0..=10 {
            let p = half.point_at_t(i as f64 / 10.0);
            assert!((p.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bounds_of_arch() {
        let c = Conic64::new(
            [
                Point64::from_xy(1.0, 0.0),
                Point64::from_xy(1.0, 2.0),
                Point64::from_xy(-1.0, 0.0),
            ],
            0.5,
        );
        let b = c.bounds();
        // The weight pulls the peak down to 2/3 of the control point height.
        assert!((b.bottom - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(b.top, 0.0);
    }

    proptest::proptest! {
        #[test]
        // The weight is renormalized, so only the geometry is preserved, not the parametrization.
        fn sub_divide_stays_on_curve(t1 in 0.0f64..1.0, t2 in 0.0f64..1.0, s in 0.0f64..1.0) {
            let c = arc();
            let sub = c.sub_divide(t1, t2);
            proptest::prop_assert!(sub.points[0].distance(c.point_at_t(t1)) < 1e-9);
            proptest::prop_assert!(sub.points[2].distance(c.point_at_t(t2)) < 1e-9);
            proptest::prop_assert!((sub.point_at_t(s).length() - 1.0).abs() < 1e-9);
        }
    }
}
