// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Curve intersections with axis aligned and arbitrary infinite lines.
//!
//! Every query is reduced to the same problem: find `t` where the `x`
//! coordinate of a curve equals a constant. Horizontal lines swap the
//! coordinates first, rays rotate the curve into the ray's frame.
//!
//! For cubics the roots are found with the closed form solution and, when it
//! proves inaccurate, refined by a binary search between the extrema.

use super::cubic64::{self, Cubic64};
use super::curve64::Curve64;
use super::line64::Line64;
use super::point64::{Point64, SearchAxis};
use super::quad64;
use super::{pin_t, Scalar64};

/// Finds `t` values where the curve crosses `y == axis_intercept`.
///
/// A line lying on the axis returns both end points.
pub fn horizontal_intersect(curve: &Curve64, axis_intercept: f64, roots: &mut [f64; 3]) -> usize {
    let swapped = curve.map(|p| Point64::from_xy(p.y, p.x));
    x_intercepts(&swapped, axis_intercept, roots)
}

/// Finds `t` values where the curve crosses `x == axis_intercept`.
pub fn vertical_intersect(curve: &Curve64, axis_intercept: f64, roots: &mut [f64; 3]) -> usize {
    x_intercepts(curve, axis_intercept, roots)
}

/// Finds `t` values where the curve crosses the infinite line through `ray`.
pub fn ray_intersect(curve: &Curve64, ray: &Line64, roots: &mut [f64; 3]) -> usize {
    let origin = ray.points[0];
    let adj = ray.points[1].x - origin.x;
    let opp = ray.points[1].y - origin.y;
    let rotated = curve.map(|p| {
        let d = p - origin;
        Point64::from_xy(d.y * adj - d.x * opp, d.y * opp + d.x * adj)
    });
    x_intercepts(&rotated, 0.0, roots)
}

fn x_intercepts(curve: &Curve64, axis_intercept: f64, roots: &mut [f64; 3]) -> usize {
    match curve {
        Curve64::Line(line) => line_intercepts(line, axis_intercept, roots),
        Curve64::Quad(quad) => {
            let p = &quad.points;
            bernstein_roots(
                p[0].x - axis_intercept,
                p[1].x - axis_intercept,
                p[2].x - axis_intercept,
                roots,
            )
        }
        Curve64::Conic(conic) => {
            let p = &conic.points;
            let w = conic.weight;
            bernstein_roots(
                p[0].x - axis_intercept,
                (p[1].x - axis_intercept) * w,
                p[2].x - axis_intercept,
                roots,
            )
        }
        Curve64::Cubic(cubic) => cubic_intercepts(cubic, axis_intercept, roots),
    }
}

fn line_intercepts(line: &Line64, axis_intercept: f64, roots: &mut [f64; 3]) -> usize {
    let [p0, p1] = line.points;
    let min = p0.x.min(p1.x);
    let max = p0.x.max(p1.x);
    if min > axis_intercept || max < axis_intercept {
        return 0;
    }

    if min.almost_equal_ulps(max) && max - min < (p0.y - p1.y).abs() {
        roots[0] = 0.0;
        roots[1] = 1.0;
        return 2;
    }

    if p1.x == p0.x {
        roots[0] = 0.0;
        return 1;
    }

    roots[0] = pin_t((axis_intercept - p0.x) / (p1.x - p0.x));
    1
}

// Roots of a quadratic given in Bernstein form.
fn bernstein_roots(a: f64, b: f64, c: f64, roots: &mut [f64; 3]) -> usize {
    quad64::roots_valid_t(a - 2.0 * b + c, 2.0 * (b - a), a, roots)
}

fn cubic_intercepts(cubic: &Cubic64, axis_intercept: f64, roots: &mut [f64; 3]) -> usize {
    let src = cubic.as_f64_slice();
    let (a, b, c, mut d) = cubic64::coefficients(&src);
    d -= axis_intercept;
    let count = cubic64::roots_valid_t(a, b, c, d, roots);
    let accurate = roots[0..count]
        .iter()
        .all(|t| cubic.point_at_t(*t).x.approximately_equal(axis_intercept));
    if accurate {
        return count;
    }

    cubic.search_roots(axis_intercept, SearchAxis::X, roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Conic64, Quad64};

    fn sorted(roots: &[f64; 3], count: usize) -> [f64; 3] {
        let mut result = *roots;
        result[0..count].sort_by(crate::path64::cmp_f64);
        result
    }

    #[test]
    fn line() {
        let line = Curve64::Line(Line64::new(
            Point64::from_xy(0.0, 0.0),
            Point64::from_xy(4.0, 2.0),
        ));
        let mut roots = [0.0; 3];
        assert_eq!(vertical_intersect(&line, 1.0, &mut roots), 1);
        assert_eq!(roots[0], 0.25);
        assert_eq!(horizontal_intersect(&line, 1.0, &mut roots), 1);
        assert_eq!(roots[0], 0.5);
        assert_eq!(horizontal_intersect(&line, 3.0, &mut roots), 0);

        let flat = Curve64::Line(Line64::new(
            Point64::from_xy(0.0, 1.0),
            Point64::from_xy(4.0, 1.0),
        ));
        assert_eq!(horizontal_intersect(&flat, 1.0, &mut roots), 2);
    }

    #[test]
    fn quad() {
        let quad = Curve64::Quad(Quad64::new([
            Point64::from_xy(0.0, 0.0),
            Point64::from_xy(2.0, 4.0),
            Point64::from_xy(4.0, 0.0),
        ]));
        let mut roots = [0.0; 3];
        let count = horizontal_intersect(&quad, 1.5, &mut roots);
        assert_eq!(count, 2);
        let roots = sorted(&roots, count);
        assert!((roots[0] - 0.25).abs() < 1e-12);
        assert!((roots[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn conic() {
        let arc = Curve64::Conic(Conic64::new(
            [
                Point64::from_xy(1.0, 0.0),
                Point64::from_xy(1.0, 1.0),
                Point64::from_xy(0.0, 1.0),
            ],
            core::f64::consts::FRAC_1_SQRT_2,
        ));
        let mut roots = [0.0; 3];
        let count = vertical_intersect(&arc, 0.6, &mut roots);
        assert_eq!(count, 1);
        let pt = arc.point_at_t(roots[0]);
        assert!((pt.x - 0.6).abs() < 1e-9);
        assert!((pt.y - 0.8).abs() < 1e-9);
    }

    #[test]
    fn cubic() {
        let cubic = Curve64::Cubic(Cubic64::new([
            Point64::from_xy(0.0, 0.0),
            Point64::from_xy(1.0, 3.0),
            Point64::from_xy(3.0, -3.0),
            Point64::from_xy(4.0, 0.0),
        ]));
        let mut roots = [0.0; 3];
        let count = horizontal_intersect(&cubic, 0.0, &mut roots);
        assert_eq!(count, 3);
        let roots = sorted(&roots, count);
        assert_eq!(roots[0], 0.0);
        assert!((roots[1] - 0.5).abs() < 1e-9);
        assert_eq!(roots[2], 1.0);
    }

    #[test]
    fn diagonal_ray() {
        let quad = Curve64::Quad(Quad64::new([
            Point64::from_xy(0.0, 2.0),
            Point64::from_xy(2.0, 2.0),
            Point64::from_xy(2.0, 0.0),
        ]));
        let ray = Line64::new(Point64::zero(), Point64::from_xy(1.0, 1.0));
        let mut roots = [0.0; 3];
        assert_eq!(ray_intersect(&quad, &ray, &mut roots), 1);
        let pt = quad.point_at_t(roots[0]);
        assert!((pt.x - pt.y).abs() < 1e-12);
        assert!((roots[0] - 0.5).abs() < 1e-12);
    }
}
