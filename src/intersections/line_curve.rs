// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*
Find the intersection of a line and a curve by rotating the curve into the
line's frame of reference:

  r = (p.y - line[0].y) * (line[1].x - line[0].x)
    - (p.x - line[0].x) * (line[1].y - line[0].y)

r is zero on the line, so the roots of r(t) are the curve's crossings with the
infinite line. Roots whose line parameter lies outside of [0, 1] are dropped.
*/

use super::Intersections;
use crate::path64::{pin_t, Curve64, Line64, Point64, Scalar64};

/// Intersects a curve with a line segment.
///
/// The first `t` of each result refers to the curve.
pub fn intersect(curve: &Curve64, line: &Line64) -> Intersections {
    let mut result = Intersections::new();
    add_exact_end_points(curve, line, &mut result);
    add_near_end_points(curve, line, &mut result);

    for root in curve.ray_intersect(line) {
        let line_t = line.exact_t(curve.point_at_t(root));
        if let Some((curve_t, line_t, pt)) = pin_ts(curve, line, root, line_t, &result) {
            if unique_answer(curve, &result, curve_t, pt) {
                result.insert(curve_t, line_t, pt);
            }
        }
    }

    check_coincident(curve, line, &mut result);
    result
}

fn add_exact_end_points(curve: &Curve64, line: &Line64, result: &mut Intersections) {
    for (curve_t, pt) in [(0.0, curve.start()), (1.0, curve.end())] {
        if let Some(line_t) = line.exact_point(pt) {
            result.insert(curve_t, line_t, pt);
        }
    }
}

fn add_near_end_points(curve: &Curve64, line: &Line64, result: &mut Intersections) {
    for (curve_t, pt) in [(0.0, curve.start()), (1.0, curve.end())] {
        if result.has_t(curve_t) {
            continue;
        }

        if let Some((line_t, _)) = line.near_point(pt) {
            result.insert(curve_t, line_t, pt);
        }
    }

    for (line_t, index) in [(0.0, 0), (1.0, 1)] {
        if result.has_opp_t(line_t) {
            continue;
        }

        let pt = line.points[index];
        if let Some(curve_t) = curve.near_point(pt, line.points[1 - index]) {
            result.insert(curve_t, line_t, pt);
        }
    }
}

fn grid(pt: Point64) -> Point64 {
    Point64::from_point(pt.to_point())
}

// Pins parameters to the curve ends and snaps the point to the end points
// it is indistinguishable from in single precision.
fn pin_ts(
    curve: &Curve64,
    line: &Line64,
    curve_t: f64,
    line_t: f64,
    result: &Intersections,
) -> Option<(f64, f64, Point64)> {
    if !line_t.approximately_one_or_less_double() || !line_t.approximately_zero_or_more_double() {
        return None;
    }

    let mut curve_t = pin_t(curve_t);
    let mut line_t = pin_t(line_t);
    let mut pt = if line_t == 0.0 || line_t == 1.0 || !curve_t.zero_or_one() {
        line.point_at_t(line_t)
    } else {
        curve.point_at_t(curve_t)
    };

    let grid_pt = grid(pt);
    if grid_pt.approximately_equal(grid(line.points[0])) {
        pt = line.points[0];
        line_t = 0.0;
    } else if grid_pt.approximately_equal(grid(line.points[1])) {
        pt = line.points[1];
        line_t = 1.0;
    }

    if result.iter().any(|e| e.t[1].approximately_equal(line_t)) {
        return None;
    }

    if grid_pt == grid(curve.start()) {
        pt = curve.start();
        curve_t = 0.0;
    } else if grid_pt == grid(curve.end()) {
        pt = curve.end();
        curve_t = 1.0;
    }

    Some((curve_t, line_t, pt))
}

// Rejects a root that repeats an existing intersection.
fn unique_answer(curve: &Curve64, result: &Intersections, curve_t: f64, pt: Point64) -> bool {
    for existing in result.iter() {
        if existing.pt != pt {
            continue;
        }

        if existing.t[0] == curve_t {
            return false;
        }

        // The curve stays on the point between both parameters.
        let mid = curve.point_at_t((existing.t[0] + curve_t) / 2.0);
        if mid.approximately_equal(pt) {
            return false;
        }
    }

    true
}

// Marks consecutive intersections as a coincident run when the curve between
// them stays on the line.
fn check_coincident(curve: &Curve64, line: &Line64, result: &mut Intersections) {
    let mut last = result.used() as isize - 1;
    let mut index = 0;
    while (index as isize) < last {
        let mid_t = (result.get(index).t[0] + result.get(index + 1).t[0]) / 2.0;
        let mid = curve.point_at_t(mid_t);
        if line.near_point(mid).is_none() {
            index += 1;
            continue;
        }

        if result.is_coincident(index) {
            result.remove_one(index);
            last -= 1;
        } else if result.is_coincident(index + 1) {
            result.remove_one(index + 1);
            last -= 1;
        } else {
            result.set_coincident(index);
            index += 1;
        }

        result.set_coincident(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Conic64, Cubic64, Quad64};

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn quad_crossings() {
        let quad = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(2.0, 4.0), pt(4.0, 0.0)]));
        let line = Line64::new(pt(0.0, 1.5), pt(4.0, 1.5));
        let i = intersect(&quad, &line);
        assert_eq!(i.used(), 2);
        assert!((i.get(0).t[0] - 0.25).abs() < 1e-12);
        assert!((i.get(0).t[1] - 0.25).abs() < 1e-12);
        assert!((i.get(1).t[0] - 0.75).abs() < 1e-12);
        assert!(!i.is_coincident(0));
    }

    #[test]
    fn shared_end_point() {
        let quad = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(2.0, 4.0), pt(4.0, 0.0)]));
        let line = Line64::new(pt(4.0, 0.0), pt(0.0, 0.0));
        let i = intersect(&quad, &line);
        assert_eq!(i.used(), 2);
        assert_eq!(i.get(0).t, [0.0, 1.0]);
        assert_eq!(i.get(1).t, [1.0, 0.0]);
    }

    #[test]
    fn line_stops_short() {
        let quad = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(2.0, 4.0), pt(4.0, 0.0)]));
        let line = Line64::new(pt(0.0, 1.5), pt(1.0, 1.5));
        assert_eq!(intersect(&quad, &line).used(), 1);
    }

    #[test]
    fn conic_crossing() {
        let circle = Curve64::Conic(Conic64::new(
            [pt(15.0, 10.0), pt(15.0, 15.0), pt(10.0, 15.0)],
            core::f64::consts::FRAC_1_SQRT_2,
        ));
        let line = Line64::new(pt(10.0, 10.0), pt(20.0, 20.0));
        let i = intersect(&circle, &line);
        assert_eq!(i.used(), 1);
        let hit = i.get(0).pt;
        assert!((hit.distance(pt(10.0, 10.0)) - 5.0).abs() < 1e-9);
        assert!((hit.x - hit.y).abs() < 1e-9);
    }

    #[test]
    fn cubic_crossings() {
        let cubic = Curve64::Cubic(Cubic64::new([
            pt(0.0, 0.0),
            pt(1.0, 3.0),
            pt(3.0, -3.0),
            pt(4.0, 0.0),
        ]));
        let line = Line64::new(pt(-1.0, 0.0), pt(5.0, 0.0));
        let i = intersect(&cubic, &line);
        assert_eq!(i.used(), 3);
        assert_eq!(i.get(0).t[0], 0.0);
        assert!((i.get(1).t[0] - 0.5).abs() < 1e-9);
        assert_eq!(i.get(2).t[0], 1.0);
    }
}
