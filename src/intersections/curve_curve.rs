// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use super::Intersections;
use crate::error::{PathOpsError, Result};
use crate::path64::{cmp_f64, Curve64, Point64, Rect64, MORE_ROUGH_EPSILON};

// Subdivision stops when both pieces fit into a square of this size,
// relative to the curves magnitude.
const LEAF_EPSILON: f64 = 1e-9;
const MAX_DEPTH: u32 = 40;
const MAX_PAIRS: usize = 20_000;

#[derive(Copy, Clone, Debug)]
struct Pair {
    a: (f64, f64),
    b: (f64, f64),
    depth: u32,
}

/// Intersects two curves, neither of them a line.
///
/// End points that touch the other curve are found exactly. Overlapping
/// curves are reported as coincident runs. Everything else is found by
/// recursive subdivision of both curves.
///
/// # Errors
///
/// Fails when the subdivision doesn't converge, which happens for curves
/// that run almost on top of each other without being coincident.
pub fn intersect(a: &Curve64, b: &Curve64) -> Result<Intersections> {
    let mut result = Intersections::new();
    add_end_points(a, b, &mut result);
    if check_coincident(a, b, &mut result) {
        return Ok(result);
    }

    let mut bounds = Rect64::from_points(a.points());
    bounds.union(&Rect64::from_points(b.points()));
    let tolerance = bounds.magnitude().max(1.0) * LEAF_EPSILON;

    let mut hits = subdivide(a, b, tolerance)?;
    hits.sort_by(|x, y| cmp_f64(&x.0, &y.0));

    let mut start = 0;
    while start < hits.len() {
        let mut end = start + 1;
        while end < hits.len() && same_crossing(a, hits[end - 1], hits[end]) {
            end += 1;
        }

        let (ta, tb) = hits[(start + end - 1) / 2];
        let pt = a.point_at_t(ta);
        if !result.iter().any(|e| e.pt.approximately_equal(pt)) {
            result.insert(ta, tb, pt);
        }

        start = end;
    }

    Ok(result)
}

fn add_end_points(a: &Curve64, b: &Curve64, result: &mut Intersections) {
    for (ta, pt) in [(0.0, a.start()), (1.0, a.end())] {
        if let Some(tb) = b.exact_end(pt) {
            result.insert(ta, tb, pt);
        }
    }

    for (ta, pt) in [(0.0, a.start()), (1.0, a.end())] {
        if result.has_t(ta) {
            continue;
        }

        let opp = pt + a.dxdy_at_t(ta);
        if let Some(tb) = b.near_point(pt, opp) {
            result.insert(ta, tb, pt);
        }
    }

    for (tb, pt) in [(0.0, b.start()), (1.0, b.end())] {
        if result.has_opp_t(tb) {
            continue;
        }

        let opp = pt + b.dxdy_at_t(tb);
        if let Some(ta) = a.near_point(pt, opp) {
            result.insert(ta, tb, pt);
        }
    }
}

// Marks consecutive intersections as coincident when `a` stays on `b`
// between them. Returns true when a coincident run was found.
fn check_coincident(a: &Curve64, b: &Curve64, result: &mut Intersections) -> bool {
    let mut found = false;
    let mut index = 0;
    while index + 1 < result.used() {
        let first = result.get(index).t;
        let second = result.get(index + 1).t;
        let mid_t = (first[0] + second[0]) / 2.0;
        let mid = a.point_at_t(mid_t);
        let on_b = b
            .near_point(mid, mid + a.dxdy_at_t(mid_t))
            .map_or(false, |t| crate::path64::approximately_between(first[1], t, second[1]));
        if !on_b {
            index += 1;
            continue;
        }

        found = true;
        if result.is_coincident(index) {
            // Extend the run instead of keeping an inner point.
            result.remove_one(index);
            result.set_coincident(index);
        } else {
            result.set_coincident(index);
            result.set_coincident(index + 1);
            index += 1;
        }
    }

    found
}

fn subdivide(a: &Curve64, b: &Curve64, tolerance: f64) -> Result<Vec<(f64, f64)>> {
    let mut hits = Vec::new();
    let mut stack = Vec::new();
    stack.push(Pair {
        a: (0.0, 1.0),
        b: (0.0, 1.0),
        depth: 0,
    });

    let mut visited = 0;
    while let Some(pair) = stack.pop() {
        visited += 1;
        if visited > MAX_PAIRS {
            log::debug!("curve subdivision gave up after {} pairs", MAX_PAIRS);
            return Err(PathOpsError::Corrupt("curve subdivision didn't converge"));
        }

        let piece_a = a.sub_divide(pair.a.0, pair.a.1);
        let piece_b = b.sub_divide(pair.b.0, pair.b.1);
        let bounds_a = Rect64::from_points(piece_a.points());
        let bounds_b = Rect64::from_points(piece_b.points());
        if !bounds_a.outset(tolerance).intersects(&bounds_b) {
            continue;
        }

        if !piece_a.hull_intersects(&piece_b) {
            continue;
        }

        if (bounds_a.is_tiny(tolerance) && bounds_b.is_tiny(tolerance)) || pair.depth >= MAX_DEPTH {
            let ta = (pair.a.0 + pair.a.1) / 2.0;
            let tb = (pair.b.0 + pair.b.1) / 2.0;
            hits.push((ta, tb));
            continue;
        }

        let mid_a = (pair.a.0 + pair.a.1) / 2.0;
        let mid_b = (pair.b.0 + pair.b.1) / 2.0;
        for sub_a in [(pair.a.0, mid_a), (mid_a, pair.a.1)] {
            for sub_b in [(pair.b.0, mid_b), (mid_b, pair.b.1)] {
                stack.push(Pair {
                    a: sub_a,
                    b: sub_b,
                    depth: pair.depth + 1,
                });
            }
        }
    }

    Ok(hits)
}

fn same_crossing(a: &Curve64, prev: (f64, f64), next: (f64, f64)) -> bool {
    if (next.0 - prev.0).abs() < MORE_ROUGH_EPSILON && (next.1 - prev.1).abs() < MORE_ROUGH_EPSILON {
        return true;
    }

    let p0: Point64 = a.point_at_t(prev.0);
    p0.roughly_equal(a.point_at_t(next.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Conic64, Cubic64, Quad64};
    use core::f64::consts::FRAC_1_SQRT_2;

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn quads_cross() {
        let a = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(2.0, 4.0), pt(4.0, 0.0)]));
        let b = Curve64::Quad(Quad64::new([pt(0.0, 2.0), pt(2.0, -2.0), pt(4.0, 2.0)]));
        let i = intersect(&a, &b).unwrap();
        assert_eq!(i.used(), 2);
        for e in i.iter() {
            assert!(e.pt.distance(a.point_at_t(e.t[0])) < 1e-6);
            assert!(e.pt.distance(b.point_at_t(e.t[1])) < 1e-6);
            assert!((e.pt.y - 1.0).abs() < 1e-6);
            assert!(!e.coincident);
        }
    }

    #[test]
    fn circle_arcs_cross() {
        // Upper right quarters of circles centered at (0, 0) and (2, 0).
        let a = Curve64::Conic(Conic64::new(
            [pt(2.0, 0.0), pt(2.0, 2.0), pt(0.0, 2.0)],
            FRAC_1_SQRT_2,
        ));
        let b = Curve64::Conic(Conic64::new(
            [pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0)],
            FRAC_1_SQRT_2,
        ));
        let i = intersect(&a, &b).unwrap();
        assert_eq!(i.used(), 1);
        let hit = i.get(0).pt;
        assert!((hit.x - 1.0).abs() < 1e-6);
        assert!((hit.y - 3.0f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn identical_conics_are_coincident() {
        let conic = Curve64::Conic(Conic64::new(
            [pt(15.0, 10.0), pt(15.0, 15.0), pt(10.0, 15.0)],
            FRAC_1_SQRT_2,
        ));
        let i = intersect(&conic, &conic).unwrap();
        assert_eq!(i.used(), 2);
        assert_eq!(i.get(0).t, [0.0, 0.0]);
        assert_eq!(i.get(1).t, [1.0, 1.0]);
        assert!(i.is_coincident(0) && i.is_coincident(1));
    }

    #[test]
    fn partial_overlap_is_coincident() {
        let quad = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(2.0, 4.0), pt(4.0, 0.0)]));
        let part = quad.sub_divide(0.25, 0.75);
        let i = intersect(&quad, &part).unwrap();
        assert_eq!(i.used(), 2);
        assert!((i.get(0).t[0] - 0.25).abs() < 1e-9);
        assert!((i.get(1).t[0] - 0.75).abs() < 1e-9);
        assert!(i.is_coincident(0) && i.is_coincident(1));
    }

    #[test]
    fn disjoint_cubics() {
        let a = Curve64::Cubic(Cubic64::new([
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(2.0, 1.0),
            pt(3.0, 0.0),
        ]));
        let b = a.map(|p| pt(p.x, p.y + 5.0));
        assert!(intersect(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn nearly_coincident_cubics_fail() {
        let a = Curve64::Cubic(Cubic64::new([
            pt(0.0, 500.0),
            pt(250.0, 1000.0),
            pt(750.0, 0.0),
            pt(1000.0, 500.0),
        ]));
        // Turned by a tiny angle around a point on the curve.
        let (sin, cos) = 1e-5f64.sin_cos();
        let b = a.map(|p| {
            let (x, y) = (p.x - 500.0, p.y - 500.0);
            pt(500.0 + cos * x - sin * y, 500.0 + sin * x + cos * y)
        });
        assert_eq!(
            intersect(&a, &b).unwrap_err(),
            PathOpsError::Corrupt("curve subdivision didn't converge")
        );
    }
}
