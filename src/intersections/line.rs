// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::Intersections;
use crate::path64::{between, Line64, Scalar64};

/// Intersects two line segments.
///
/// Returns up to two intersections. Two intersections mean the lines overlap,
/// both are marked as coincident.
pub fn intersect(a: &Line64, b: &Line64) -> Intersections {
    let mut result = Intersections::new();
    for (i, p) in a.points.iter().enumerate() {
        if let Some(t) = b.exact_point(*p) {
            result.insert(i as f64, t, *p);
        }
    }

    for (i, p) in b.points.iter().enumerate() {
        if let Some(t) = a.exact_point(*p) {
            result.insert(t, i as f64, *p);
        }
    }

    let a_len = a.dxdy();
    let b_len = b.dxdy();
    // Slopes match when the denominator goes to zero.
    let ax_by = a_len.x * b_len.y;
    let ay_bx = a_len.y * b_len.x;
    let unparallel = ax_by.not_almost_equal_ulps_pin(ay_bx);
    if unparallel && result.is_empty() {
        let ab0 = a.points[0] - b.points[0];
        let numer_a = ab0.y * b_len.x - b_len.y * ab0.x;
        let numer_b = ab0.y * a_len.x - a_len.y * ab0.x;
        let denom = ax_by - ay_bx;
        if between(0.0, numer_a, denom) && between(0.0, numer_b, denom) {
            let ta = numer_a / denom;
            let tb = numer_b / denom;
            result.insert(ta, tb, a.point_at_t(ta));
        }
    }

    // End points that are close to the other line, but not exactly on it.
    for (i, p) in a.points.iter().enumerate() {
        if let Some((t, _)) = b.near_point(*p) {
            result.insert(i as f64, t, *p);
        }
    }

    for (i, p) in b.points.iter().enumerate() {
        if let Some((t, _)) = a.near_point(*p) {
            result.insert(t, i as f64, *p);
        }
    }

    clean_up_parallel_lines(&mut result, !unparallel);
    result
}

fn clean_up_parallel_lines(result: &mut Intersections, parallel: bool) {
    while result.used() > 2 {
        result.remove_one(1);
    }

    if result.used() == 2 && !parallel {
        let first = result.get(0).t;
        let last = result.get(1).t;
        let start_match = first[0] == 0.0 || first[1].zero_or_one();
        let end_match = last[0] == 1.0 || last[1].zero_or_one();
        if (!start_match && !end_match) || first[0].approximately_equal(last[0]) {
            result.remove_one(end_match as usize);
        }
    }

    if result.used() == 2 {
        result.set_coincident(0);
        result.set_coincident(1);
    }
}
