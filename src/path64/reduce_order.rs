// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Lowers the degree of curves whose control points make them simpler than their kind.

use super::curve64::Curve64;
use super::line64::Line64;
use super::point64::Point64;
use super::quad64::Quad64;
use super::Scalar64;

/// Returns the simplest curve with the same geometry.
///
/// Returns `None` when the curve collapses to a point, such curves do not
/// contribute to the fill.
pub fn reduce(curve: &Curve64) -> Option<Curve64> {
    match curve {
        Curve64::Line(line) => {
            if line.points[0].approximately_equal(line.points[1]) {
                None
            } else {
                Some(*curve)
            }
        }
        Curve64::Quad(quad) => reduce_quad(&quad.points),
        Curve64::Conic(conic) => match reduce_quad(&conic.points)? {
            Curve64::Quad(_) if conic.weight != 1.0 => Some(*curve),
            reduced => Some(reduced),
        },
        Curve64::Cubic(cubic) => reduce_cubic(&cubic.points),
    }
}

fn extreme_indices(points: &[Point64]) -> (usize, usize) {
    let mut min_x = 0;
    let mut min_y = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if points[min_x].x > p.x {
            min_x = i;
        }

        if points[min_y].y > p.y {
            min_y = i;
        }
    }

    (min_x, min_y)
}

fn reduce_quad(points: &[Point64; 3]) -> Option<Curve64> {
    let (min_x, min_y) = extreme_indices(points);
    let mut min_x_set = 0;
    let mut min_y_set = 0;
    for (i, p) in points.iter().enumerate() {
        if p.x.almost_equal_ulps(points[min_x].x) {
            min_x_set |= 1 << i;
        }

        if p.y.almost_equal_ulps(points[min_y].y) {
            min_y_set |= 1 << i;
        }
    }

    // Starts and ends at the same place.
    if min_x_set & 0b101 == 0b101 && min_y_set & 0b101 == 0b101 {
        return None;
    }

    if min_x_set == 0b111 || min_y_set == 0b111 || is_linear(points, 0, 2) {
        return line_between(points[0], points[2]);
    }

    Some(Curve64::Quad(Quad64::new(*points)))
}

fn reduce_cubic(points: &[Point64; 4]) -> Option<Curve64> {
    let (min_x, min_y) = extreme_indices(points);
    let mut min_x_set = 0;
    let mut min_y_set = 0;
    for (i, p) in points.iter().enumerate() {
        let denom = p
            .x
            .abs()
            .max(p.y.abs())
            .max(points[min_x].x.abs())
            .max(points[min_y].y.abs());
        if denom == 0.0 {
            min_x_set |= 1 << i;
            min_y_set |= 1 << i;
            continue;
        }

        let inv = 1.0 / denom;
        if (p.x * inv).approximately_equal_half(points[min_x].x * inv) {
            min_x_set |= 1 << i;
        }

        if (p.y * inv).approximately_equal_half(points[min_y].y * inv) {
            min_y_set |= 1 << i;
        }
    }

    if min_x_set == 0b1111 && min_y_set == 0b1111 {
        return None;
    }

    if min_x_set == 0b1111 || min_y_set == 0b1111 {
        return line_between(points[0], points[3]);
    }

    let mut end = 3;
    while end > 0 && points[0].approximately_equal(points[end]) {
        end -= 1;
    }

    if end == 0 {
        return None;
    }

    let linear = if points[0].approximately_dequal(points[3]) {
        is_linear(&points[0..3], 0, 2)
    } else {
        is_linear(points, 0, end)
    };
    if linear {
        return line_between(points[0], points[3]);
    }

    if let Some(quad) = as_quad(points) {
        return Some(Curve64::Quad(quad));
    }

    Some(Curve64::Cubic(super::Cubic64::new(*points)))
}

fn line_between(a: Point64, b: Point64) -> Option<Curve64> {
    if a.approximately_equal(b) {
        None
    } else {
        Some(Curve64::Line(Line64::new(a, b)))
    }
}

// Checks that the control points lie on the line through `points[start]` and `points[end]`.
fn is_linear(points: &[Point64], start: usize, end: usize) -> bool {
    let origin = points[start];
    let chord = points[end] - origin;
    let len = chord.length();

    let mut tiniest = f64::MAX;
    let mut largest = f64::MIN;
    for p in points {
        tiniest = tiniest.min(p.x).min(p.y);
        largest = largest.max(p.x).max(p.y);
    }
    let largest = largest.max(-tiniest);

    points[1..points.len() - 1].iter().all(|p| {
        let distance = if len == 0.0 {
            0.0
        } else {
            chord.cross(*p - origin) / len
        };
        distance.approximately_zero_when_compared_to(largest)
    })
}

// A cubic is a degree elevated quad when both inner points are 2/3 of the
// way to the same quad control point.
fn as_quad(points: &[Point64; 4]) -> Option<Quad64> {
    let mid = |p0: f64, p1: f64, p2: f64, p3: f64| -> Option<f64> {
        let mid = p0 + (p1 - p0) * 3.0 / 2.0;
        let side_a = mid - p3;
        let side_b = (p2 - p3) * 3.0 / 2.0;
        let same = if side_a.approximately_zero() {
            side_a.approximately_equal(side_b)
        } else {
            side_a.almost_equal_ulps_pin(side_b)
        };

        if same {
            Some(mid)
        } else {
            None
        }
    };

    let [p0, p1, p2, p3] = *points;
    let x = mid(p0.x, p1.x, p2.x, p3.x)?;
    let y = mid(p0.y, p1.y, p2.y, p3.y)?;
    Some(Quad64::new([p0, Point64::from_xy(x, y), p3]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Conic64, Cubic64};

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn quads() {
        let flat = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)]));
        assert_eq!(
            reduce(&flat),
            Some(Curve64::Line(Line64::new(pt(0.0, 0.0), pt(2.0, 2.0))))
        );

        let vertical = Curve64::Quad(Quad64::new([pt(1.0, 0.0), pt(1.0, 5.0), pt(1.0, 2.0)]));
        assert!(matches!(reduce(&vertical), Some(Curve64::Line(_))));

        let closed = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(3.0, 1.0), pt(0.0, 0.0)]));
        assert_eq!(reduce(&closed), None);

        let curved = Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]));
        assert_eq!(reduce(&curved), Some(curved));
    }

    #[test]
    fn conics() {
        let points = [pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)];
        let unit = Curve64::Conic(Conic64::new(points, 1.0));
        assert_eq!(reduce(&unit), Some(Curve64::Quad(Quad64::new(points))));

        let conic = Curve64::Conic(Conic64::new(points, 0.5));
        assert_eq!(reduce(&conic), Some(conic));
    }

    #[test]
    fn cubics() {
        let line = Curve64::Cubic(Cubic64::new([
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(2.0, 0.0),
            pt(3.0, 0.0),
        ]));
        assert!(matches!(reduce(&line), Some(Curve64::Line(_))));

        let quad = Quad64::new([pt(0.0, 0.0), pt(3.0, 6.0), pt(6.0, 0.0)]);
        let elevated = Curve64::Cubic(quad.to_cubic());
        match reduce(&elevated) {
            Some(Curve64::Quad(reduced)) => {
                assert!(reduced.points[1].distance(quad.points[1]) < 1e-12)
            }
            other => panic!("unexpected reduction: {:?}", other),
        }

        let point = Curve64::Cubic(Cubic64::new([pt(1.0, 1.0); 4]));
        assert_eq!(reduce(&point), None);

        let cubic = Curve64::Cubic(Cubic64::new([
            pt(0.0, 0.0),
            pt(1.0, 3.0),
            pt(3.0, -3.0),
            pt(4.0, 0.0),
        ]));
        assert_eq!(reduce(&cubic), Some(cubic));
    }
}
