// Copyright 2015 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*
The winding of a span is found by casting an axis aligned ray from a point
inside of the span towards negative infinity and summing the signed values
of all the spans it crosses.

The ray is horizontal for mostly vertical spans and vertical otherwise.
A crossing counts `+value` when the ray, travelling back in the positive
direction, moves from the left to the right side of the crossed span.
The left side is the side of the `(-dy, dx)` normal.

A cast is ambiguous when the ray touches a span boundary, grazes a curve
or passes through another curve at the ray origin. Then it is repeated
from another point of the span.
*/

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

use super::global_state::{GlobalState, SegmentId, SpanId};
use crate::error::{PathOpsError, Result};
use crate::path64::axis_intersections::{horizontal_intersect, vertical_intersect};
use crate::path64::{Point64, Scalar64, ROUGH_EPSILON};

const MAX_TRIES: usize = 15;

/// Computes winding sums of all spans that contribute to the fill.
pub fn compute_windings(state: &mut GlobalState) -> Result<()> {
    for segment in state.segment_ids() {
        for span in state.segment_spans(segment) {
            if state.span(span).is_canceled() || state.span(span).wind_sum.is_some() {
                continue;
            }

            let (wind, opp) = span_winding(state, span)?;
            state.set_wind_sums(span, wind, opp)?;
        }
    }

    Ok(())
}

/// Returns the winding of both operands on the left side of a span.
pub fn span_winding(state: &mut GlobalState, span: SpanId) -> Result<(i32, i32)> {
    for i in 0..MAX_TRIES {
        if let Some(winding) = cast(state, span, ray_fraction(i))? {
            return Ok(winding);
        }
    }

    log::warn!("no unambiguous ray for {:?}", span);
    state.set_winding_failed();
    Err(PathOpsError::WindingFailed)
}

// Yields 1/2, 1/4, 3/4, 1/8, 3/8, ...
fn ray_fraction(i: usize) -> f64 {
    let n = i + 1;
    let mut level = 0;
    while (2 << level) <= n {
        level += 1;
    }

    let numer = 2 * (n - (1 << level)) + 1;
    numer as f64 / (2 << level) as f64
}

fn sign(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[derive(Copy, Clone, Debug)]
struct Ray {
    origin: Point64,
    horizontal: bool,
    segment: SegmentId,
    t: f64,
    operand: bool,
}

impl Ray {
    // The coordinate along the ray.
    fn along(&self, pt: Point64) -> f64 {
        if self.horizontal {
            pt.x
        } else {
            pt.y
        }
    }

    // The sign of the crossing, when moving towards positive infinity.
    fn crossing(&self, dxdy: Point64) -> i32 {
        if self.horizontal {
            sign(dxdy.y)
        } else {
            -sign(dxdy.x)
        }
    }

    fn grazes(&self, dxdy: Point64) -> bool {
        let (across, along) = if self.horizontal {
            (dxdy.y, dxdy.x)
        } else {
            (dxdy.x, dxdy.y)
        };

        across == 0.0 || across.abs() < ROUGH_EPSILON * along.abs()
    }
}

// Returns `None` when the ray is ambiguous.
fn cast(state: &GlobalState, span: SpanId, fraction: f64) -> Result<Option<(i32, i32)>> {
    let segment = state.span(span).segment;
    let next = state
        .span(span)
        .next
        .ok_or(PathOpsError::Corrupt("final span has no winding"))?;
    let t = state.span_t(span) + (state.span_t(next) - state.span_t(span)) * fraction;
    let curve = state.segment(segment).curve;
    let dxdy = curve.dxdy_at_t(t);
    if dxdy.approximately_zero() {
        return Ok(None);
    }

    let ray = Ray {
        origin: curve.point_at_t(t),
        horizontal: dxdy.y.abs() >= dxdy.x.abs(),
        segment,
        t,
        operand: operand(state, segment),
    };

    let mut wind = 0;
    let mut opp = 0;
    for other in state.segment_ids() {
        match hits(state, &ray, other)? {
            Some((w, o)) => {
                wind += w;
                opp += o;
            }
            None => return Ok(None),
        }
    }

    let own = state.span(span);
    let c = ray.crossing(dxdy);
    let after_is_right = if ray.horizontal {
        dxdy.y > 0.0
    } else {
        dxdy.x < 0.0
    };

    if !after_is_right {
        wind += c * own.wind_value;
        opp += c * own.opp_value;
    }

    log::trace!("{:?} at {} winds {} {}", span, t, wind, opp);
    Ok(Some((wind, opp)))
}

fn operand(state: &GlobalState, segment: SegmentId) -> bool {
    state.contour(state.segment(segment).contour).operand
}

// Sums the crossings of the ray with a segment.
fn hits(state: &GlobalState, ray: &Ray, segment: SegmentId) -> Result<Option<(i32, i32)>> {
    let curve = state.segment(segment).curve;
    let bounds = state.segment(segment).bounds;
    let (lo, hi, start) = if ray.horizontal {
        (bounds.top, bounds.bottom, bounds.left)
    } else {
        (bounds.left, bounds.right, bounds.top)
    };

    let across = if ray.horizontal {
        ray.origin.y
    } else {
        ray.origin.x
    };

    if across < lo || across > hi || start > ray.along(ray.origin) {
        return Ok(Some((0, 0)));
    }

    let mut roots = [0.0; 3];
    let count = if ray.horizontal {
        horizontal_intersect(&curve, across, &mut roots)
    } else {
        vertical_intersect(&curve, across, &mut roots)
    };

    let is_self = segment == ray.segment;
    if count == 2 && curve.is_line() {
        // The line lies on the ray.
        let behind = curve.points().iter().any(|p| ray.along(*p) < ray.along(ray.origin));
        return Ok(if behind && !is_self { None } else { Some((0, 0)) });
    }

    let same_operand = operand(state, segment) == ray.operand;
    let origin = ray.along(ray.origin);
    let mut wind = 0;
    let mut opp = 0;
    for &t in &roots[0..count] {
        let pt = curve.point_at_t(t);
        if is_self && (t.approximately_equal(ray.t) || pt.approximately_equal(ray.origin)) {
            continue;
        }

        let along = ray.along(pt);
        let at_origin = along.approximately_equal(origin) || along.almost_equal_ulps(origin);
        if along > origin && !at_origin {
            continue;
        }

        let span = match hit_span(state, segment, t, pt) {
            Some(span) => span,
            None => return Ok(None),
        };

        // Canceled spans lie on their coincident keepers, including the ray's own span.
        let span = state.span(span);
        if span.is_canceled() {
            continue;
        }

        if at_origin {
            return Ok(None);
        }

        let dxdy = curve.dxdy_at_t(t);
        if ray.grazes(dxdy) {
            return Ok(None);
        }

        let c = ray.crossing(dxdy);
        if same_operand {
            wind += c * span.wind_value;
            opp += c * span.opp_value;
        } else {
            wind += c * span.opp_value;
            opp += c * span.wind_value;
        }
    }

    Ok(Some((wind, opp)))
}

// Finds the span containing `t`, or `None` when `t` is at a span boundary.
fn hit_span(state: &GlobalState, segment: SegmentId, t: f64, pt: Point64) -> Option<SpanId> {
    let mut found = None;
    let mut span = state.segment(segment).head;
    loop {
        let span_t = state.span_t(span);
        if span_t.approximately_equal(t) || state.span_pt(span).approximately_equal(pt) {
            return None;
        }

        let next = state.span(span).next?;
        if span_t < t && t < state.span_t(next) {
            found = Some(span);
        }

        span = next;
        if state.span(span).is_final() {
            let end = state.span_pt(span);
            if state.span_t(span).approximately_equal(t) || end.approximately_equal(pt) {
                return None;
            }

            return found;
        }
    }
}
