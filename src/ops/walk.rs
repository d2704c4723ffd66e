// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::global_state::{GlobalState, Phase, PtTId, SpanId};
use super::path_writer::PathWriter;
use super::PathOp;
use crate::error::{PathOpsError, Result};
use crate::path64::{cmp_f64, Curve64, Point64, ROUGH_EPSILON};

/// A span that separates the inside of the result from the outside,
/// oriented so the inside is on its left.
#[derive(Clone, Debug)]
struct Edge {
    span: SpanId,
    from: PtTId,
    to: PtTId,
    curve: Curve64,
    used: bool,
}

fn is_inside(winding: i32, xor: bool) -> bool {
    if xor {
        winding & 1 != 0
    } else {
        winding != 0
    }
}

impl PathOp {
    fn apply(self, one: bool, two: bool) -> bool {
        match self {
            PathOp::Difference => one && !two,
            PathOp::Intersect => one && two,
            PathOp::Union => one || two,
            PathOp::Xor => one ^ two,
            PathOp::ReverseDifference => !one && two,
        }
    }
}

/// Checks whether a span is a part of the result boundary.
///
/// Returns `None` for inactive spans and the orientation otherwise.
fn span_direction(state: &GlobalState, span: SpanId, op: PathOp) -> Result<Option<bool>> {
    let s = state.span(span);
    if s.is_canceled() {
        return Ok(None);
    }

    let (wind, opp) = match (s.wind_sum, s.opp_sum) {
        (Some(wind), Some(opp)) => (wind, opp),
        _ => return Err(PathOpsError::Corrupt("span winding is not computed")),
    };

    let contour = state.contour(state.segment(s.segment).contour);
    let (one_xor, two_xor) = if contour.operand {
        (contour.opp_xor, contour.xor)
    } else {
        (contour.xor, contour.opp_xor)
    };

    let result = |own: i32, other: i32| {
        let (one, two) = if contour.operand {
            (other, own)
        } else {
            (own, other)
        };

        op.apply(is_inside(one, one_xor), is_inside(two, two_xor))
    };

    let left = result(wind, opp);
    let right = result(wind + s.wind_value, opp + s.opp_value);
    Ok(if left != right { Some(left) } else { None })
}

fn collect_edges(state: &GlobalState, op: PathOp) -> Result<Vec<Edge>> {
    let mut edges = Vec::new();
    for segment in state.segment_ids() {
        for span in state.segment_spans(segment) {
            let forward = match span_direction(state, span, op)? {
                Some(forward) => forward,
                None => continue,
            };

            let next = state
                .span(span)
                .next
                .ok_or(PathOpsError::Corrupt("final span in the result"))?;
            let start = state.span(span).ptt;
            let end = state.span(next).ptt;
            let (from, to) = if forward { (start, end) } else { (end, start) };

            let curve = state.sub_curve(span)?;
            let curve = if forward { curve } else { curve.reversed() };
            let curve = curve.with_ends(state.ring_point(from)?, state.ring_point(to)?);
            edges.push(Edge {
                span,
                from: state.ring_key(from)?,
                to: state.ring_key(to)?,
                curve,
                used: false,
            });
        }
    }

    Ok(edges)
}

fn tangent(curve: &Curve64, t: f64) -> Point64 {
    let dxdy = curve.dxdy_at_t(t);
    if dxdy.approximately_zero() {
        curve.end() - curve.start()
    } else {
        dxdy
    }
}

// Picks the edge that turns the most towards the inside.
fn best_turn(edges: &[Edge], from: &Edge, candidates: &[usize]) -> Option<usize> {
    let incoming = tangent(&from.curve, 1.0);
    candidates.iter().copied().max_by(|a, b| {
        let turn = |i: usize| {
            let outgoing = tangent(&edges[i].curve, 0.0);
            incoming.cross(outgoing).atan2(incoming.dot(outgoing))
        };

        cmp_f64(&turn(*a), &turn(*b))
    })
}

fn first_edge(edges: &[Edge]) -> Option<usize> {
    (0..edges.len()).filter(|i| !edges[*i].used).min_by(|a, b| {
        let pa = edges[*a].curve.start();
        let pb = edges[*b].curve.start();
        cmp_f64(&pa.y, &pb.y).then(cmp_f64(&pa.x, &pb.x))
    })
}

/// Chains result edges into contours and writes them.
pub fn walk(state: &mut GlobalState, op: PathOp, writer: &mut PathWriter) -> Result<()> {
    debug_assert_eq!(state.phase(), Phase::Walking);
    let mut edges = collect_edges(state, op)?;
    log::debug!("walking {} edges", edges.len());

    let mut outgoing: BTreeMap<PtTId, Vec<usize>> = BTreeMap::new();
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.from).or_default().push(i);
    }

    let mut partials: Vec<Vec<Curve64>> = Vec::new();
    while let Some(first) = first_edge(&edges) {
        edges[first].used = true;
        let start = edges[first].from;
        let mut contour = Vec::new();
        contour.push(first);
        let mut current = first;
        let closed = loop {
            if edges[current].to == start {
                break true;
            }

            let mut candidates: Vec<usize> = outgoing
                .get(&edges[current].to)
                .map(|list| list.iter().copied().filter(|i| !edges[*i].used).collect())
                .unwrap_or_default();

            if candidates.is_empty() {
                let end = edges[current].curve.end();
                candidates = (0..edges.len())
                    .filter(|i| !edges[*i].used && edges[*i].curve.start().approximately_equal(end))
                    .collect();
            }

            match best_turn(&edges, &edges[current], &candidates) {
                Some(next) => {
                    edges[next].used = true;
                    contour.push(next);
                    current = next;
                }
                None => break false,
            }
        };

        for i in &contour {
            state.mark_done(edges[*i].span);
        }

        let curves: Vec<Curve64> = contour.iter().map(|i| edges[*i].curve).collect();
        if closed {
            write_contour(writer, &curves);
        } else {
            log::debug!("partial contour of {} edges", curves.len());
            partials.push(curves);
        }
    }

    let consumed = state
        .head
        .iter(&state.contours)
        .filter(|c| state.contour(*c).done)
        .count();
    log::debug!("{} contours fully consumed", consumed);

    if !partials.is_empty() {
        state.set_phase(Phase::FixWinding);
        assemble_partials(partials, writer)?;
    }

    Ok(())
}

fn write_contour(writer: &mut PathWriter, curves: &[Curve64]) {
    if let Some(first) = curves.first() {
        writer.start(first.start());
        for curve in curves {
            writer.curve(curve);
        }

        writer.close();
    }
}

fn gap_tolerance(a: Point64, b: Point64) -> f64 {
    let magnitude = a.x.abs().max(a.y.abs()).max(b.x.abs()).max(b.y.abs());
    ROUGH_EPSILON * magnitude.max(1.0)
}

// Joins contours that didn't close by connecting the nearest end points.
fn assemble_partials(mut partials: Vec<Vec<Curve64>>, writer: &mut PathWriter) -> Result<()> {
    while !partials.is_empty() {
        let mut contour = partials.remove(0);
        loop {
            let (start, end) = match (contour.first(), contour.last()) {
                (Some(first), Some(last)) => (first.start(), last.end()),
                _ => break,
            };

            let to_start = end.distance(start);
            let nearest = partials
                .iter()
                .enumerate()
                .map(|(i, p)| (i, p.first().map_or(f64::INFINITY, |c| end.distance(c.start()))))
                .min_by(|a, b| cmp_f64(&a.1, &b.1));

            match nearest {
                Some((i, gap)) if gap < to_start => {
                    if gap > gap_tolerance(end, partials[i][0].start()) {
                        log::warn!("result contour gap of {} can't be closed", gap);
                        return Err(PathOpsError::UnclosedContour);
                    }

                    if gap > 0.0 {
                        log::warn!("closing a result contour gap of {}", gap);
                    }

                    let piece = partials.remove(i);
                    contour.extend(piece);
                }
                _ => {
                    if to_start > gap_tolerance(end, start) {
                        log::warn!("result contour gap of {} can't be closed", to_start);
                        return Err(PathOpsError::UnclosedContour);
                    }

                    break;
                }
            }
        }

        write_contour(writer, &contour);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::Line64;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve64 {
        Curve64::Line(Line64::new(Point64::from_xy(x0, y0), Point64::from_xy(x1, y1)))
    }

    #[test]
    fn operators() {
        let table = [
            (PathOp::Difference, [false, true, false, false]),
            (PathOp::Intersect, [false, false, false, true]),
            (PathOp::Union, [false, true, true, true]),
            (PathOp::Xor, [false, true, true, false]),
            (PathOp::ReverseDifference, [false, false, true, false]),
        ];

        for (op, expected) in table.iter() {
            let inputs = [(false, false), (true, false), (false, true), (true, true)];
            for ((one, two), result) in inputs.iter().zip(expected.iter()) {
                assert_eq!(op.apply(*one, *two), *result, "{:?}", op);
            }
        }
    }

    #[test]
    fn fill_rules() {
        assert!(is_inside(2, false));
        assert!(!is_inside(2, true));
        assert!(is_inside(-1, true));
        assert!(!is_inside(0, false));
    }

    #[test]
    fn sharpest_turn_wins() {
        let edge = |curve| Edge {
            span: SpanId::new(0),
            from: PtTId::new(0),
            to: PtTId::new(0),
            curve,
            used: false,
        };

        let edges = [
            edge(line(0.0, 0.0, 1.0, 0.0)),
            edge(line(1.0, 0.0, 2.0, 0.0)),
            edge(line(1.0, 0.0, 1.0, 1.0)),
            edge(line(1.0, 0.0, 1.0, -1.0)),
        ];
        assert_eq!(best_turn(&edges, &edges[0], &[1, 2, 3]), Some(2));
        assert_eq!(best_turn(&edges, &edges[0], &[1, 3]), Some(1));
        assert_eq!(best_turn(&edges, &edges[0], &[]), None);
    }

    #[test]
    fn partials_are_joined() {
        let mut writer = PathWriter::new();
        let partials = alloc::vec![
            alloc::vec![line(0.0, 0.0, 2.0, 0.0), line(2.0, 0.0, 2.0, 2.0)],
            alloc::vec![line(2.0, 2.0000001, 0.0, 2.0), line(0.0, 2.0, 0.0, 0.0)],
        ];
        assemble_partials(partials, &mut writer).unwrap();
        assert_eq!(writer.finish().unwrap().len(), 5);

        let mut writer = PathWriter::new();
        let partials = alloc::vec![alloc::vec![line(0.0, 0.0, 2.0, 0.0), line(2.0, 0.0, 2.0, 2.0)]];
        assert_eq!(assemble_partials(partials, &mut writer), Err(PathOpsError::UnclosedContour));
    }
}
