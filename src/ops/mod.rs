// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Boolean operations on paths (SkPathOps).

use alloc::vec::Vec;

use tiny_pathops_path::Path;

use crate::error::{PathOpsError, Result};
use crate::intersections;
use crate::path64::ROUGH_EPSILON;

mod coincidence;
mod contour;
mod edge_builder;
mod global_state;
mod path_writer;
mod ptt;
mod segment;
mod span;
mod walk;
mod winding;

use edge_builder::{EdgeBuilder, EdgeFlags};
use global_state::{GlobalState, Phase, SegmentId};
use path_writer::PathWriter;

/// The cleanup passes usually settle after one or two rounds.
const MAX_CLEANUP_PASSES: usize = 8;

/// A boolean operation.
///
/// `one` is the first path of [`op`], `two` is the second one.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathOp {
    /// `one` minus `two`.
    Difference,
    /// The area covered by both paths.
    Intersect,
    /// The area covered by either path.
    Union,
    /// The area covered by exactly one of the paths.
    Xor,
    /// `two` minus `one`.
    ReverseDifference,
}

/// A path fill rule.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FillRule {
    /// Non-zero winding.
    Winding,
    /// Odd winding.
    EvenOdd,
}

/// Applies a boolean operation to two paths.
///
/// Returns `Ok(None)` when the result is empty.
///
/// # Errors
///
/// Fails on non-finite input and when the intersections of the paths
/// can't be resolved unambiguously. Like Skia, doesn't return a partial result.
pub fn op(
    one: &Path,
    one_fill: FillRule,
    two: &Path,
    two_fill: FillRule,
    op: PathOp,
) -> Result<Option<Path>> {
    if op == PathOp::Intersect && !one.bounds().intersects(&two.bounds()) {
        return Ok(None);
    }

    let one_xor = one_fill == FillRule::EvenOdd;
    let two_xor = two_fill == FillRule::EvenOdd;
    let inputs = [
        (
            one,
            EdgeFlags {
                operand: false,
                xor: one_xor,
                opp_xor: two_xor,
            },
        ),
        (
            two,
            EdgeFlags {
                operand: true,
                xor: two_xor,
                opp_xor: one_xor,
            },
        ),
    ];

    run(&inputs, op).map_err(|e| {
        log::warn!("{:?} failed: {}", op, e);
        e
    })
}

/// Removes self-intersections and overlaps, producing a path with the same
/// fill using the non-zero winding rule.
///
/// Returns `Ok(None)` when the path fills nothing.
pub fn simplify(path: &Path, fill: FillRule) -> Result<Option<Path>> {
    let xor = fill == FillRule::EvenOdd;
    let inputs = [(
        path,
        EdgeFlags {
            operand: false,
            xor,
            opp_xor: xor,
        },
    )];

    run(&inputs, PathOp::Union).map_err(|e| {
        log::warn!("simplify failed: {}", e);
        e
    })
}

fn run(inputs: &[(&Path, EdgeFlags)], op: PathOp) -> Result<Option<Path>> {
    let mut state = GlobalState::new();
    state.set_phase(Phase::Intersecting);
    for (path, flags) in inputs {
        EdgeBuilder::new(&mut state, *flags).build(path)?;
    }

    if state.head.is_empty() {
        return Ok(None);
    }

    intersect_all(&mut state)?;

    state.set_phase(Phase::Walking);
    resolve_coincidences(&mut state)?;
    winding::compute_windings(&mut state)?;
    if state.winding_failed() {
        return Err(PathOpsError::WindingFailed);
    }

    let mut writer = PathWriter::new();
    walk::walk(&mut state, op, &mut writer)?;
    Ok(writer.finish())
}

fn intersect_all(state: &mut GlobalState) -> Result<()> {
    let segments = state.segment_ids();
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            let bounds = state.segment(*a).bounds.outset(ROUGH_EPSILON);
            if !bounds.intersects(&state.segment(*b).bounds) {
                continue;
            }

            add_intersections(state, *a, *b)?;
        }
    }

    Ok(())
}

fn add_intersections(state: &mut GlobalState, a: SegmentId, b: SegmentId) -> Result<()> {
    let found = intersections::intersect(&state.segment(a).curve, &state.segment(b).curve)?;
    let mut points = Vec::with_capacity(found.used());
    for hit in found.iter() {
        let pa = state.add_t(a, hit.t[0])?;
        let pb = state.add_t(b, hit.t[1])?;
        state.add_opp(pa, pb)?;
        points.push((pa, pb, hit.coincident));
    }

    // Coincident runs are reported as pairs of consecutive intersections.
    let mut i = 0;
    while i + 1 < points.len() {
        let (a0, b0, coincident0) = points[i];
        let (a1, b1, coincident1) = points[i + 1];
        if coincident0 && coincident1 {
            state.add_coincidence(a0, a1, b0, b1)?;
            i += 2;
        } else {
            i += 1;
        }
    }

    Ok(())
}

// Runs the cleanup passes until they settle. Returns the number of rounds.
fn cleanup(state: &mut GlobalState) -> Result<usize> {
    for round in 1..=MAX_CLEANUP_PASSES {
        let mut changed = false;
        for segment in state.segment_ids() {
            changed |= state.move_multiples(segment)?;
        }

        for segment in state.segment_ids() {
            changed |= state.move_nearby(segment)?;
        }

        // A new coincident run may line up spans the moves above haven't seen yet.
        for segment in state.segment_ids() {
            changed |= state.missing_coincidence(segment)?;
        }

        if !changed {
            return Ok(round);
        }
    }

    log::debug!("cleanup didn't settle after {} rounds", MAX_CLEANUP_PASSES);
    Ok(MAX_CLEANUP_PASSES)
}

fn resolve_coincidences(state: &mut GlobalState) -> Result<()> {
    cleanup(state)?;
    state.validate()?;

    if state.coincidence.is_empty() {
        return Ok(());
    }

    state.add_expanded()?;
    let pairs = state.mark_coincidences()?;
    log::debug!(
        "{} coincident runs, {} span pairs",
        state.coincidence.len(),
        pairs.len()
    );
    state.apply_coincidences(&pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Curve64, Line64, Point64};

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve64 {
        Curve64::Line(Line64::new(Point64::from_xy(x0, y0), Point64::from_xy(x1, y1)))
    }

    #[test]
    fn missed_coincidence_triggers_another_round() {
        let mut state = GlobalState::new();
        let first = state.new_contour(false, false, false);
        let a = state.add_curve(first, line(0.0, 0.0, 4.0, 0.0));
        let second = state.new_contour(true, false, false);
        let b = state.add_curve(second, line(4.0, 0.0, 0.0, 0.0));

        // The end points are linked, the overlap itself was never reported.
        let (a_head, a_tail) = (state.segment(a).head, state.segment(a).tail);
        let (b_head, b_tail) = (state.segment(b).head, state.segment(b).tail);
        let (a0, a1) = (state.span(a_head).ptt, state.span(a_tail).ptt);
        let (b0, b1) = (state.span(b_head).ptt, state.span(b_tail).ptt);
        state.add_opp(a0, b1).unwrap();
        state.add_opp(a1, b0).unwrap();
        assert!(state.coincidence.is_empty());

        assert_eq!(cleanup(&mut state).unwrap(), 2);
        assert_eq!(state.coincidence.len(), 1);
        assert!(state.coincidence_covers(a, 0.0, 1.0, b));

        // Settled now.
        assert_eq!(cleanup(&mut state).unwrap(), 1);
    }
}
