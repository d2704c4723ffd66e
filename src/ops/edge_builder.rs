// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use tiny_pathops_path::{Path, PathSegment, Point};

use super::global_state::{ContourId, GlobalState};
use crate::error::{PathOpsError, Result};
use crate::path64::{reduce_order, Conic64, Cubic64, Curve64, Line64, Point64, Quad64};

/// Flags shared by all contours of one input path.
#[derive(Copy, Clone, Debug)]
pub struct EdgeFlags {
    pub operand: bool,
    pub xor: bool,
    pub opp_xor: bool,
}

/// Converts a path into closed contours of reduced curves (SkOpEdgeBuilder).
pub struct EdgeBuilder<'a> {
    state: &'a mut GlobalState,
    flags: EdgeFlags,
    contour: Option<ContourId>,
    curves: Vec<Curve64>,
    start: Point64,
    last: Point64,
}

impl<'a> EdgeBuilder<'a> {
    pub fn new(state: &'a mut GlobalState, flags: EdgeFlags) -> Self {
        EdgeBuilder {
            state,
            flags,
            contour: None,
            curves: Vec::new(),
            start: Point64::zero(),
            last: Point64::zero(),
        }
    }

    /// Adds all contours of the path.
    ///
    /// Open contours are closed with a line.
    pub fn build(mut self, path: &Path) -> Result<()> {
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    self.finish_contour()?;
                    let p = to_point64(&[p])?[0];
                    self.contour = Some(self.state.new_contour(
                        self.flags.operand,
                        self.flags.xor,
                        self.flags.opp_xor,
                    ));
                    self.start = p;
                    self.last = p;
                }
                PathSegment::LineTo(p) => {
                    let [p] = to_point64(&[p])?;
                    self.push_curve(Curve64::Line(Line64::new(self.last, p)));
                }
                PathSegment::QuadTo(p1, p2) => {
                    let [p1, p2] = to_point64(&[p1, p2])?;
                    self.push_curve(Curve64::Quad(Quad64::new([self.last, p1, p2])));
                }
                PathSegment::ConicTo(p1, p2, weight) => {
                    let [p1, p2] = to_point64(&[p1, p2])?;
                    if !weight.is_finite() {
                        return Err(PathOpsError::InvalidInput);
                    }

                    let conic = Conic64::new([self.last, p1, p2], f64::from(weight));
                    self.push_curve(Curve64::Conic(conic));
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    let [p1, p2, p3] = to_point64(&[p1, p2, p3])?;
                    self.push_curve(Curve64::Cubic(Cubic64::new([self.last, p1, p2, p3])));
                }
                PathSegment::Close => {
                    self.finish_contour()?;
                }
            }
        }

        self.finish_contour()
    }

    fn push_curve(&mut self, curve: Curve64) {
        let reduced = match reduce_order::reduce(&curve) {
            Some(reduced) => reduced,
            None => {
                log::trace!("dropped degenerate {:?}", curve.verb());
                return;
            }
        };

        if let Curve64::Cubic(cubic) = reduced {
            if let Some((s, t)) = cubic.self_intersection() {
                // A looping cubic is split, so no segment crosses itself.
                let mid_t = (s + t) / 2.0;
                let mid = reduced.point_at_t(mid_t);
                self.curves
                    .push(reduced.sub_divide(0.0, mid_t).with_ends(reduced.start(), mid));
                self.curves
                    .push(reduced.sub_divide(mid_t, 1.0).with_ends(mid, reduced.end()));
                self.last = reduced.end();
                return;
            }
        }

        self.curves.push(reduced);
        self.last = reduced.end();
    }

    fn finish_contour(&mut self) -> Result<()> {
        let contour = match self.contour.take() {
            Some(contour) => contour,
            None => return Ok(()),
        };

        if self.last != self.start {
            if self.last.approximately_equal(self.start) {
                if let Some(curve) = self.curves.pop() {
                    self.curves.push(curve.with_ends(curve.start(), self.start));
                }
            } else {
                self.push_curve(Curve64::Line(Line64::new(self.last, self.start)));
            }
        }

        let curves = core::mem::take(&mut self.curves);
        if curves.is_empty() {
            self.state.head.remove(&mut self.state.contours, contour);
            return Ok(());
        }

        for curve in curves {
            self.state.add_curve(contour, curve);
        }

        self.state.join_segments(contour)?;
        self.state.compute_ccw(contour);
        self.last = self.start;
        Ok(())
    }
}

fn to_point64<const N: usize>(points: &[Point; N]) -> Result<[Point64; N]> {
    let mut result = [Point64::zero(); N];
    for (p, r) in points.iter().zip(result.iter_mut()) {
        if !p.is_finite() {
            return Err(PathOpsError::InvalidInput);
        }

        *r = Point64::from_point(*p);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_pathops_path::PathBuilder;

    const FLAGS: EdgeFlags = EdgeFlags {
        operand: false,
        xor: false,
        opp_xor: false,
    };

    fn build(path: &Path) -> Result<GlobalState> {
        let mut state = GlobalState::new();
        EdgeBuilder::new(&mut state, FLAGS).build(path)?;
        Ok(state)
    }

    #[test]
    fn open_contour_is_closed() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.line_to(10.0, 10.0);
        let state = build(&pb.finish().unwrap()).unwrap();

        let contours: Vec<_> = state.head.iter(&state.contours).collect();
        assert_eq!(contours.len(), 1);
        let segments = &state.contour(contours[0]).segments;
        assert_eq!(segments.len(), 3);
        let closing = state.segment(segments[2]).curve;
        assert_eq!(closing.start(), Point64::from_xy(10.0, 10.0));
        assert_eq!(closing.end(), Point64::from_xy(0.0, 0.0));
        assert!(!state.contour(contours[0]).ccw);
    }

    #[test]
    fn degenerate_curves_are_dropped() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(0.0, 0.0);
        pb.quad_to(5.0, 0.0, 10.0, 0.0);
        pb.line_to(10.0, 10.0);
        pb.close();
        pb.move_to(20.0, 20.0);
        pb.line_to(20.0, 20.0);
        pb.close();
        let state = build(&pb.finish().unwrap()).unwrap();

        let contours: Vec<_> = state.head.iter(&state.contours).collect();
        assert_eq!(contours.len(), 1);
        let segments = &state.contour(contours[0]).segments;
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| state.segment(*s).curve.is_line()));
    }

    #[test]
    fn looping_cubic_is_split() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.cubic_to(30.0, 30.0, -20.0, 30.0, 10.0, 0.0);
        pb.close();
        let state = build(&pb.finish().unwrap()).unwrap();
        let contour = state.head.iter(&state.contours).next().unwrap();
        assert_eq!(state.contour(contour).segments.len(), 3);
    }

    #[test]
    fn non_finite_input() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(1e30, 0.0);
        pb.line_to(1e30, 1e30);
        // Finite points are accepted even when huge.
        assert!(build(&pb.finish().unwrap()).is_ok());

        let mut state = GlobalState::new();
        let mut builder = EdgeBuilder::new(&mut state, FLAGS);
        assert_eq!(to_point64(&[Point::from_xy(f32::NAN, 0.0)]), Err(PathOpsError::InvalidInput));
        builder.push_curve(Curve64::Line(Line64::new(Point64::zero(), Point64::zero())));
        assert!(builder.curves.is_empty());
    }
}
