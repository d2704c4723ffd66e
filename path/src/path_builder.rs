// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::path::PathVerb;
use crate::scalar::{Scalar, SCALAR_ROOT_2_OVER_2};
use crate::{Path, Point, Rect};

/// Where the next segment starts.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) enum ContourState {
    /// Nothing was added yet. A segment starts a contour at 0x0.
    Empty,
    /// A contour that started at the point is open.
    Open(Point),
    /// The last contour was closed. A segment starts a new one at the same point.
    Closed(Point),
}

/// A path builder.
///
/// Segments added without a preceding [`move_to`](PathBuilder::move_to) continue from
/// the start of the previous contour, or from 0x0 for an empty builder.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) conic_weights: Vec<f32>,
    pub(crate) state: ContourState,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates a new builder with a specified capacity.
    ///
    /// A move and a line take one point, quads and conics take two, cubics three
    /// and a close takes none.
    pub fn with_capacity(verbs_capacity: usize, points_capacity: usize) -> Self {
        PathBuilder {
            verbs: Vec::with_capacity(verbs_capacity),
            points: Vec::with_capacity(points_capacity),
            conic_weights: Vec::new(),
            state: ContourState::Empty,
        }
    }

    /// Creates a closed clockwise `Path` from `Rect`.
    ///
    /// Starts at the top-left corner.
    pub fn from_rect(rect: Rect) -> Path {
        let mut pb = PathBuilder::with_capacity(5, 4);
        pb.push_rect_contour(rect);
        Path {
            bounds: rect,
            verbs: pb.verbs,
            points: pb.points,
            conic_weights: pb.conic_weights,
        }
    }

    /// Creates a new `Path` from a circle.
    ///
    /// See [`PathBuilder::push_circle`] for details.
    pub fn from_circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
        let mut pb = PathBuilder::with_capacity(6, 9);
        pb.push_circle(cx, cy, radius);
        pb.finish()
    }

    /// Creates a new `Path` from an oval.
    ///
    /// See [`PathBuilder::push_oval`] for details.
    pub fn from_oval(oval: Rect) -> Option<Path> {
        let mut pb = PathBuilder::with_capacity(6, 9);
        pb.push_oval(oval);
        pb.finish()
    }

    /// Returns the current number of segments in the builder.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if the builder has any segments added.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Starts a new contour.
    ///
    /// Consecutive moves collapse into the last one.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let p = Point::from_xy(x, y);
        match (self.verbs.last(), self.points.last_mut()) {
            (Some(PathVerb::Move), Some(last)) => *last = p,
            _ => {
                self.verbs.push(PathVerb::Move);
                self.points.push(p);
            }
        }

        self.state = ContourState::Open(p);
    }

    fn ensure_contour(&mut self) {
        match self.state {
            ContourState::Open(_) => {}
            ContourState::Empty => self.move_to(0.0, 0.0),
            ContourState::Closed(p) => self.move_to(p.x, p.y),
        }
    }

    fn push_segment(&mut self, verb: PathVerb, points: &[Point]) {
        debug_assert_eq!(verb.points_count(), points.len());
        self.ensure_contour();
        self.verbs.push(verb);
        self.points.extend_from_slice(points);
    }

    /// Adds a line from the last point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.push_segment(PathVerb::Line, &[Point::from_xy(x, y)]);
    }

    /// Adds a quad curve from the last point to `x`, `y`.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push_segment(
            PathVerb::Quad,
            &[Point::from_xy(x1, y1), Point::from_xy(x, y)],
        );
    }

    /// Adds a conic curve from the last point to `x`, `y`.
    ///
    /// Weights that don't describe a proper conic are normalized:
    ///
    /// - A non-positive or NaN `weight` produces a line to `x`, `y`.
    /// - An infinite `weight` produces two lines through the control point.
    /// - A `weight` of 1 produces a quad.
    pub fn conic_to(&mut self, x1: f32, y1: f32, x: f32, y: f32, weight: f32) {
        if weight.is_nan() || weight <= 0.0 {
            self.line_to(x, y);
        } else if weight.is_infinite() {
            self.line_to(x1, y1);
            self.line_to(x, y);
        } else if weight == 1.0 {
            self.quad_to(x1, y1, x, y);
        } else {
            self.push_segment(
                PathVerb::Conic,
                &[Point::from_xy(x1, y1), Point::from_xy(x, y)],
            );
            self.conic_weights.push(weight);
        }
    }

    /// Adds a cubic curve from the last point to `x`, `y`.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push_segment(
            PathVerb::Cubic,
            &[
                Point::from_xy(x1, y1),
                Point::from_xy(x2, y2),
                Point::from_xy(x, y),
            ],
        );
    }

    /// Closes the current contour.
    ///
    /// Does nothing for an empty builder and for an already closed contour.
    pub fn close(&mut self) {
        if let ContourState::Open(start) = self.state {
            if self.verbs.last() != Some(&PathVerb::Close) {
                self.verbs.push(PathVerb::Close);
            }

            self.state = ContourState::Closed(start);
        }
    }

    /// Returns the last point if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    fn push_rect_contour(&mut self, rect: Rect) {
        self.move_to(rect.left(), rect.top());
        self.line_to(rect.right(), rect.top());
        self.line_to(rect.right(), rect.bottom());
        self.line_to(rect.left(), rect.bottom());
        self.close();
    }

    /// Adds a closed clockwise rectangle contour.
    ///
    /// Does nothing when any value is not finite or really large.
    pub fn push_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.push_rect_contour(rect);
        }
    }

    /// Adds an oval contour bounded by the provided rectangle.
    ///
    /// The contour is made of four quarter conics, starts at the right-most point,
    /// is closed and has a clock-wise direction.
    pub fn push_oval(&mut self, oval: Rect) {
        let cx = oval.left().half() + oval.right().half();
        let cy = oval.top().half() + oval.bottom().half();

        // Pairs of a bounding box corner and the quarter end point.
        let quarters = [
            ((oval.right(), oval.bottom()), (cx, oval.bottom())),
            ((oval.left(), oval.bottom()), (oval.left(), cy)),
            ((oval.left(), oval.top()), (cx, oval.top())),
            ((oval.right(), oval.top()), (oval.right(), cy)),
        ];

        self.move_to(oval.right(), cy);
        for ((x1, y1), (x, y)) in quarters.iter().copied() {
            self.conic_to(x1, y1, x, y, SCALAR_ROOT_2_OVER_2);
        }

        self.close();
    }

    /// Adds a circle contour.
    ///
    /// The contour is closed and has a clock-wise direction.
    ///
    /// Does nothing when `r` is not positive or when the bounds are not finite.
    pub fn push_circle(&mut self, x: f32, y: f32, r: f32) {
        if !(r > 0.0) {
            return;
        }

        if let Some(oval) = Rect::from_ltrb(x - r, y - r, x + r, y + r) {
            self.push_oval(oval);
        }
    }

    /// Appends all contours of a path.
    ///
    /// The last contour of `path` stays open for further segments, unless it was closed.
    pub fn push_path(&mut self, path: &Path) {
        let mut start = None;
        let mut closed = false;
        for segment in path.segments() {
            match segment {
                crate::PathSegment::MoveTo(p) => {
                    start = Some(p);
                    closed = false;
                }
                crate::PathSegment::Close => closed = true,
                _ => {}
            }
        }

        let start = match start {
            Some(p) => p,
            None => return,
        };

        self.verbs.extend_from_slice(&path.verbs);
        self.points.extend_from_slice(&path.points);
        self.conic_weights.extend_from_slice(&path.conic_weights);
        self.state = if closed {
            ContourState::Closed(start)
        } else {
            ContourState::Open(start)
        };
    }

    /// Reset the builder.
    ///
    /// Memory is not deallocated.
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.conic_weights.clear();
        self.state = ContourState::Empty;
    }

    /// Finishes the builder and returns a `Path`.
    ///
    /// Returns `None` for a lone move, an empty builder and non-finite points.
    pub fn finish(self) -> Option<Path> {
        if self.verbs.len() < 2 {
            return None;
        }

        let bounds = Rect::from_points(&self.points)?;
        Some(Path {
            bounds,
            verbs: self.verbs,
            points: self.points,
            conic_weights: self.conic_weights,
        })
    }
}
