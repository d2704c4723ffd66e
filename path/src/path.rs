// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::path_builder::{ContourState, PathBuilder};
use crate::{Point, Rect};

/// A path verb.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum PathVerb {
    Move,
    Line,
    Quad,
    Conic,
    Cubic,
    Close,
}

impl PathVerb {
    /// Returns the number of points a verb consumes.
    pub fn points_count(self) -> usize {
        match self {
            PathVerb::Move => 1,
            PathVerb::Line => 1,
            PathVerb::Quad => 2,
            PathVerb::Conic => 2,
            PathVerb::Cubic => 3,
            PathVerb::Close => 0,
        }
    }
}

/// An immutable Bezier path, the input and output of every boolean operation.
///
/// Built by [`PathBuilder`]. [`Path::clear`] turns a path back into a builder
/// that keeps the allocations.
///
/// Verbs, points and conic weights live in three flat lists. [`Path::segments`]
/// walks them together.
///
/// A finished path always has:
///
/// - finite points with cached bounds
/// - at least two verbs
/// - a `Move` at the start of every contour
/// - no repeated `Move` or `Close` verbs
///
/// Contours made of a single point are allowed.
#[derive(Clone, PartialEq)]
pub struct Path {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) conic_weights: Vec<f32>,
    pub(crate) bounds: Rect,
}

impl Path {
    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if path is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached bounds of all points, control points included.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the verbs.
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    /// Returns all points, in verb order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns one weight per `Conic` verb.
    pub fn conic_weights(&self) -> &[f32] {
        &self.conic_weights
    }

    /// Returns the number of contours.
    pub fn contours_count(&self) -> usize {
        self.verbs.iter().filter(|v| **v == PathVerb::Move).count()
    }

    /// Iterates segments with their points and conic weights resolved.
    pub fn segments(&self) -> PathSegmentsIter {
        PathSegmentsIter {
            path: self,
            verb_index: 0,
            points_index: 0,
            weights_index: 0,
        }
    }

    /// Turns the path into an empty builder, keeping the allocations.
    pub fn clear(mut self) -> PathBuilder {
        self.verbs.clear();
        self.points.clear();
        self.conic_weights.clear();

        PathBuilder {
            verbs: self.verbs,
            points: self.points,
            conic_weights: self.conic_weights,
            state: ContourState::Empty,
        }
    }
}

impl core::fmt::Debug for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        fn push_points(s: &mut alloc::string::String, points: &[Point]) -> core::fmt::Result {
            points.iter().try_for_each(|p| write!(s, " {} {}", p.x, p.y))
        }

        let mut s = alloc::string::String::new();
        for segment in self.segments() {
            if !s.is_empty() {
                s.push(' ');
            }

            match segment {
                PathSegment::MoveTo(p) => {
                    s.push('M');
                    push_points(&mut s, &[p])?;
                }
                PathSegment::LineTo(p) => {
                    s.push('L');
                    push_points(&mut s, &[p])?;
                }
                PathSegment::QuadTo(p1, p2) => {
                    s.push('Q');
                    push_points(&mut s, &[p1, p2])?;
                }
                PathSegment::ConicTo(p1, p2, weight) => {
                    s.push('K');
                    push_points(&mut s, &[p1, p2])?;
                    write!(s, " {}", weight)?;
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    s.push('C');
                    push_points(&mut s, &[p1, p2, p3])?;
                }
                PathSegment::Close => s.push('Z'),
            }
        }

        f.debug_struct("Path")
            .field("segments", &s)
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// A path segment.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    /// A conic: control point, end point and weight.
    ConicTo(Point, Point, f32),
    CubicTo(Point, Point, Point),
    Close,
}

/// An iterator over [`PathSegment`]s.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathSegmentsIter<'a> {
    path: &'a Path,
    verb_index: usize,
    points_index: usize,
    weights_index: usize,
}

impl<'a> PathSegmentsIter<'a> {
    fn take_points(&mut self, count: usize) -> &'a [Point] {
        let path: &'a Path = self.path;
        let points = &path.points[self.points_index..self.points_index + count];
        self.points_index += count;
        points
    }
}

impl<'a> Iterator for PathSegmentsIter<'a> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let verb = *self.path.verbs.get(self.verb_index)?;
        self.verb_index += 1;

        let p = self.take_points(verb.points_count());
        let segment = match verb {
            PathVerb::Move => PathSegment::MoveTo(p[0]),
            PathVerb::Line => PathSegment::LineTo(p[0]),
            PathVerb::Quad => PathSegment::QuadTo(p[0], p[1]),
            PathVerb::Conic => {
                let weight = self.path.conic_weights[self.weights_index];
                self.weights_index += 1;
                PathSegment::ConicTo(p[0], p[1], weight)
            }
            PathVerb::Cubic => PathSegment::CubicTo(p[0], p[1], p[2]),
            PathVerb::Close => PathSegment::Close,
        };

        Some(segment)
    }
}
