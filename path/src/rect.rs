// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{FiniteF32, Point};

/// An axis-aligned rectangle with finite edges.
///
/// Zero width or height is allowed. Edges are never reversed and the
/// width and height always fit into `f32`.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq)]
pub struct Rect {
    left: FiniteF32,
    top: FiniteF32,
    right: FiniteF32,
    bottom: FiniteF32,
}

impl core::fmt::Debug for Rect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rect")
            .field("left", &self.left.get())
            .field("top", &self.top.get())
            .field("right", &self.right.get())
            .field("bottom", &self.bottom.get())
            .finish()
    }
}

impl Rect {
    /// Creates a rect from its edges.
    ///
    /// Returns `None` for non-finite or reversed edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Option<Self> {
        if !(left <= right && top <= bottom) {
            return None;
        }

        // The width and height have to be representable too.
        if !fits_f32(right, left) || !fits_f32(bottom, top) {
            return None;
        }

        Some(Rect {
            left: FiniteF32::new(left)?,
            top: FiniteF32::new(top)?,
            right: FiniteF32::new(right)?,
            bottom: FiniteF32::new(bottom)?,
        })
    }

    /// Creates a rect from its top-left corner and size.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Option<Self> {
        Rect::from_ltrb(x, y, x + w, y + h)
    }

    /// Returns the left edge.
    pub fn left(&self) -> f32 {
        self.left.get()
    }

    /// Returns the top edge.
    pub fn top(&self) -> f32 {
        self.top.get()
    }

    /// Returns the right edge.
    pub fn right(&self) -> f32 {
        self.right.get()
    }

    /// Returns the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.bottom.get()
    }

    /// Returns the horizontal extent.
    pub fn width(&self) -> f32 {
        self.right.get() - self.left.get()
    }

    /// Returns the vertical extent.
    pub fn height(&self) -> f32 {
        self.bottom.get() - self.top.get()
    }

    /// Checks that the rect has no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Checks that two rectangles overlap or touch.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// Returns the bounds of `points`.
    ///
    /// Returns `None` for an empty slice and for non-finite points.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().try_fold((first, first), |(min, max), p| {
            if p.is_finite() {
                Some((
                    Point::from_xy(min.x.min(p.x), min.y.min(p.y)),
                    Point::from_xy(max.x.max(p.x), max.y.max(p.y)),
                ))
            } else {
                None
            }
        })?;

        Rect::from_ltrb(min.x, min.y, max.x, max.y)
    }
}

// `hi - lo` computed in f64 must stay inside the f32 range.
fn fits_f32(hi: f32, lo: f32) -> bool {
    let n = f64::from(hi) - f64::from(lo);
    n.is_finite() && n < f64::from(f32::MAX)
}
