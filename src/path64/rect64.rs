// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::approximately_between;
use super::point64::Point64;

/// Double precision bounds (SkDRect).
///
/// Unlike `Rect`, has no validity guarantees.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect64 {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect64 {
    pub fn from_point(pt: Point64) -> Self {
        Rect64 {
            left: pt.x,
            top: pt.y,
            right: pt.x,
            bottom: pt.y,
        }
    }

    pub fn from_points(points: &[Point64]) -> Self {
        let mut rect = Rect64::from_point(points.first().copied().unwrap_or_default());
        for pt in points.iter().skip(1) {
            rect.add(*pt);
        }

        rect
    }

    pub fn add(&mut self, pt: Point64) {
        self.left = self.left.min(pt.x);
        self.top = self.top.min(pt.y);
        self.right = self.right.max(pt.x);
        self.bottom = self.bottom.max(pt.y);
    }

    pub fn union(&mut self, other: &Rect64) {
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, pt: Point64) -> bool {
        approximately_between(self.left, pt.x, self.right)
            && approximately_between(self.top, pt.y, self.bottom)
    }

    pub fn intersects(&self, other: &Rect64) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Returns the rect grown by `amount` on each side.
    pub fn outset(&self, amount: f64) -> Rect64 {
        Rect64 {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }

    /// Returns the largest absolute coordinate.
    pub fn magnitude(&self) -> f64 {
        self.left
            .abs()
            .max(self.top.abs())
            .max(self.right.abs())
            .max(self.bottom.abs())
    }

    pub fn is_tiny(&self, tolerance: f64) -> bool {
        self.width() <= tolerance && self.height() <= tolerance
    }
}
