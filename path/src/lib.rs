// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Path types shared by [tiny-pathops](https://docs.rs/tiny-pathops) inputs and outputs.
//!
//! Holds the immutable [`Path`], its [`PathBuilder`], [`Rect`] bounds, [`Point`]
//! and the ULPs based float comparisons the boolean engine relies on.
//!
//! Conic segments are stored with their weights and never converted to quads.
//! All coordinates are `f32`.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::too_many_arguments)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod floating_point;
mod path;
mod path_builder;
mod rect;
mod scalar;

pub use floating_point::*;
pub use path::*;
pub use path_builder::*;
pub use rect::*;
pub use scalar::*;

/// A point or a vector.
///
/// Doesn't guarantee to be finite.
#[allow(missing_docs)]
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new `Point`.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Creates a point at 0x0 position.
    pub fn zero() -> Self {
        Point::default()
    }

    /// Checks that neither coordinate is an infinity or NaN.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Checks that both coordinates are within 16 ULPs.
    pub fn almost_equal(&self, other: Point) -> bool {
        self.x.almost_equal_ulps(other.x) && self.y.almost_equal_ulps(other.y)
    }

    /// Returns the vector length.
    ///
    /// Computed in `f64`, so large coordinates don't overflow.
    pub fn length(&self) -> f32 {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        (x * x + y * y).sqrt() as f32
    }

    /// Returns the Euclidean distance between two points.
    pub fn distance(&self, other: Point) -> f32 {
        (*self - other).length()
    }

    /// Returns the dot product of two vectors.
    pub fn dot(&self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the z component of the cross product of two vectors.
    ///
    /// Positive when `other` turns clockwise from `self` in a y-down space.
    pub fn cross(&self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl core::ops::Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Point::from_xy(-self.x, -self.y)
    }
}

impl core::ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Self::Output {
        Point::from_xy(self.x + other.x, self.y + other.y)
    }
}

impl core::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Self::Output {
        Point::from_xy(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_math() {
        let a = Point::from_xy(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.distance(Point::zero()), 5.0);
        assert_eq!(a.dot(Point::from_xy(1.0, 0.0)), 3.0);
        assert_eq!(a.cross(Point::from_xy(1.0, 0.0)), -4.0);
        assert_eq!(-a, Point::from_xy(-3.0, -4.0));
        assert!(!Point::from_xy(f32::NAN, 1.0).is_finite());
        assert!((Point::from_xy(3e20, 4e20).length() / 5e20 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn almost_equal() {
        let a = Point::from_xy(100.0, 100.0);
        let b = Point::from_xy(100.00001, 100.0);
        assert!(a.almost_equal(b));
        assert!(!a.almost_equal(Point::from_xy(100.1, 100.0)));
    }
}
