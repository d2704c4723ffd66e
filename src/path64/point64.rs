// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_pathops_path::Point;

use super::Scalar64;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum SearchAxis {
    X,
    Y,
}

/// A double precision point or vector (SkDPoint and SkDVector).
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Point64 {
    pub x: f64,
    pub y: f64,
}

impl Point64 {
    pub fn from_xy(x: f64, y: f64) -> Self {
        Point64 { x, y }
    }

    pub fn from_point(p: Point) -> Self {
        Point64 {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }

    pub fn zero() -> Self {
        Point64 { x: 0.0, y: 0.0 }
    }

    pub fn to_point(&self) -> Point {
        Point::from_xy(self.x as f32, self.y as f32)
    }

    pub fn axis_coord(&self, axis: SearchAxis) -> f64 {
        match axis {
            SearchAxis::X => self.x,
            SearchAxis::Y => self.y,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn cross(&self, other: Point64) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: Point64) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(&self, other: Point64) -> f64 {
        (*self - other).length_squared()
    }

    pub fn distance(&self, other: Point64) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn mid(&self, other: Point64) -> Point64 {
        Point64::from_xy((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn approximately_zero(&self) -> bool {
        self.x.approximately_zero() && self.y.approximately_zero()
    }

    // The largest magnitude of both points, used to scale the ULPs comparison.
    fn largest(&self, other: Point64) -> f64 {
        let tiniest = self.x.min(self.y).min(other.x).min(other.y);
        let largest = self.x.max(self.y).max(other.x).max(other.y);
        largest.max(-tiniest)
    }

    /// Checks that points are equal within `f32` precision.
    ///
    /// Small coordinates are compared against `f32::EPSILON`, larger ones
    /// by checking that the distance is within 16 ULPs of the largest coordinate.
    pub fn approximately_equal(&self, other: Point64) -> bool {
        if self.x.approximately_equal(other.x) && self.y.approximately_equal(other.y) {
            return true;
        }

        if !self.x.roughly_equal_ulps(other.x) || !self.y.roughly_equal_ulps(other.y) {
            return false;
        }

        let dist = self.distance(other);
        let largest = self.largest(other);
        largest.almost_dequal_ulps(largest + dist)
    }

    /// Like `approximately_equal`, but with a 256 ULPs tolerance.
    pub fn roughly_equal(&self, other: Point64) -> bool {
        if self.x.roughly_equal(other.x) && self.y.roughly_equal(other.y) {
            return true;
        }

        if !self.x.roughly_equal_ulps(other.x) || !self.y.roughly_equal_ulps(other.y) {
            return false;
        }

        let dist = self.distance(other);
        let largest = self.largest(other);
        largest.roughly_equal_ulps(largest + dist)
    }

    /// Checks that points are equal after being rounded to `f32`.
    pub fn approximately_dequal(&self, other: Point64) -> bool {
        self.x.almost_dequal_ulps(other.x) && self.y.almost_dequal_ulps(other.y)
    }
}

impl core::ops::Neg for Point64 {
    type Output = Point64;

    fn neg(self) -> Self::Output {
        Point64::from_xy(-self.x, -self.y)
    }
}

impl core::ops::Add for Point64 {
    type Output = Point64;

    fn add(self, other: Point64) -> Self::Output {
        Point64::from_xy(self.x + other.x, self.y + other.y)
    }
}

impl core::ops::AddAssign for Point64 {
    fn add_assign(&mut self, other: Point64) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::Sub for Point64 {
    type Output = Point64;

    fn sub(self, other: Point64) -> Self::Output {
        Point64::from_xy(self.x - other.x, self.y - other.y)
    }
}

impl core::ops::SubAssign for Point64 {
    fn sub_assign(&mut self, other: Point64) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl core::ops::Mul<f64> for Point64 {
    type Output = Point64;

    fn mul(self, scale: f64) -> Self::Output {
        Point64::from_xy(self.x * scale, self.y * scale)
    }
}

impl core::ops::Div<f64> for Point64 {
    type Output = Point64;

    fn div(self, scale: f64) -> Self::Output {
        Point64::from_xy(self.x / scale, self.y / scale)
    }
}
