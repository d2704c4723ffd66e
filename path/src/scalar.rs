// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::floating_point::f32_as_2s_compliment;

/// The largest finite `f32`.
pub const SCALAR_MAX: f32 = 3.402823466e+38;
/// The conic weight of a quarter circle.
pub const SCALAR_ROOT_2_OVER_2: f32 = 0.707106781;

/// Float number extension methods.
///
/// The `*_ulps` methods compare floats by the number of representable values
/// between them. Values that are both close to zero compare by magnitude instead.
///
/// Mainly for internal use. Do not rely on it!
#[allow(missing_docs)]
pub trait Scalar {
    fn half(self) -> Self;
    fn bound(self, min: Self, max: Self) -> Self;
    /// Within 16 ULPs.
    fn almost_equal_ulps(self, other: Self) -> bool;
    /// Like `almost_equal_ulps`, but never equal for non-finite values.
    fn almost_equal_ulps_pin(self, other: Self) -> bool;
    /// Within 16 ULPs, without the near zero exception.
    fn almost_dequal_ulps(self, other: Self) -> bool;
    /// Within 256 ULPs.
    fn roughly_equal_ulps(self, other: Self) -> bool;
    fn not_almost_equal_ulps(self, other: Self) -> bool;
    /// Checks that `b` lies between `self` and `c` with a 2 ULPs slack.
    fn almost_between_ulps(self, b: Self, c: Self) -> bool;
}

impl Scalar for f32 {
    fn half(self) -> f32 {
        self * 0.5
    }

    // Works just like SkTPin, returning `max` for NaN/inf
    fn bound(self, min: Self, max: Self) -> Self {
        max.min(self).max(min)
    }

    fn almost_equal_ulps(self, other: Self) -> bool {
        near_zero(self, other, 16) || ulps_apart(self, other) < 16
    }

    fn almost_equal_ulps_pin(self, other: Self) -> bool {
        self.is_finite() && other.is_finite() && self.almost_equal_ulps(other)
    }

    fn almost_dequal_ulps(self, other: Self) -> bool {
        ulps_apart(self, other) < 16
    }

    fn roughly_equal_ulps(self, other: Self) -> bool {
        near_zero(self, other, 1024) || ulps_apart(self, other) < 256
    }

    fn not_almost_equal_ulps(self, other: Self) -> bool {
        !near_zero(self, other, 16) && ulps_apart(self, other) >= 16
    }

    fn almost_between_ulps(self, b: Self, c: Self) -> bool {
        let (lo, hi) = if self <= c { (self, c) } else { (c, self) };
        not_above_ulps(lo, b, 2) && not_above_ulps(b, hi, 2)
    }
}

// Computed in i64, so inf and nan bit patterns can't overflow.
fn ulps_apart(a: f32, b: f32) -> i64 {
    let a = i64::from(f32_as_2s_compliment(a));
    let b = i64::from(f32_as_2s_compliment(b));
    (a - b).abs()
}

fn near_zero(a: f32, b: f32, epsilon: i32) -> bool {
    let limit = f32::EPSILON * epsilon as f32 / 2.0;
    a.abs() <= limit && b.abs() <= limit
}

// `a <= b` allowing `epsilon` ULPs.
fn not_above_ulps(a: f32, b: f32, epsilon: i32) -> bool {
    if near_zero(a, b, epsilon) {
        return a < b + f32::EPSILON * epsilon as f32;
    }

    let a = i64::from(f32_as_2s_compliment(a));
    let b = i64::from(f32_as_2s_compliment(b));
    a < b + i64::from(epsilon)
}

#[allow(missing_docs)]
#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
pub trait NoStdFloat {
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn cos(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
impl NoStdFloat for f32 {
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    fn cos(self) -> Self {
        libm::cosf(self)
    }
    fn acos(self) -> Self {
        libm::acosf(self)
    }
    fn atan2(self, other: Self) -> Self {
        libm::atan2f(self, other)
    }
}

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
impl NoStdFloat for f64 {
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn cos(self) -> Self {
        libm::cos(self)
    }
    fn acos(self) -> Self {
        libm::acos(self)
    }
    fn atan2(self, other: Self) -> Self {
        libm::atan2(self, other)
    }
}
