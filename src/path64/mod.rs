// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Double precision curves used by path operations.
//!
//! Mainly for internal use. Do not rely on it!

use tiny_pathops_path::{Scalar, SCALAR_MAX};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use tiny_pathops_path::NoStdFloat;

pub mod axis_intersections;
pub mod conic64;
pub mod cubic64;
pub mod curve64;
pub mod line64;
pub mod point64;
pub mod quad64;
pub mod rect64;
pub mod reduce_order;

pub use conic64::Conic64;
pub use cubic64::Cubic64;
pub use curve64::Curve64;
pub use line64::Line64;
pub use point64::{Point64, SearchAxis};
pub use quad64::Quad64;
pub use rect64::Rect64;

// The code below is from SkPathOpsTypes.

pub const FLT_EPSILON: f64 = f32::EPSILON as f64;
pub const FLT_EPSILON_HALF: f64 = FLT_EPSILON / 2.0;
pub const FLT_EPSILON_DOUBLE: f64 = FLT_EPSILON * 2.0;
pub const FLT_EPSILON_CUBED: f64 = FLT_EPSILON * FLT_EPSILON * FLT_EPSILON;
pub const FLT_EPSILON_INVERSE: f64 = 1.0 / FLT_EPSILON;
pub const DBL_EPSILON_ERR: f64 = f64::EPSILON * 4.0;
pub const ROUGH_EPSILON: f64 = FLT_EPSILON * 64.0;
pub const MORE_ROUGH_EPSILON: f64 = FLT_EPSILON * 256.0;

/// Tolerance predicates.
///
/// Names follow a simple scheme: `precisely_*` compares against a few `f64` epsilons,
/// `approximately_*` against `f32::EPSILON`, `roughly_*` against 64 `f32` epsilons.
/// The `*_ulps` family compares the values as `f32`.
#[allow(missing_docs)]
pub trait Scalar64 {
    fn bound(self, min: Self, max: Self) -> Self;
    fn between(self, a: f64, b: f64) -> bool;
    fn precisely_zero(self) -> bool;
    fn precisely_equal(self, other: Self) -> bool;
    fn precisely_less_than_zero(self) -> bool;
    fn precisely_greater_than_one(self) -> bool;
    fn approximately_zero(self) -> bool;
    fn approximately_zero_half(self) -> bool;
    fn approximately_zero_cubed(self) -> bool;
    fn approximately_zero_inverse(self) -> bool;
    fn approximately_zero_when_compared_to(self, other: Self) -> bool;
    fn approximately_equal(self, other: Self) -> bool;
    fn approximately_equal_half(self, other: Self) -> bool;
    fn approximately_negative(self) -> bool;
    fn approximately_zero_or_more(self) -> bool;
    fn approximately_zero_or_more_double(self) -> bool;
    fn approximately_one_or_less(self) -> bool;
    fn approximately_one_or_less_double(self) -> bool;
    fn roughly_zero(self) -> bool;
    fn roughly_equal(self, other: Self) -> bool;
    fn more_roughly_equal(self, other: Self) -> bool;
    fn zero_or_one(self) -> bool;
    fn almost_equal_ulps(self, other: Self) -> bool;
    fn almost_equal_ulps_pin(self, other: Self) -> bool;
    fn almost_dequal_ulps(self, other: Self) -> bool;
    fn roughly_equal_ulps(self, other: Self) -> bool;
    fn not_almost_equal_ulps(self, other: Self) -> bool;
    fn not_almost_equal_ulps_pin(self, other: Self) -> bool;
    fn almost_between_ulps(self, b: Self, c: Self) -> bool;
}

impl Scalar64 for f64 {
    // Works just like SkTPin, returning `max` for NaN/inf
    fn bound(self, min: Self, max: Self) -> Self {
        max.min(self).max(min)
    }

    /// Returns true if (a <= self <= b) || (a >= self >= b).
    fn between(self, a: f64, b: f64) -> bool {
        between(a, self, b)
    }

    fn precisely_zero(self) -> bool {
        self.abs() < DBL_EPSILON_ERR
    }

    fn precisely_equal(self, other: Self) -> bool {
        (self - other).precisely_zero()
    }

    fn precisely_less_than_zero(self) -> bool {
        self < DBL_EPSILON_ERR
    }

    fn precisely_greater_than_one(self) -> bool {
        self > 1.0 - DBL_EPSILON_ERR
    }

    fn approximately_zero(self) -> bool {
        self.abs() < FLT_EPSILON
    }

    fn approximately_zero_half(self) -> bool {
        self.abs() < FLT_EPSILON_HALF
    }

    fn approximately_zero_cubed(self) -> bool {
        self.abs() < FLT_EPSILON_CUBED
    }

    fn approximately_zero_inverse(self) -> bool {
        self.abs() > FLT_EPSILON_INVERSE
    }

    fn approximately_zero_when_compared_to(self, other: Self) -> bool {
        self == 0.0 || self.abs() < (other * FLT_EPSILON).abs()
    }

    // Use this for comparing Ts in the range of 0 to 1. For general numbers (larger and smaller) use
    // AlmostEqualUlps instead.
    fn approximately_equal(self, other: Self) -> bool {
        (self - other).approximately_zero()
    }

    fn approximately_equal_half(self, other: Self) -> bool {
        (self - other).approximately_zero_half()
    }

    fn approximately_negative(self) -> bool {
        self < FLT_EPSILON
    }

    fn approximately_zero_or_more(self) -> bool {
        self > -FLT_EPSILON
    }

    fn approximately_zero_or_more_double(self) -> bool {
        self > -FLT_EPSILON_DOUBLE
    }

    fn approximately_one_or_less(self) -> bool {
        self < 1.0 + FLT_EPSILON
    }

    fn approximately_one_or_less_double(self) -> bool {
        self < 1.0 + FLT_EPSILON_DOUBLE
    }

    fn roughly_zero(self) -> bool {
        self.abs() < ROUGH_EPSILON
    }

    fn roughly_equal(self, other: Self) -> bool {
        (self - other).abs() < ROUGH_EPSILON
    }

    fn more_roughly_equal(self, other: Self) -> bool {
        (self - other).abs() < MORE_ROUGH_EPSILON
    }

    fn zero_or_one(self) -> bool {
        self == 0.0 || self == 1.0
    }

    fn almost_equal_ulps(self, other: Self) -> bool {
        (self as f32).almost_equal_ulps(other as f32)
    }

    fn almost_equal_ulps_pin(self, other: Self) -> bool {
        (self as f32).almost_equal_ulps_pin(other as f32)
    }

    fn almost_dequal_ulps(self, other: Self) -> bool {
        if self.abs() < SCALAR_MAX as f64 && other.abs() < SCALAR_MAX as f64 {
            (self as f32).almost_dequal_ulps(other as f32)
        } else {
            (self - other).abs() / self.abs().max(other.abs()) < FLT_EPSILON * 16.0
        }
    }

    fn roughly_equal_ulps(self, other: Self) -> bool {
        (self as f32).roughly_equal_ulps(other as f32)
    }

    fn not_almost_equal_ulps(self, other: Self) -> bool {
        (self as f32).not_almost_equal_ulps(other as f32)
    }

    fn not_almost_equal_ulps_pin(self, other: Self) -> bool {
        let (a, b) = (self as f32, other as f32);
        if !a.is_finite() || !b.is_finite() {
            return false;
        }

        a.not_almost_equal_ulps(b)
    }

    fn almost_between_ulps(self, b: Self, c: Self) -> bool {
        (self as f32).almost_between_ulps(b as f32, c as f32)
    }
}

/// Returns true if (a <= b <= c) || (a >= b >= c).
pub fn between(a: f64, b: f64, c: f64) -> bool {
    debug_assert!(
        ((a <= b && b <= c) || (a >= b && b >= c)) == ((a - b) * (c - b) <= 0.0)
            || (a.precisely_zero() && b.precisely_zero() && c.precisely_zero())
            || !(a - b).is_finite()
            || !(c - b).is_finite()
    );

    (a - b) * (c - b) <= 0.0
}

pub fn approximately_between(a: f64, b: f64, c: f64) -> bool {
    if a <= c {
        (a - b).approximately_negative() && (b - c).approximately_negative()
    } else {
        (b - a).approximately_negative() && (c - b).approximately_negative()
    }
}

/// Pins `t` to 0 or 1 when it is within a few `f64` epsilons.
pub fn pin_t(t: f64) -> f64 {
    if t.precisely_less_than_zero() {
        0.0
    } else if t.precisely_greater_than_one() {
        1.0
    } else {
        t
    }
}

pub fn cube_root(x: f64) -> f64 {
    if x.approximately_zero_cubed() {
        return 0.0;
    }

    let result = halley_cbrt3d(x.abs());
    if x < 0.0 {
        -result
    } else {
        result
    }
}

// cube root approximation using 3 iterations of Halley's method (double)
fn halley_cbrt3d(d: f64) -> f64 {
    let mut a = cbrt_5d(d);
    a = cbrta_halleyd(a, d);
    a = cbrta_halleyd(a, d);
    cbrta_halleyd(a, d)
}

// cube root approximation using bit hack for 64-bit float
// adapted from Kahan's cbrt
fn cbrt_5d(d: f64) -> f64 {
    let b1 = 715094163;
    let mut t: f64 = 0.0;
    let pt: &mut [u32; 2] = bytemuck::cast_mut(&mut t);
    let px: [u32; 2] = bytemuck::cast(d);
    pt[1] = px[1] / 3 + b1;
    t
}

// iterative cube root approximation using Halley's method (double)
fn cbrta_halleyd(a: f64, r: f64) -> f64 {
    let a3 = a * a * a;
    a * (a3 + r + r) / (a3 + a3 + r)
}

// Skia doesn't seems to care about NaN/inf during sorting, so we don't too.
pub(crate) fn cmp_f64(a: &f64, b: &f64) -> core::cmp::Ordering {
    if a < b {
        core::cmp::Ordering::Less
    } else if a > b {
        core::cmp::Ordering::Greater
    } else {
        core::cmp::Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximately_zero_boundary() {
        assert!(0.0f64.approximately_zero());
        assert!((FLT_EPSILON * 0.999).approximately_zero());
        assert!((-FLT_EPSILON * 0.999).approximately_zero());
        assert!(!FLT_EPSILON.approximately_zero());
        assert!(!(-FLT_EPSILON).approximately_zero());
        assert!(!(FLT_EPSILON * 1.001).approximately_zero());
    }

    #[test]
    fn epsilon_families() {
        assert!((f64::EPSILON * 3.0).precisely_zero());
        assert!(!(f64::EPSILON * 4.0).precisely_zero());
        assert!((FLT_EPSILON * 63.0).roughly_zero());
        assert!(!(FLT_EPSILON * 64.0).roughly_zero());
        assert!(1.0f64.approximately_equal(1.0 + FLT_EPSILON / 2.0));
        assert!(0.5f64.more_roughly_equal(0.5 + FLT_EPSILON * 200.0));
        assert!(1.0f64.zero_or_one() && 0.0f64.zero_or_one() && !0.5f64.zero_or_one());
        assert!(0.0f64.approximately_zero_when_compared_to(5.0));
        assert!(!1.0f64.approximately_zero_when_compared_to(5.0));
    }

    #[test]
    fn between_is_inclusive() {
        assert!(between(0.0, 0.5, 1.0));
        assert!(between(1.0, 0.5, 0.0));
        assert!(between(0.0, 0.0, 1.0));
        assert!(between(0.0, 1.0, 1.0));
        assert!(!between(0.0, 1.5, 1.0));
        assert!(0.5f64.between(0.0, 1.0));
        assert!(approximately_between(0.0, 1.0 + FLT_EPSILON / 2.0, 1.0));
    }

    #[test]
    fn pin() {
        assert_eq!(pin_t(-f64::EPSILON), 0.0);
        assert_eq!(pin_t(1.0 + f64::EPSILON), 1.0);
        assert_eq!(pin_t(0.25), 0.25);
    }

    #[test]
    fn ulps_on_f64() {
        assert!(1.0f64.almost_equal_ulps(1.0 + 1e-7));
        assert!(!1.0f64.almost_equal_ulps(1.0 + 1e-5));
        assert!(1e39f64.almost_dequal_ulps(1e39 * (1.0 + 1e-7)));
        assert!(!1e39f64.almost_dequal_ulps(2e39));
    }

    #[test]
    fn cube_roots() {
        assert!((cube_root(27.0) - 3.0).abs() < 1e-12);
        assert!((cube_root(-8.0) + 2.0).abs() < 1e-12);
        assert_eq!(cube_root(0.0), 0.0);
    }

    proptest::proptest! {
        #[test]
        fn between_is_symmetric(a in -1e3f64..1e3, b in -1e3f64..1e3, c in -1e3f64..1e3) {
            proptest::prop_assert_eq!(between(a, b, c), between(c, b, a));
        }
    }
}
