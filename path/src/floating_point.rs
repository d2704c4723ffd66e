// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

pub use strict_num::FiniteF32;

/// Maps a float to an integer with the same ordering.
///
/// Neighbouring floats map to neighbouring integers, so the difference
/// counts the ULPs between two values. Both zeros map to 0.
pub fn f32_as_2s_compliment(x: f32) -> i32 {
    let bits: i32 = bytemuck::cast(x);
    if bits < 0 {
        -(bits & i32::MAX)
    } else {
        bits
    }
}
