// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use thiserror::Error;

/// A path operation failure.
///
/// Like Skia, the operation gives up instead of producing a wrong result.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum PathOpsError {
    /// An input path contains non-finite coordinates.
    #[error("input path has non-finite coordinates")]
    InvalidInput,

    /// No unambiguous winding could be found for some span.
    #[error("failed to compute winding")]
    WindingFailed,

    /// The internal intersection graph became inconsistent.
    #[error("corrupted intersection graph: {0}")]
    Corrupt(&'static str),

    /// Coincident runs could not be resolved.
    #[error("failed to resolve coincident edges")]
    Coincidence,

    /// Result edges could not be assembled into closed contours.
    #[error("result has an unclosed contour")]
    UnclosedContour,
}

/// A `Result` with [`PathOpsError`].
pub type Result<T> = core::result::Result<T, PathOpsError>;
