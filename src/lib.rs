/*!
`tiny-pathops` is a port of [Skia](https://skia.org/)'s path operations to Rust.

Computes the union, intersection, difference and xor of two paths and
simplifies self-intersecting paths. Paths may contain lines, quads,
conics and cubics, which are preserved in the output.

```
use tiny_pathops::{op, FillRule, PathBuilder, PathOp, Rect};

let a = PathBuilder::from_rect(Rect::from_ltrb(0.0, 0.0, 2.0, 2.0).unwrap());
let b = PathBuilder::from_rect(Rect::from_ltrb(1.0, 1.0, 3.0, 3.0).unwrap());
let path = op(&a, FillRule::Winding, &b, FillRule::Winding, PathOp::Intersect)
    .unwrap()
    .unwrap();
assert_eq!(path.bounds(), Rect::from_ltrb(1.0, 1.0, 2.0, 2.0).unwrap());
```
*/

#![no_std]
#![warn(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::approx_constant)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::new_without_default)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod error;
mod intersections;
mod ops;

#[doc(hidden)]
#[allow(missing_docs)]
#[allow(missing_debug_implementations)]
pub mod path64;

pub use error::PathOpsError;
pub use ops::{op, simplify, FillRule, PathOp};

pub use tiny_pathops_path::{Path, PathBuilder, PathSegment, PathSegmentsIter, PathVerb};
pub use tiny_pathops_path::{Point, Rect};
