// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Pairwise curve intersections (SkIntersections).

use arrayvec::ArrayVec;

use crate::error::{PathOpsError, Result};
use crate::path64::{Curve64, Point64, Scalar64};

mod curve_curve;
mod line;
mod line_curve;

/// The maximum number of intersections between two curves we keep.
///
/// Two cubics may cross at 9 points, the rest is a slack for near duplicates.
pub const MAX_INTERSECTIONS: usize = 13;

/// A single intersection.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Intersection {
    /// Parameters on the first and the second curve.
    pub t: [f64; 2],
    pub pt: Point64,
    /// Set on both ends of a coincident run.
    pub coincident: bool,
}

/// Intersections of two curves, sorted by the first curve's `t`.
#[derive(Clone, Default, Debug)]
pub struct Intersections {
    entries: ArrayVec<Intersection, MAX_INTERSECTIONS>,
    // Set when a distinct intersection didn't fit.
    overflowed: bool,
}

impl Intersections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn used(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &Intersection {
        &self.entries[index]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Intersection> {
        self.entries.iter()
    }

    pub fn has_t(&self, t: f64) -> bool {
        self.entries.iter().any(|e| e.t[0] == t)
    }

    pub fn has_opp_t(&self, t: f64) -> bool {
        self.entries.iter().any(|e| e.t[1] == t)
    }

    pub fn is_coincident(&self, index: usize) -> bool {
        self.entries[index].coincident
    }

    pub fn set_coincident(&mut self, index: usize) {
        self.entries[index].coincident = true;
    }

    pub fn remove_one(&mut self, index: usize) {
        self.entries.remove(index);
    }

    /// Adds an intersection keeping the list sorted.
    ///
    /// A nearby existing intersection is kept, unless the new one lands
    /// exactly on an end point and the old one does not.
    /// Returns the index of the new intersection.
    pub fn insert(&mut self, one: f64, two: f64, pt: Point64) -> Option<usize> {
        if self.entries.len() >= 2
            && self.entries[0].coincident
            && self.entries[1].coincident
            && one.between(self.entries[0].t[0], self.entries[1].t[0])
        {
            // Don't mix a coincident run with crossings inside of it.
            return None;
        }

        let mut index = 0;
        while index < self.entries.len() {
            let old = self.entries[index].t;
            if one == old[0] && two == old[1] {
                return None;
            }

            if old[0].more_roughly_equal(one) && old[1].more_roughly_equal(two) {
                let keep_old = (!one.precisely_zero() || old[0].precisely_zero())
                    && (!one.precisely_equal(1.0) || old[0].precisely_equal(1.0))
                    && (!two.precisely_zero() || old[1].precisely_zero())
                    && (!two.precisely_equal(1.0) || old[1].precisely_equal(1.0));
                if keep_old {
                    return None;
                }

                self.entries.remove(index);
                break;
            }

            index += 1;
        }

        let index = self
            .entries
            .iter()
            .position(|e| e.t[0] > one)
            .unwrap_or(self.entries.len());

        if self.entries.is_full() {
            log::debug!("too many intersections, dropping {} {}", one, two);
            self.overflowed = true;
            return None;
        }

        self.entries.insert(
            index,
            Intersection {
                t: [one, two],
                pt,
                coincident: false,
            },
        );
        Some(index)
    }

    /// Swaps the curves the parameters refer to.
    pub fn swap_sides(&mut self) {
        for e in self.entries.iter_mut() {
            e.t.swap(0, 1);
        }

        self.entries.sort_by(|a, b| crate::path64::cmp_f64(&a.t[0], &b.t[0]));
    }
}

/// Intersects two curves of any kind.
///
/// # Errors
///
/// Fails when not every intersection could be found or stored.
pub fn intersect(a: &Curve64, b: &Curve64) -> Result<Intersections> {
    let result = match (a, b) {
        (Curve64::Line(a), Curve64::Line(b)) => line::intersect(a, b),
        (_, Curve64::Line(line)) => line_curve::intersect(a, line),
        (Curve64::Line(line), _) => {
            let mut result = line_curve::intersect(b, line);
            result.swap_sides();
            result
        }
        _ => curve_curve::intersect(a, b)?,
    };

    if result.overflowed {
        return Err(PathOpsError::Corrupt("too many intersections"));
    }

    log::trace!(
        "{:?}/{:?} intersect {} times",
        a.verb(),
        b.verb(),
        result.used()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Line64, Quad64};

    #[test]
    fn insert_keeps_order_and_prefers_end_points() {
        let mut i = Intersections::new();
        assert_eq!(i.insert(0.5, 0.5, Point64::zero()), Some(0));
        assert_eq!(i.insert(0.25, 0.75, Point64::zero()), Some(0));
        assert_eq!(i.used(), 2);
        assert_eq!(i.get(1).t, [0.5, 0.5]);

        // Duplicate within tolerance.
        assert_eq!(i.insert(0.25 + 1e-6, 0.75, Point64::zero()), None);

        let mut i = Intersections::new();
        i.insert(1e-6, 0.5, Point64::zero());
        assert_eq!(i.insert(0.0, 0.5, Point64::zero()), Some(0));
        assert_eq!(i.used(), 1);
        assert_eq!(i.get(0).t[0], 0.0);
    }

    #[test]
    fn overflow_is_remembered() {
        let mut i = Intersections::new();
        for n in 0..MAX_INTERSECTIONS {
            let t = n as f64 / 20.0;
            assert!(i.insert(t, t, Point64::zero()).is_some());
        }

        assert!(!i.overflowed);
        assert_eq!(i.insert(0.99, 0.99, Point64::zero()), None);
        assert!(i.overflowed);
    }

    #[test]
    fn swap_resorts() {
        let mut i = Intersections::new();
        i.insert(0.2, 0.9, Point64::zero());
        i.insert(0.8, 0.1, Point64::zero());
        i.swap_sides();
        assert_eq!(i.get(0).t, [0.1, 0.8]);
        assert_eq!(i.get(1).t, [0.9, 0.2]);
    }

    #[test]
    fn dispatch() {
        let line = Curve64::Line(Line64::new(
            Point64::from_xy(0.0, 1.0),
            Point64::from_xy(4.0, 1.0),
        ));
        let quad = Curve64::Quad(Quad64::new([
            Point64::from_xy(0.0, 0.0),
            Point64::from_xy(2.0, 4.0),
            Point64::from_xy(4.0, 0.0),
        ]));
        let a = intersect(&line, &quad).unwrap();
        let b = intersect(&quad, &line).unwrap();
        assert_eq!(a.used(), 2);
        assert_eq!(b.used(), 2);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.t[0] - y.t[1]).abs() < 1e-12);
            assert!(x.pt.distance(y.pt) < 1e-9);
        }
    }
}
