// Copyright 2013 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use super::global_state::{ContourId, GlobalState, SegmentId};
use crate::error::{PathOpsError, Result};
use crate::path64::{Curve64, Rect64};

/// A closed sequence of segments from one input contour (SkOpContour).
#[derive(Clone, Debug)]
pub struct Contour {
    pub segments: Vec<SegmentId>,
    pub bounds: Option<Rect64>,
    /// Belongs to the second path of a binary operation.
    pub operand: bool,
    /// Own path uses the even-odd fill.
    pub xor: bool,
    /// The other path uses the even-odd fill.
    pub opp_xor: bool,
    /// Counter-clockwise on screen.
    pub ccw: bool,
    pub next: Option<ContourId>,
    pub done: bool,
}

/// The root of the contour chain (SkOpContourHead).
#[derive(Clone, Copy, Default, Debug)]
pub struct ContourHead {
    first: Option<ContourId>,
    last: Option<ContourId>,
}

impl ContourHead {
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn append_contour(&mut self, contours: &mut [Contour], id: ContourId) {
        contours[id.index()].next = None;
        match self.last {
            Some(last) => contours[last.index()].next = Some(id),
            None => self.first = Some(id),
        }

        self.last = Some(id);
    }

    /// Unlinks a contour from the chain.
    ///
    /// Returns false when the contour wasn't linked.
    pub fn remove(&mut self, contours: &mut [Contour], id: ContourId) -> bool {
        let mut prev: Option<ContourId> = None;
        let mut current = self.first;
        while let Some(c) = current {
            if c == id {
                let next = contours[c.index()].next;
                match prev {
                    Some(p) => contours[p.index()].next = next,
                    None => self.first = next,
                }

                if self.last == Some(id) {
                    self.last = prev;
                }

                contours[c.index()].next = None;
                return true;
            }

            prev = current;
            current = contours[c.index()].next;
        }

        false
    }

    pub fn iter<'a>(&self, contours: &'a [Contour]) -> ContourIter<'a> {
        ContourIter {
            contours,
            current: self.first,
            left: contours.len(),
        }
    }
}

/// An iterator over linked contours.
pub struct ContourIter<'a> {
    contours: &'a [Contour],
    current: Option<ContourId>,
    // A chain can't be longer than the arena.
    left: usize,
}

impl Iterator for ContourIter<'_> {
    type Item = ContourId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        if self.left == 0 {
            return None;
        }

        self.left -= 1;
        self.current = self.contours[id.index()].next;
        Some(id)
    }
}

impl GlobalState {
    /// Creates a contour and appends it to the chain.
    pub fn new_contour(&mut self, operand: bool, xor: bool, opp_xor: bool) -> ContourId {
        let id = ContourId::new(self.contours.len());
        self.contours.push(Contour {
            segments: Vec::new(),
            bounds: None,
            operand,
            xor,
            opp_xor,
            ccw: false,
            next: None,
            done: false,
        });
        self.head.append_contour(&mut self.contours, id);
        id
    }

    pub fn add_curve(&mut self, contour: ContourId, curve: Curve64) -> SegmentId {
        let id = self.new_segment(contour, curve);
        let bounds = self.segment(id).bounds;
        let contour = self.contour_mut(contour);
        contour.segments.push(id);
        match contour.bounds {
            Some(ref mut b) => b.union(&bounds),
            None => contour.bounds = Some(bounds),
        }

        id
    }

    /// Links the end of every segment with the start of the next one.
    pub fn join_segments(&mut self, contour: ContourId) -> Result<()> {
        let segments = self.contour(contour).segments.clone();
        for (i, segment) in segments.iter().enumerate() {
            let next = segments[(i + 1) % segments.len()];
            let tail = self.span(self.segment(*segment).tail).ptt;
            let head = self.span(self.segment(next).head).ptt;
            if self.ptt(tail).pt != self.ptt(head).pt {
                return Err(PathOpsError::Corrupt("contour is not closed"));
            }

            self.add_opp(tail, head)?;
        }

        Ok(())
    }

    /// Computes the contour orientation from the signed area of its control polygon.
    pub fn compute_ccw(&mut self, contour: ContourId) {
        let mut area = 0.0;
        for segment in &self.contour(contour).segments {
            let points = self.segment(*segment).curve.points();
            for pair in points.windows(2) {
                area += pair[0].cross(pair[1]);
            }
        }

        // In y-down coordinates a negative area means counter-clockwise on screen.
        let ccw = area < 0.0;
        log::debug!("{:?} is {}", contour, if ccw { "ccw" } else { "cw" });
        self.contour_mut(contour).ccw = ccw;
    }
}
