// Copyright 2015 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use super::global_state::{GlobalState, PtTId, SegmentId, SpanId};
use crate::error::{PathOpsError, Result};
use crate::path64::Point64;

/// A point at `t` on a segment (SkOpPtT).
///
/// Points that share a location on different segments are linked into a
/// circular list through `next`. A point not linked to anything points to itself.
#[derive(Copy, Clone, Debug)]
pub struct PtT {
    pub t: f64,
    pub pt: Point64,
    pub span: SpanId,
    pub next: PtTId,
    pub deleted: bool,
    /// Matched to a point of a coincident run.
    pub coincident: bool,
}

impl GlobalState {
    pub fn new_ptt(&mut self, t: f64, pt: Point64, span: SpanId) -> PtTId {
        let id = PtTId::new(self.ptts.len());
        self.ptts.push(PtT {
            t,
            pt,
            span,
            next: id,
            deleted: false,
            coincident: false,
        });
        id
    }

    // A ring can't be longer than the arena, a longer walk means a broken list.
    fn loop_limit(&self) -> usize {
        self.ptts.len()
    }

    /// Returns all points of the ring, starting with `start`.
    pub fn ring(&self, start: PtTId) -> Result<Vec<PtTId>> {
        let mut ring = Vec::new();
        ring.push(start);
        let mut ptt = self.ptt(start).next;
        while ptt != start {
            if ring.len() > self.loop_limit() {
                return Err(PathOpsError::Corrupt("point ring doesn't close"));
            }

            ring.push(ptt);
            ptt = self.ptt(ptt).next;
        }

        Ok(ring)
    }

    /// Checks that `other` is in the ring of `base`.
    pub fn contains(&self, base: PtTId, other: PtTId) -> Result<bool> {
        Ok(self.ring(base)?.contains(&other))
    }

    /// Checks whether a point equal to `check` precedes `check` in the walk
    /// from `start`.
    ///
    /// Fails when `check` can't be reached from `start`.
    pub fn pt_already_seen(&self, start: PtTId, check: PtTId) -> Result<bool> {
        let pt = self.ptt(check).pt;
        let mut ptt = start;
        let mut steps = 0;
        while ptt != check {
            if steps > self.loop_limit() {
                return Err(PathOpsError::Corrupt("point is not in the ring"));
            }

            if !self.ptt(ptt).deleted && self.ptt(ptt).pt == pt {
                return Ok(true);
            }

            ptt = self.ptt(ptt).next;
            steps += 1;
        }

        Ok(false)
    }

    /// Links two points into the same ring (SkOpPtT::addOpp).
    ///
    /// Does nothing when they are already linked.
    pub fn add_opp(&mut self, a: PtTId, b: PtTId) -> Result<()> {
        if self.contains(a, b)? {
            return Ok(());
        }

        // Swapping successors of nodes from two distinct rings joins them.
        let a_next = self.ptt(a).next;
        let b_next = self.ptt(b).next;
        self.ptt_mut(a).next = b_next;
        self.ptt_mut(b).next = a_next;
        Ok(())
    }

    /// Unlinks a point from its ring.
    pub fn remove_from_ring(&mut self, id: PtTId) -> Result<()> {
        let ring = self.ring(id)?;
        if let Some(prev) = ring.last().copied() {
            if prev != id {
                self.ptt_mut(prev).next = self.ptt(id).next;
                self.ptt_mut(id).next = id;
            }
        }

        Ok(())
    }

    /// Returns a live point of `segment` in the ring of `start`, other than `start` itself.
    pub fn ring_segment_ptt(&self, start: PtTId, segment: SegmentId) -> Result<Option<PtTId>> {
        for ptt in self.ring(start)?.into_iter().skip(1) {
            if !self.ptt(ptt).deleted && self.ptt_segment(ptt) == segment {
                return Ok(Some(ptt));
            }
        }

        Ok(None)
    }

    /// Returns the point that represents the ring.
    ///
    /// Prefers end points of input curves, since they come from the input path as is.
    pub fn ring_point(&self, start: PtTId) -> Result<Point64> {
        let ring = self.ring(start)?;
        let live = || ring.iter().copied().filter(|p| !self.ptt(*p).deleted);
        let end = live().find(|p| self.ptt(*p).t == 0.0 || self.ptt(*p).t == 1.0);
        match end.or_else(|| live().min()) {
            Some(ptt) => Ok(self.ptt(ptt).pt),
            None => Err(PathOpsError::Corrupt("ring has no live points")),
        }
    }

    /// Returns a key shared by all points of the ring.
    pub fn ring_key(&self, start: PtTId) -> Result<PtTId> {
        let ring = self.ring(start)?;
        ring.iter()
            .copied()
            .filter(|p| !self.ptt(*p).deleted)
            .min()
            .ok_or(PathOpsError::Corrupt("ring has no live points"))
    }
}
