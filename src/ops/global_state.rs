// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use super::coincidence::Coincidence;
use super::contour::{Contour, ContourHead};
use super::ptt::PtT;
use super::segment::Segment;
use super::span::Span;

macro_rules! arena_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
        pub struct $name(u32);

        impl $name {
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize);
                $name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// An index of a [`PtT`] in the [`GlobalState`] arena.
    PtTId
);
arena_id!(
    /// An index of a [`Span`] in the [`GlobalState`] arena.
    SpanId
);
arena_id!(SegmentId);
arena_id!(ContourId);

/// The stage of a path operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    NoChange,
    /// Building edges, intersecting them and registering coincidences.
    Intersecting,
    /// Cleaning up, computing windings and walking the result.
    Walking,
    /// Assembling result pieces that didn't close on their own.
    FixWinding,
}

/// All the state of a single path operation.
///
/// Records are never freed individually. Removed spans and points are
/// flagged as deleted and stay in the arena until the operation ends.
#[derive(Debug)]
pub struct GlobalState {
    pub ptts: Vec<PtT>,
    pub spans: Vec<Span>,
    pub segments: Vec<Segment>,
    pub contours: Vec<Contour>,
    pub head: ContourHead,
    pub coincidence: Coincidence,
    phase: Phase,
    winding_failed: bool,
}

impl GlobalState {
    pub fn new() -> Self {
        GlobalState {
            ptts: Vec::new(),
            spans: Vec::new(),
            segments: Vec::new(),
            contours: Vec::new(),
            head: ContourHead::default(),
            coincidence: Coincidence::default(),
            phase: Phase::NoChange,
            winding_failed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        log::debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Once set, the flag stays set until the operation ends.
    pub fn set_winding_failed(&mut self) {
        self.winding_failed = true;
    }

    pub fn winding_failed(&self) -> bool {
        self.winding_failed
    }

    pub fn ptt(&self, id: PtTId) -> &PtT {
        &self.ptts[id.index()]
    }

    pub fn ptt_mut(&mut self, id: PtTId) -> &mut PtT {
        &mut self.ptts[id.index()]
    }

    pub fn span(&self, id: SpanId) -> &Span {
        &self.spans[id.index()]
    }

    pub fn span_mut(&mut self, id: SpanId) -> &mut Span {
        &mut self.spans[id.index()]
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn segment_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.index()]
    }

    pub fn contour(&self, id: ContourId) -> &Contour {
        &self.contours[id.index()]
    }

    pub fn contour_mut(&mut self, id: ContourId) -> &mut Contour {
        &mut self.contours[id.index()]
    }

    /// Returns the segment a point belongs to.
    pub fn ptt_segment(&self, id: PtTId) -> SegmentId {
        self.span(self.ptt(id).span).segment
    }

    /// Returns all segments of the contours linked to the head.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        let mut ids = Vec::new();
        for contour in self.head.iter(&self.contours) {
            ids.extend_from_slice(&self.contour(contour).segments);
        }

        ids
    }

    /// Returns spans of a segment, excluding the final one.
    pub fn segment_spans(&self, id: SegmentId) -> Vec<SpanId> {
        let mut spans = Vec::with_capacity(self.segment(id).count);
        let mut span = self.segment(id).head;
        while let Some(next) = self.span(span).next {
            spans.push(span);
            span = next;
        }

        spans
    }
}
