// Copyright 2015 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use super::global_state::{GlobalState, PtTId, SegmentId, SpanId};
use crate::error::{PathOpsError, Result};
use crate::path64::Point64;

/// A piece of a segment starting at `ptt` (SkOpSpanBase and SkOpSpan).
///
/// Spans of a segment form a list ordered by `t`. The final span sits at
/// `t == 1`, has no `next` and carries no winding.
#[derive(Copy, Clone, Debug)]
pub struct Span {
    pub segment: SegmentId,
    pub ptt: PtTId,
    pub prev: Option<SpanId>,
    pub next: Option<SpanId>,
    /// The contribution of the span to its own operand's winding.
    pub wind_value: i32,
    /// The contribution to the other operand's winding, non-zero only after
    /// merging with coincident spans of the other operand.
    pub opp_value: i32,
    /// Winding on the left side of the span, i.e. on the side of the `(-dy, dx)` normal.
    pub wind_sum: Option<i32>,
    pub opp_sum: Option<i32>,
    pub done: bool,
    /// A ring of spans covering the same piece of geometry.
    pub coincident: SpanId,
    /// A ring of the final points of coincident spans.
    pub coin_end: SpanId,
    pub deleted: bool,
}

impl Span {
    pub fn is_final(&self) -> bool {
        self.next.is_none()
    }

    /// A canceled span doesn't contribute to any winding.
    pub fn is_canceled(&self) -> bool {
        self.wind_value == 0 && self.opp_value == 0
    }
}

impl GlobalState {
    /// Allocates a span with its point. Doesn't link it into the segment.
    pub fn new_span(&mut self, segment: SegmentId, t: f64, pt: Point64) -> SpanId {
        let id = SpanId::new(self.spans.len());
        let ptt = self.new_ptt(t, pt, id);
        self.spans.push(Span {
            segment,
            ptt,
            prev: None,
            next: None,
            wind_value: 1,
            opp_value: 0,
            wind_sum: None,
            opp_sum: None,
            done: false,
            coincident: id,
            coin_end: id,
            deleted: false,
        });
        id
    }

    pub fn span_t(&self, id: SpanId) -> f64 {
        self.ptt(self.span(id).ptt).t
    }

    pub fn span_pt(&self, id: SpanId) -> Point64 {
        self.ptt(self.span(id).ptt).pt
    }

    /// Sets the winding contribution.
    ///
    /// Values can change only until windings are computed.
    pub fn set_wind_value(&mut self, id: SpanId, wind: i32, opp: i32) -> Result<()> {
        let span = self.span_mut(id);
        if span.wind_sum.is_some() || span.opp_sum.is_some() {
            return Err(PathOpsError::Corrupt("winding value changed after the sum was set"));
        }

        span.wind_value = wind;
        span.opp_value = opp;
        Ok(())
    }

    /// Sets the winding sums. Setting a different sum twice is an error.
    pub fn set_wind_sums(&mut self, id: SpanId, wind: i32, opp: i32) -> Result<()> {
        let span = self.span_mut(id);
        match (span.wind_sum, span.opp_sum) {
            (None, None) => {
                span.wind_sum = Some(wind);
                span.opp_sum = Some(opp);
                Ok(())
            }
            (Some(w), Some(o)) if w == wind && o == opp => Ok(()),
            _ => Err(PathOpsError::WindingFailed),
        }
    }

    fn span_ring(&self, start: SpanId, next: fn(&Span) -> SpanId) -> Result<Vec<SpanId>> {
        let mut ring = Vec::new();
        ring.push(start);
        let mut span = next(self.span(start));
        while span != start {
            if ring.len() > self.spans.len() {
                return Err(PathOpsError::Corrupt("span ring doesn't close"));
            }

            ring.push(span);
            span = next(self.span(span));
        }

        Ok(ring)
    }

    pub fn coincident_ring(&self, start: SpanId) -> Result<Vec<SpanId>> {
        self.span_ring(start, |s| s.coincident)
    }

    /// Checks that `b` is marked as coincident with `a`.
    pub fn contains_coincidence(&self, a: SpanId, b: SpanId) -> Result<bool> {
        Ok(self.coincident_ring(a)?.contains(&b))
    }

    /// Links two spans covering the same geometry.
    pub fn insert_coincidence(&mut self, a: SpanId, b: SpanId) -> Result<()> {
        if self.contains_coincidence(a, b)? {
            return Ok(());
        }

        let a_next = self.span(a).coincident;
        let b_next = self.span(b).coincident;
        self.span_mut(a).coincident = b_next;
        self.span_mut(b).coincident = a_next;
        Ok(())
    }

    pub fn contains_coin_end(&self, a: SpanId, b: SpanId) -> Result<bool> {
        Ok(self.span_ring(a, |s| s.coin_end)?.contains(&b))
    }

    /// Links the final points of two coincident spans.
    pub fn insert_coin_end(&mut self, a: SpanId, b: SpanId) -> Result<()> {
        if self.contains_coin_end(a, b)? {
            return Ok(());
        }

        let a_next = self.span(a).coin_end;
        let b_next = self.span(b).coin_end;
        self.span_mut(a).coin_end = b_next;
        self.span_mut(b).coin_end = a_next;
        Ok(())
    }

    /// Merges the point ring of `lose` into the ring of `keep` and drops
    /// the point of `lose`.
    pub fn merge_matches(&mut self, keep: SpanId, lose: SpanId) -> Result<()> {
        let keep_ptt = self.span(keep).ptt;
        let lose_ptt = self.span(lose).ptt;
        self.add_opp(keep_ptt, lose_ptt)?;
        self.remove_from_ring(lose_ptt)?;
        self.ptt_mut(lose_ptt).deleted = true;
        self.coincidence.replace_ptt(lose_ptt, keep_ptt);
        Ok(())
    }

    /// Checks the span invariants.
    pub fn check_span(&self, id: SpanId) -> Result<()> {
        let span = self.span(id);
        if span.deleted || self.ptt(span.ptt).deleted {
            return Err(PathOpsError::Corrupt("deleted span is still linked"));
        }

        if self.ptt(span.ptt).span != id {
            return Err(PathOpsError::Corrupt("span point refers to another span"));
        }

        if let Some(next) = span.next {
            if self.span(next).prev != Some(id) {
                return Err(PathOpsError::Corrupt("span links are not symmetric"));
            }

            if !(self.span_t(id) < self.span_t(next)) {
                return Err(PathOpsError::Corrupt("spans are not ordered by t"));
            }
        }

        for ptt in self.ring(span.ptt)? {
            if self.ptt(ptt).deleted {
                return Err(PathOpsError::Corrupt("deleted point is still linked"));
            }
        }

        Ok(())
    }
}
