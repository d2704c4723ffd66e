// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::global_state::{ContourId, GlobalState, PtTId, SegmentId, SpanId};
use crate::error::{PathOpsError, Result};
use crate::path64::{Curve64, Point64, Rect64, Scalar64, FLT_EPSILON};

/// One input curve with all the spans found on it (SkOpSegment).
#[derive(Clone, Debug)]
pub struct Segment {
    pub contour: ContourId,
    pub curve: Curve64,
    /// The span at `t == 0`.
    pub head: SpanId,
    /// The final span at `t == 1`.
    pub tail: SpanId,
    pub bounds: Rect64,
    pub done_count: usize,
    /// The number of spans, including the final one.
    pub count: usize,
}

impl Segment {
    /// All spans with winding were consumed by the walk.
    pub fn done(&self) -> bool {
        self.done_count + 1 >= self.count
    }
}

impl GlobalState {
    pub fn new_segment(&mut self, contour: ContourId, curve: Curve64) -> SegmentId {
        let id = SegmentId::new(self.segments.len());
        let head = self.new_span(id, 0.0, curve.start());
        let tail = self.new_span(id, 1.0, curve.end());
        self.span_mut(head).next = Some(tail);
        let tail_span = self.span_mut(tail);
        tail_span.prev = Some(head);
        tail_span.wind_value = 0;

        self.segments.push(Segment {
            contour,
            curve,
            head,
            tail,
            bounds: curve.bounds(),
            done_count: 0,
            count: 2,
        });
        id
    }

    /// Adds a span at `t`, or returns the point of an existing span that
    /// matches `t` (SkOpSegment::addT).
    pub fn add_t(&mut self, id: SegmentId, t: f64) -> Result<PtTId> {
        if !(0.0..=1.0).contains(&t) {
            return Err(PathOpsError::Corrupt("t is outside of the segment"));
        }

        let curve = self.segment(id).curve;
        let pt = if t == 0.0 {
            curve.start()
        } else if t == 1.0 {
            curve.end()
        } else {
            curve.point_at_t(t)
        };

        let mut span = Some(self.segment(id).head);
        let mut insert_before = None;
        while let Some(s) = span {
            let ptt = self.ptt(self.span(s).ptt);
            if t == ptt.t || (!t.zero_or_one() && self.matches(id, ptt.t, ptt.pt, t, pt)) {
                return Ok(self.span(s).ptt);
            }

            if insert_before.is_none() && ptt.t > t {
                insert_before = Some(s);
            }

            span = self.span(s).next;
        }

        let next = insert_before.ok_or(PathOpsError::Corrupt("segment has no final span"))?;
        let prev = self
            .span(next)
            .prev
            .ok_or(PathOpsError::Corrupt("span precedes the segment start"))?;

        let new = self.new_span(id, t, pt);
        self.span_mut(new).prev = Some(prev);
        self.span_mut(new).next = Some(next);
        self.span_mut(prev).next = Some(new);
        self.span_mut(next).prev = Some(new);
        self.segment_mut(id).count += 1;
        Ok(self.span(new).ptt)
    }

    fn matches(&self, id: SegmentId, base_t: f64, base_pt: Point64, t: f64, pt: Point64) -> bool {
        if base_t.precisely_equal(t) {
            return true;
        }

        pt.approximately_equal(base_pt) && !self.pts_disjoint(id, base_t, base_pt, t, pt)
    }

    /// Checks that the curve between two nearby points goes away from them.
    ///
    /// Curves can loop back close to themselves, then equal points do not
    /// mean the same span.
    pub fn pts_disjoint(&self, id: SegmentId, t1: f64, pt1: Point64, t2: f64, pt2: Point64) -> bool {
        let curve = &self.segment(id).curve;
        if curve.is_line() {
            return false;
        }

        let mid = curve.point_at_t((t1 + t2) / 2.0);
        let limit = (pt1.distance_squared(pt2) * 2.0).max(FLT_EPSILON * 2.0);
        mid.distance_squared(pt1) > limit || mid.distance_squared(pt2) > limit
    }

    /// Returns the piece of the segment's curve covered by a span.
    pub fn sub_curve(&self, span: SpanId) -> Result<Curve64> {
        let next = self
            .span(span)
            .next
            .ok_or(PathOpsError::Corrupt("final span has no curve"))?;
        let curve = self.segment(self.span(span).segment).curve;
        let piece = curve.sub_divide(self.span_t(span), self.span_t(next));
        Ok(piece.with_ends(self.span_pt(span), self.span_pt(next)))
    }

    // Merges `lose` into `keep` and unlinks it from the segment.
    fn remove_span(&mut self, keep: SpanId, lose: SpanId) -> Result<()> {
        let segment = self.span(lose).segment;
        let (prev, next) = match (self.span(lose).prev, self.span(lose).next) {
            (Some(prev), Some(next)) => (prev, next),
            _ => return Err(PathOpsError::Corrupt("can't remove the segment end")),
        };

        log::trace!(
            "merge span {:?} at {} into {:?} at {}",
            lose,
            self.span_t(lose),
            keep,
            self.span_t(keep)
        );

        self.merge_matches(keep, lose)?;
        self.span_mut(prev).next = Some(next);
        self.span_mut(next).prev = Some(prev);
        self.span_mut(lose).deleted = true;
        self.segment_mut(segment).count -= 1;
        Ok(())
    }

    /// Merges neighbour spans with nearly equal points (SkOpSegment::moveNearby).
    ///
    /// Returns true when anything changed.
    pub fn move_nearby(&mut self, id: SegmentId) -> Result<bool> {
        let mut changed = false;
        let mut span = self.segment(id).head;
        while let Some(next) = self.span(span).next {
            if !self.span_pt(span).approximately_equal(self.span_pt(next)) {
                span = next;
                continue;
            }

            if self.span(next).is_final() {
                // A segment shorter than the tolerance is left to the coincidence.
                if span != self.segment(id).head {
                    self.remove_span(next, span)?;
                    changed = true;
                }

                break;
            }

            self.remove_span(span, next)?;
            changed = true;
        }

        Ok(changed)
    }

    /// Merges spans of a segment that ended up in the same point ring
    /// (SkOpSegment::moveMultiples).
    ///
    /// Returns true when anything changed.
    pub fn move_multiples(&mut self, id: SegmentId) -> Result<bool> {
        let mut changed = false;
        'restart: loop {
            let mut span = Some(self.segment(id).head);
            while let Some(s) = span {
                let ptt = self.span(s).ptt;
                if let Some(mate) = self.ring_segment_ptt(ptt, id)? {
                    let other = self.ptt(mate).span;
                    let same = self.pt_already_seen(ptt, mate)?
                        || self.span_pt(s).roughly_equal(self.ptt(mate).pt);
                    if other != s && same {
                        let (keep, lose) = self.keeper(s, other);
                        if self.span(lose).prev.is_some() && !self.span(lose).is_final() {
                            self.remove_span(keep, lose)?;
                            changed = true;
                            continue 'restart;
                        }
                    }
                }

                span = self.span(s).next;
            }

            return Ok(changed);
        }
    }

    // Prefers the segment ends, then the lower t.
    fn keeper(&self, a: SpanId, b: SpanId) -> (SpanId, SpanId) {
        let is_end = |s: SpanId| self.span(s).prev.is_none() || self.span(s).is_final();
        if is_end(b) && !is_end(a) {
            (b, a)
        } else if is_end(a) || self.span_t(a) < self.span_t(b) {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Finds spans that share both end points with another segment and lie on
    /// it, but were not reported as coincident (SkOpSegment::missingCoincidence).
    ///
    /// Returns true when a coincidence was added.
    pub fn missing_coincidence(&mut self, id: SegmentId) -> Result<bool> {
        let mut added = false;
        for span in self.segment_spans(id) {
            let next = match self.span(span).next {
                Some(next) => next,
                None => continue,
            };

            let (t0, t1) = (self.span_t(span), self.span_t(next));
            for opp_start in self.ring(self.span(span).ptt)?.into_iter().skip(1) {
                let opp = self.ptt_segment(opp_start);
                if opp == id || self.ptt(opp_start).deleted {
                    continue;
                }

                let opp_end = match self.ring_segment_ptt(self.span(next).ptt, opp)? {
                    Some(opp_end) => opp_end,
                    None => continue,
                };

                let (opp_t0, opp_t1) = (self.ptt(opp_start).t, self.ptt(opp_end).t);
                if self.coincidence_covers(id, t0, t1, opp)
                    || self.coincidence_covers(opp, opp_t0, opp_t1, id)
                {
                    continue;
                }

                let curve = self.segment(id).curve;
                let mid_t = (t0 + t1) / 2.0;
                let mid = curve.point_at_t(mid_t);
                let opp_curve = self.segment(opp).curve;
                let on_opp = opp_curve
                    .near_point(mid, mid + curve.dxdy_at_t(mid_t))
                    .map_or(false, |t| crate::path64::approximately_between(opp_t0, t, opp_t1));
                if on_opp {
                    log::debug!("found missed coincidence of {:?} and {:?}", id, opp);
                    let (start, end) = (self.span(span).ptt, self.span(next).ptt);
                    self.add_coincidence(start, end, opp_start, opp_end)?;
                    added = true;
                }
            }
        }

        Ok(added)
    }

    /// Marks a span as consumed by the walk.
    pub fn mark_done(&mut self, span: SpanId) {
        if self.span(span).done {
            return;
        }

        self.span_mut(span).done = true;
        let segment = self.span(span).segment;
        self.segment_mut(segment).done_count += 1;
        if self.segment(segment).done() {
            let contour = self.segment(segment).contour;
            let all_done = self
                .contour(contour)
                .segments
                .iter()
                .all(|s| self.segment(*s).done());
            self.contour_mut(contour).done = all_done;
        }
    }

    /// Checks the span list of a segment.
    pub fn validate_segment(&self, id: SegmentId) -> Result<()> {
        let segment = self.segment(id);
        if self.span_t(segment.head) != 0.0 || self.span_t(segment.tail) != 1.0 {
            return Err(PathOpsError::Corrupt("segment ends are not at 0 and 1"));
        }

        let mut count = 1;
        let mut span = segment.head;
        while let Some(next) = self.span(span).next {
            self.check_span(span)?;
            count += 1;
            if count > segment.count {
                return Err(PathOpsError::Corrupt("segment has more spans than counted"));
            }

            span = next;
        }

        if span != segment.tail || count != segment.count {
            return Err(PathOpsError::Corrupt("segment span list is broken"));
        }

        self.check_span(span)
    }

    /// Checks all linked segments.
    pub fn validate(&self) -> Result<()> {
        for segment in self.segment_ids() {
            self.validate_segment(segment)?;
        }

        Ok(())
    }
}
