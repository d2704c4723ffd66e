// Copyright 2015 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*
Coincident runs are pieces of two segments that cover the same geometry.
They are collected during the intersection, expanded so both sides have
matching span boundaries, linked span by span and finally merged:
one span of every coincident group keeps the sum of the winding values,
the others are canceled.
*/

use alloc::vec;
use alloc::vec::Vec;

use super::global_state::{GlobalState, PtTId, SegmentId, SpanId};
use crate::error::{PathOpsError, Result};
use crate::path64::{approximately_between, Scalar64};

/// A coincident run (SkCoincidentSpans).
///
/// `coin_start.t < coin_end.t` always, the opposite run may go backwards.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CoinRecord {
    pub coin_start: PtTId,
    pub coin_end: PtTId,
    pub opp_start: PtTId,
    pub opp_end: PtTId,
}

/// The registry of coincident runs (SkOpCoincidence).
#[derive(Clone, Default, Debug)]
pub struct Coincidence {
    records: Vec<CoinRecord>,
}

impl Coincidence {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Points of merged spans are replaced by the points of the spans they merged into.
    pub fn replace_ptt(&mut self, old: PtTId, new: PtTId) {
        for record in &mut self.records {
            for ptt in [
                &mut record.coin_start,
                &mut record.coin_end,
                &mut record.opp_start,
                &mut record.opp_end,
            ] {
                if *ptt == old {
                    *ptt = new;
                }
            }
        }
    }
}

/// Two spans covering the same geometry.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CoinPair {
    pub span: SpanId,
    pub opp: SpanId,
    /// Spans run in opposite directions.
    pub flipped: bool,
}

impl GlobalState {
    /// Registers a coincident run.
    pub fn add_coincidence(
        &mut self,
        coin_start: PtTId,
        coin_end: PtTId,
        opp_start: PtTId,
        opp_end: PtTId,
    ) -> Result<()> {
        if self.ptt_segment(coin_start) != self.ptt_segment(coin_end)
            || self.ptt_segment(opp_start) != self.ptt_segment(opp_end)
        {
            return Err(PathOpsError::Coincidence);
        }

        let mut record = CoinRecord {
            coin_start,
            coin_end,
            opp_start,
            opp_end,
        };
        if self.ptt(coin_start).t > self.ptt(coin_end).t {
            record = CoinRecord {
                coin_start: coin_end,
                coin_end: coin_start,
                opp_start: opp_end,
                opp_end: opp_start,
            };
        }

        if !self.coincidence.records.contains(&record) {
            log::trace!(
                "coincidence {:?} [{}, {}] with {:?} [{}, {}]",
                self.ptt_segment(record.coin_start),
                self.ptt(record.coin_start).t,
                self.ptt(record.coin_end).t,
                self.ptt_segment(record.opp_start),
                self.ptt(record.opp_start).t,
                self.ptt(record.opp_end).t,
            );
            self.coincidence.records.push(record);
        }

        Ok(())
    }

    /// Checks whether `[t0, t1]` of `segment` is already registered as
    /// coincident with `opp`.
    pub fn coincidence_covers(&self, segment: SegmentId, t0: f64, t1: f64, opp: SegmentId) -> bool {
        self.coincidence.records.iter().any(|r| {
            let (this, that) = if self.ptt_segment(r.coin_start) == segment {
                ((r.coin_start, r.coin_end), (r.opp_start, r.opp_end))
            } else {
                ((r.opp_start, r.opp_end), (r.coin_start, r.coin_end))
            };

            self.ptt_segment(this.0) == segment
                && self.ptt_segment(that.0) == opp
                && approximately_between(self.ptt(this.0).t, t0, self.ptt(this.1).t)
                && approximately_between(self.ptt(this.0).t, t1, self.ptt(this.1).t)
        })
    }

    /// Adds span boundaries found inside of a run on one side to the other side.
    pub fn add_expanded(&mut self) -> Result<()> {
        for i in 0..self.coincidence.len() {
            let r = self.coincidence.records[i];
            self.expand_run((r.coin_start, r.coin_end), (r.opp_start, r.opp_end))?;
            let r = self.coincidence.records[i];
            self.expand_run((r.opp_start, r.opp_end), (r.coin_start, r.coin_end))?;
        }

        Ok(())
    }

    fn expand_run(&mut self, run: (PtTId, PtTId), opp: (PtTId, PtTId)) -> Result<()> {
        let segment = self.ptt_segment(run.0);
        let opp_segment = self.ptt_segment(opp.0);
        if segment == opp_segment {
            return Ok(());
        }

        let (t0, t1) = (self.ptt(run.0).t, self.ptt(run.1).t);
        let (opp_t0, opp_t1) = (self.ptt(opp.0).t, self.ptt(opp.1).t);
        let (lo, hi) = (t0.min(t1), t0.max(t1));
        let inner: Vec<SpanId> = self
            .segment_spans(segment)
            .into_iter()
            .filter(|s| {
                let t = self.span_t(*s);
                lo < t && t < hi
            })
            .collect();

        let curve = self.segment(segment).curve;
        let opp_curve = self.segment(opp_segment).curve;
        for span in inner {
            let ptt = self.span(span).ptt;
            if self.ring_segment_ptt(ptt, opp_segment)?.is_some() {
                continue;
            }

            let t = self.span_t(span);
            let pt = self.span_pt(span);
            let guess = opp_t0 + (opp_t1 - opp_t0) * (t - t0) / (t1 - t0);
            let opp_t = match opp_curve.near_point(pt, pt + curve.dxdy_at_t(t)) {
                Some(opp_t) if approximately_between(opp_t0, opp_t, opp_t1) => opp_t,
                _ => guess,
            };

            let opp_ptt = self.add_t(opp_segment, opp_t.bound(0.0, 1.0))?;
            self.add_opp(ptt, opp_ptt)?;
        }

        Ok(())
    }

    /// Links spans of every run with the matching spans on the other side
    /// and returns the linked pairs.
    pub fn mark_coincidences(&mut self) -> Result<Vec<CoinPair>> {
        let mut pairs = Vec::new();
        for i in 0..self.coincidence.len() {
            let r = self.coincidence.records[i];
            let segment = self.ptt_segment(r.coin_start);
            let opp_segment = self.ptt_segment(r.opp_start);
            if segment == opp_segment {
                continue;
            }

            let (t0, t1) = (self.ptt(r.coin_start).t, self.ptt(r.coin_end).t);
            for span in self.segment_spans(segment) {
                let t = self.span_t(span);
                if t < t0 || t >= t1 {
                    continue;
                }

                let next = match self.span(span).next {
                    Some(next) => next,
                    None => continue,
                };

                let start = self.ring_segment_ptt(self.span(span).ptt, opp_segment)?;
                let end = self.ring_segment_ptt(self.span(next).ptt, opp_segment)?;
                let (start, end) = match (start, end) {
                    (Some(start), Some(end)) => (start, end),
                    _ => {
                        log::debug!("coincident span {:?} has no match on {:?}", span, opp_segment);
                        continue;
                    }
                };

                let flipped = self.ptt(start).t > self.ptt(end).t;
                let (mut opp, last) = if flipped {
                    (self.ptt(end).span, self.ptt(start).span)
                } else {
                    (self.ptt(start).span, self.ptt(end).span)
                };

                if opp == last {
                    continue;
                }

                while opp != last {
                    self.insert_coincidence(span, opp)?;
                    pairs.push(CoinPair {
                        span,
                        opp,
                        flipped,
                    });
                    opp = match self.span(opp).next {
                        Some(next) => next,
                        None => return Err(PathOpsError::Coincidence),
                    };
                }

                for ptt in [self.span(span).ptt, self.span(next).ptt, start, end] {
                    self.ptt_mut(ptt).coincident = true;
                }

                self.insert_coin_end(next, self.ptt(end).span)?;
            }
        }

        Ok(pairs)
    }

    /// Merges winding values of coincident spans.
    ///
    /// Every group of linked spans is reduced to the span with the smallest id,
    /// which receives the values of the others, taking their direction and
    /// operand into account. The others are canceled.
    pub fn apply_coincidences(&mut self, pairs: &[CoinPair]) -> Result<()> {
        let mut sets = ParitySets::new(self.spans.len());
        for pair in pairs {
            sets.union(pair.span.index(), pair.opp.index(), pair.flipped)?;
        }

        let mut deltas = vec![(0i32, 0i32); self.spans.len()];
        let mut losers = Vec::new();
        for index in 0..self.spans.len() {
            let (root, flipped) = sets.find(index);
            if root == index {
                continue;
            }

            let sign = if flipped { -1 } else { 1 };
            let loser = self.spans[index];
            let keeper = self.spans[root];
            let same_operand = self.span_operand(loser.segment) == self.span_operand(keeper.segment);
            let (wind, opp) = if same_operand {
                (loser.wind_value, loser.opp_value)
            } else {
                (loser.opp_value, loser.wind_value)
            };

            deltas[root].0 += sign * wind;
            deltas[root].1 += sign * opp;
            losers.push(SpanId::new(index));
        }

        for (index, (wind, opp)) in deltas.into_iter().enumerate() {
            if wind != 0 || opp != 0 {
                let id = SpanId::new(index);
                let span = self.span(id);
                let (wind, opp) = (span.wind_value + wind, span.opp_value + opp);
                self.set_wind_value(id, wind, opp)?;
            }
        }

        for id in losers {
            self.set_wind_value(id, 0, 0)?;
        }

        Ok(())
    }

    fn span_operand(&self, segment: SegmentId) -> bool {
        self.contour(self.segment(segment).contour).operand
    }
}

// Disjoint sets where every member knows whether it runs opposite to the set's root.
struct ParitySets {
    parent: Vec<usize>,
    flipped: Vec<bool>,
}

impl ParitySets {
    fn new(len: usize) -> Self {
        ParitySets {
            parent: (0..len).collect(),
            flipped: vec![false; len],
        }
    }

    fn find(&self, mut index: usize) -> (usize, bool) {
        let mut flipped = false;
        while self.parent[index] != index {
            flipped ^= self.flipped[index];
            index = self.parent[index];
        }

        (index, flipped)
    }

    fn union(&mut self, a: usize, b: usize, flipped: bool) -> Result<()> {
        let (root_a, flipped_a) = self.find(a);
        let (root_b, flipped_b) = self.find(b);
        if root_a == root_b {
            if flipped_a ^ flipped_b != flipped {
                log::warn!("spans are coincident in both directions");
                return Err(PathOpsError::Coincidence);
            }

            return Ok(());
        }

        let (keep, lose) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[lose] = keep;
        self.flipped[lose] = flipped_a ^ flipped_b ^ flipped;
        Ok(())
    }
}
