//! Integer range merging.
//!
//! Two flavours are needed. Occupied time is half-open (`[start, end)`), so
//! ranges merge when they touch. Forbidden offsets are sets of integers
//! (`[lo, hi]` inclusive), so ranges merge as soon as their values are
//! consecutive (`next.lo <= current.hi + 1`).

use crate::model::Frame;

/// Half-open frame interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: Frame,
    pub end: Frame,
}

impl Span {
    pub const fn new(start: Frame, end: Frame) -> Self {
        Self { start, end }
    }

    pub fn from_start_duration(start: Frame, duration: Frame) -> Self {
        Self::new(start, start + duration)
    }

    pub fn duration(&self) -> Frame {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Intersection with `other`, or `None` when they share no frame.
    pub fn intersect(&self, other: &Span) -> Option<Span> {
        let span = Span::new(self.start.max(other.start), self.end.min(other.end));
        (!span.is_empty()).then_some(span)
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.intersect(other).is_some()
    }

    pub fn contains(&self, frame: Frame) -> bool {
        self.start <= frame && frame < self.end
    }

    pub fn shifted(&self, delta: Frame) -> Span {
        Span::new(self.start + delta, self.end + delta)
    }
}

/// Inclusive integer range `[lo, hi]`.
pub type InclusiveRange = (i64, i64);

/// Merges half-open spans that overlap or touch.
///
/// Returns the minimal ordered set of disjoint spans covering the input.
pub fn merge_overlapping(spans: &[Span]) -> Vec<Span> {
    if spans.len() <= 1 {
        return spans.to_vec();
    }

    let mut sorted = spans.to_vec();
    sorted.sort();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(current) if span.start <= current.end => {
                current.end = current.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Merges inclusive ranges that overlap or are separated by exactly one unit.
pub fn merge_adjacent_inclusive(ranges: &[InclusiveRange]) -> Vec<InclusiveRange> {
    if ranges.len() <= 1 {
        return ranges.to_vec();
    }

    let mut sorted = ranges.to_vec();
    sorted.sort();

    let mut merged: Vec<InclusiveRange> = Vec::with_capacity(sorted.len());
    for (lo, hi) in sorted {
        match merged.last_mut() {
            Some(current) if lo <= current.1 + 1 => {
                current.1 = current.1.max(hi);
            }
            _ => merged.push((lo, hi)),
        }
    }
    merged
}
