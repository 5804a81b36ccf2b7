use std::fmt::{Display, Formatter};

use derive_getters::Dissolve;
use eyre::{eyre, Result};

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

use crate::num::Coord;

/// Half-open coordinate interval [start, end). Empty and inverted intervals are
/// prohibited at construction: start must be strictly below end.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Interval<Idx: Coord> {
    start: Idx,
    end: Idx,
}

/// Trait for types that can be viewed as half-open intervals [start, end).
#[allow(clippy::len_without_is_empty)]
pub trait IntervalOp {
    type Idx: Coord;

    /// Start position of the interval-like object.
    fn start(&self) -> Self::Idx;

    /// End position of the interval-like object.
    fn end(&self) -> Self::Idx;

    /// Length of the interval-like object.
    fn len(&self) -> Self::Idx {
        self.end() - self.start()
    }

    /// Check if the interval-like object contains a given position.
    fn contains(&self, pos: Self::Idx) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Check if the interval-like object intersects another one.
    /// The condition is strict and doesn't allow touching intervals.
    fn intersects(&self, other: &Self) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }
}

impl<Idx: Coord> IntervalOp for Interval<Idx> {
    type Idx = Idx;

    #[inline(always)]
    fn start(&self) -> Idx {
        self.start
    }

    #[inline(always)]
    fn end(&self) -> Idx {
        self.end
    }
}

impl<Idx: Coord> Interval<Idx> {
    pub fn new(start: Idx, end: Idx) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(eyre!("Invalid interval: start >= end"))
        }
    }

    /// Sort intervals and merge overlapping or touching neighbors in place.
    /// The result is the minimal sorted set covering the same positions.
    pub fn normalize(intervals: &mut Vec<Interval<Idx>>) -> &mut Vec<Interval<Idx>> {
        if intervals.len() <= 1 {
            return intervals;
        }
        intervals.sort();

        let mut writeto = 0;
        for readfrom in 1..intervals.len() {
            if intervals[readfrom].start <= intervals[writeto].end {
                intervals[writeto].end = intervals[writeto].end.max(intervals[readfrom].end);
            } else {
                writeto += 1;
                intervals[writeto] = intervals[readfrom];
            }
        }
        intervals.truncate(writeto + 1);
        intervals
    }
}

impl<Idx: Coord + Display> Display for Interval<Idx> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
