use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};

use repkit_core_rs::loc::{Interval, IntervalOp};
use repkit_core_rs::repseq::Partitioning;

/// One aligned read: the spans its alignment covers in read coordinates plus
/// the landmark positions the upstream aligner resolved for it.
///
/// Spans are normalized at construction (sorted, overlaps merged), so each
/// covered position belongs to exactly one span.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve)]
pub struct Alignment {
    spans: Vec<Interval<u32>>,
    partitioning: Partitioning,
}

impl Alignment {
    pub fn new(mut spans: Vec<Interval<u32>>, partitioning: Partitioning) -> Self {
        Interval::normalize(&mut spans);
        Self {
            spans,
            partitioning,
        }
    }

    /// Whether the alignment covers the given read-coordinate position.
    pub fn covers(&self, pos: i64) -> bool {
        match u32::try_from(pos) {
            Ok(pos) => self.spans.iter().any(|span| span.contains(pos)),
            Err(_) => false,
        }
    }
}
