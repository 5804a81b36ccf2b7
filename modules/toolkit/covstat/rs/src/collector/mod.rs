use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use derive_more::From;
use eyre::Result;

use repkit_io_rs::archive::Alignment;

pub use anchor::AnchorCoverage;
pub use region::RegionCoverage;
pub use set::CollectorSet;

mod anchor;
mod region;
mod set;

/// Contract violation inside a collector: the caller drove it through an
/// illegal state transition. Never expected in correct code and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorFault {
    reason: &'static str,
}

impl CollectorFault {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

impl Display for CollectorFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "collector contract violated: {}", self.reason)
    }
}

impl Error for CollectorFault {}

/// One coverage statistic accumulated over a stream of alignments.
///
/// Both variants share the same lifecycle: `put` records one at a time, `end`
/// once to finalize, `write` the report fragment afterwards. Counters only
/// grow until finalization, and accumulation is commutative: any permutation
/// of the same records yields the same counters. That property is what makes
/// unordered parallel fan-out safe.
#[derive(Clone, PartialEq, Eq, Debug, From)]
pub enum Collector {
    Region(RegionCoverage),
    Anchor(AnchorCoverage),
}

impl Collector {
    /// Account for one record. A record that does not touch the target is a
    /// silent no-op, not an error.
    pub fn put(&mut self, alignment: &Alignment) -> Result<(), CollectorFault> {
        match self {
            Collector::Region(collector) => collector.put(alignment),
            Collector::Anchor(collector) => collector.put(alignment),
        }
    }

    /// Freeze the collector. Idempotent; afterwards `put` is a fault.
    pub fn end(&mut self) {
        match self {
            Collector::Region(collector) => collector.end(),
            Collector::Anchor(collector) => collector.end(),
        }
    }

    /// Render the report fragment. Only valid once finalized.
    pub fn write(&self, sink: &mut dyn io::Write) -> Result<()> {
        match self {
            Collector::Region(collector) => collector.write(sink),
            Collector::Anchor(collector) => collector.write(sink),
        }
    }

    /// Identifying label of the target this collector measures.
    pub fn label(&self) -> String {
        match self {
            Collector::Region(collector) => collector.label(),
            Collector::Anchor(collector) => collector.label(),
        }
    }

    /// Records seen so far, contributing or not.
    pub fn total(&self) -> u64 {
        match self {
            Collector::Region(collector) => *collector.total(),
            Collector::Anchor(collector) => *collector.total(),
        }
    }

    /// Fresh zeroed collector of the same shape, for per-worker partials.
    pub fn detached(&self) -> Self {
        match self {
            Collector::Region(collector) => RegionCoverage::new(*collector.feature()).into(),
            Collector::Anchor(collector) => AnchorCoverage::new(*collector.window()).into(),
        }
    }

    /// Fold a same-shape partial accumulator into this one.
    pub fn absorb(&mut self, other: Collector) -> Result<(), CollectorFault> {
        match (self, other) {
            (Collector::Region(mine), Collector::Region(theirs)) => mine.absorb(theirs),
            (Collector::Anchor(mine), Collector::Anchor(theirs)) => mine.absorb(theirs),
            _ => Err(CollectorFault::new("absorbed a partial of a different kind")),
        }
    }
}

/// Covered share of the accumulated records, safe for empty runs.
pub(crate) fn fraction(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
