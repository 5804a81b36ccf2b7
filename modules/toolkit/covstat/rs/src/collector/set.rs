use std::io;

use eyre::Result;
use itertools::zip_eq;

use repkit_io_rs::archive::Alignment;

use crate::targets::Targets;

use super::{AnchorCoverage, Collector, CollectorFault, RegionCoverage};

/// Ordered fan-out over every collector of one run.
///
/// Construction order is the report order: region collectors first, anchor
/// collectors after, exactly as listed in the [`Targets`]. Because each
/// member keeps fully independent state, forwarding records is the only merge
/// policy the set needs, and the final counters do not depend on the order in
/// which records were put.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CollectorSet {
    collectors: Vec<Collector>,
}

impl CollectorSet {
    pub fn from_targets(targets: &Targets) -> Self {
        let mut collectors = Vec::with_capacity(targets.len());
        for feature in targets.features() {
            collectors.push(RegionCoverage::new(*feature).into());
        }
        for window in targets.anchors() {
            collectors.push(AnchorCoverage::new(*window).into());
        }
        Self { collectors }
    }

    pub fn collectors(&self) -> &[Collector] {
        &self.collectors
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Forward one record to every member, in order.
    pub fn put(&mut self, alignment: &Alignment) -> Result<(), CollectorFault> {
        for collector in &mut self.collectors {
            collector.put(alignment)?;
        }
        Ok(())
    }

    /// Finalize every member, in order.
    pub fn end(&mut self) {
        for collector in &mut self.collectors {
            collector.end();
        }
    }

    /// Render every member's fragment, in order, as one concatenated report.
    pub fn write(&self, sink: &mut dyn io::Write) -> Result<()> {
        for collector in &self.collectors {
            collector.write(sink)?;
        }
        Ok(())
    }

    /// Fresh zeroed set of the same shape, for per-worker partials.
    pub fn detached(&self) -> Self {
        Self {
            collectors: self.collectors.iter().map(Collector::detached).collect(),
        }
    }

    /// Fold a same-shape partial set into this one, member by member.
    pub fn absorb(&mut self, other: CollectorSet) -> Result<(), CollectorFault> {
        if self.collectors.len() != other.collectors.len() {
            return Err(CollectorFault::new("absorbed a set of a different shape"));
        }
        for (mine, theirs) in zip_eq(&mut self.collectors, other.collectors) {
            mine.absorb(theirs)?;
        }
        Ok(())
    }
}
