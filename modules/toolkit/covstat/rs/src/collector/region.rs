use std::io;

use derive_getters::Getters;
use eyre::Result;

use repkit_core_rs::loc::IntervalOp;
use repkit_core_rs::repseq::Feature;
use repkit_io_rs::archive::Alignment;

use super::{fraction, CollectorFault};

/// Per-position coverage counts across one declared region of the receptor
/// gene.
///
/// Region instances vary in length between records (landmark distances are
/// not fixed), so the counter vector grows to the longest instance seen.
/// Position `i` counts the records whose alignment covered offset `i` from
/// the region start in that record's own coordinate frame.
#[derive(Clone, PartialEq, Eq, Debug, Getters)]
pub struct RegionCoverage {
    feature: Feature,
    #[getter(skip)]
    hits: Vec<u64>,
    total: u64,
    #[getter(skip)]
    finalized: bool,
}

impl RegionCoverage {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            hits: Vec::new(),
            total: 0,
            finalized: false,
        }
    }

    pub fn hits(&self) -> &[u64] {
        &self.hits
    }

    pub fn label(&self) -> String {
        self.feature.to_string()
    }

    pub fn put(&mut self, alignment: &Alignment) -> Result<(), CollectorFault> {
        if self.finalized {
            return Err(CollectorFault::new("put after end"));
        }
        self.total += 1;

        let partitioning = alignment.partitioning();
        let (Some(start), Some(end)) = (
            partitioning.locate(self.feature.start()),
            partitioning.locate(self.feature.end()),
        ) else {
            // The region is not resolved for this record: non-coverage
            return Ok(());
        };
        if end <= start {
            // Zero-width instance: nothing to tally
            return Ok(());
        }

        let length = (end - start) as usize;
        if self.hits.len() < length {
            self.hits.resize(length, 0);
        }
        for span in alignment.spans() {
            let from = start.max(span.start() as i64);
            let to = end.min(span.end() as i64);
            for pos in from..to {
                self.hits[(pos - start) as usize] += 1;
            }
        }
        Ok(())
    }

    pub fn end(&mut self) {
        self.finalized = true;
    }

    pub fn write(&self, sink: &mut dyn io::Write) -> Result<()> {
        if !self.finalized {
            return Err(CollectorFault::new("write before end").into());
        }
        writeln!(sink, "{}", self.label())?;
        for (pos, count) in self.hits.iter().enumerate() {
            writeln!(
                sink,
                "{}\t{}\t{:.4}",
                pos,
                count,
                fraction(*count, self.total)
            )?;
        }
        writeln!(sink)?;
        Ok(())
    }

    pub(super) fn absorb(&mut self, other: RegionCoverage) -> Result<(), CollectorFault> {
        if self.finalized || other.finalized {
            return Err(CollectorFault::new("absorbed a finalized collector"));
        }
        if self.feature != other.feature {
            return Err(CollectorFault::new("absorbed a partial of a different target"));
        }

        if self.hits.len() < other.hits.len() {
            self.hits.resize(other.hits.len(), 0);
        }
        for (mine, theirs) in self.hits.iter_mut().zip(other.hits) {
            *mine += theirs;
        }
        self.total += other.total;
        Ok(())
    }
}
