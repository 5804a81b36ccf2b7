use std::io;

use derive_getters::Getters;
use eyre::Result;
use itertools::zip_eq;

use repkit_core_rs::loc::IntervalOp;
use repkit_io_rs::archive::Alignment;

use crate::targets::Window;

use super::{fraction, CollectorFault};

/// Coverage counts per signed offset around one landmark.
///
/// The window is fixed at construction: offsets in `[-left, +right]`
/// inclusive, one counter each. Offsets outside the window are never counted.
#[derive(Clone, PartialEq, Eq, Debug, Getters)]
pub struct AnchorCoverage {
    window: Window,
    #[getter(skip)]
    hits: Vec<u64>,
    total: u64,
    #[getter(skip)]
    finalized: bool,
}

impl AnchorCoverage {
    pub fn new(window: Window) -> Self {
        let width = (window.left() + window.right() + 1) as usize;
        Self {
            window,
            hits: vec![0; width],
            total: 0,
            finalized: false,
        }
    }

    pub fn hits(&self) -> &[u64] {
        &self.hits
    }

    pub fn label(&self) -> String {
        format!(
            "{}[-{}:+{}]",
            self.window.landmark(),
            self.window.left(),
            self.window.right()
        )
    }

    pub fn put(&mut self, alignment: &Alignment) -> Result<(), CollectorFault> {
        if self.finalized {
            return Err(CollectorFault::new("put after end"));
        }
        self.total += 1;

        let Some(center) = alignment.partitioning().get(*self.window.landmark()) else {
            // The landmark is not resolved for this record: non-coverage
            return Ok(());
        };
        let lo = center as i64 - *self.window.left() as i64;
        let hi = center as i64 + *self.window.right() as i64;

        for span in alignment.spans() {
            let from = lo.max(span.start() as i64);
            let to = (hi + 1).min(span.end() as i64);
            for pos in from..to {
                self.hits[(pos - lo) as usize] += 1;
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
        for (ind, count) in self.hits.iter().enumerate() {
            let offset = ind as i64 - *self.window.left() as i64;
            writeln!(
                sink,
                "{}\t{}\t{:.4}",
                offset,
                count,
                fraction(*count, self.total)
            )?;
        }
        writeln!(sink)?;
        Ok(())
    }

    pub(super) fn absorb(&mut self, other: AnchorCoverage) -> Result<(), CollectorFault> {
        if self.finalized || other.finalized {
            return Err(CollectorFault::new("absorbed a finalized collector"));
        }
        if self.window != other.window {
            return Err(CollectorFault::new("absorbed a partial of a different target"));
        }

        for (mine, theirs) in zip_eq(self.hits.iter_mut(), other.hits) {
            *mine += theirs;
        }
        self.total += other.total;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use repkit_core_rs::loc::Interval;
    use repkit_core_rs::repseq::Landmark;

    use super::*;

    fn record(spans: &[(u32, u32)], landmarks: &[(Landmark, u32)]) -> Alignment {
        let spans = spans
            .iter()
            .map(|(start, end)| Interval::new(*start, *end).unwrap())
            .collect();
        Alignment::new(spans, landmarks.iter().copied().collect())
    }

    #[test]
    fn test_margin_boundaries() -> Result<()> {
        // Anchor at 100 with margins (40, 40); the alignment covers exactly
        // [-40, +40] and a little beyond on both sides
        let mut collector = AnchorCoverage::new(Window::new(Landmark::Cdr3Begin, 40, 40));
        collector.put(&record(&[(50, 150)], &[(Landmark::Cdr3Begin, 100)]))?;

        assert_eq!(collector.hits().len(), 81);
        assert_eq!(collector.hits(), &[1; 81]);
        Ok(())
    }

    #[test]
    fn test_window_clipping() -> Result<()> {
        // Anchor at 10: offsets below -10 fall before the read start; the
        // alignment itself only covers [5, 13) => offsets [-5, +2]
        let mut collector = AnchorCoverage::new(Window::new(Landmark::L1Begin, 10, 10));
        collector.put(&record(&[(5, 13)], &[(Landmark::L1Begin, 10)]))?;

        let mut expected = [0u64; 21];
        for offset in -5i64..=2 {
            expected[(offset + 10) as usize] = 1;
        }
        assert_eq!(collector.hits(), &expected);
        Ok(())
    }

    #[test]
    fn test_unresolved_landmark_contributes_nothing() -> Result<()> {
        let mut collector = AnchorCoverage::new(Window::around(Landmark::Fr4End));
        collector.put(&record(&[(0, 1000)], &[(Landmark::Cdr3Begin, 500)]))?;

        assert_eq!(collector.hits(), &[0; 81]);
        assert_eq!(*collector.total(), 1);
        Ok(())
    }

    #[test]
    fn test_put_after_end_faults() {
        let mut collector = AnchorCoverage::new(Window::around(Landmark::L1Begin));
        collector.end();
        assert!(collector
            .put(&record(&[(0, 10)], &[(Landmark::L1Begin, 5)]))
            .is_err());
    }

    #[test]
    fn test_report_offsets_are_signed() -> Result<()> {
        let mut collector = AnchorCoverage::new(Window::new(Landmark::L1End, 2, 2));
        collector.put(&record(&[(0, 100)], &[(Landmark::L1End, 50)]))?;
        collector.end();

        let mut report = Vec::new();
        collector.write(&mut report)?;
        assert_eq!(
            String::from_utf8(report)?,
            "L1End[-2:+2]\n-2\t1\t1.0000\n-1\t1\t1.0000\n0\t1\t1.0000\n1\t1\t1.0000\n2\t1\t1.0000\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_absorb_sums_counters() -> Result<()> {
        let window = Window::new(Landmark::Cdr3Begin, 1, 1);
        let mut left = AnchorCoverage::new(window);
        left.put(&record(&[(0, 100)], &[(Landmark::Cdr3Begin, 50)]))?;

        let mut right = AnchorCoverage::new(window);
        right.put(&record(&[(50, 51)], &[(Landmark::Cdr3Begin, 50)]))?;
        right.put(&record(&[(0, 100)], &[]))?;

        left.absorb(right)?;
        assert_eq!(left.hits(), &[1, 2, 1]);
        assert_eq!(*left.total(), 3);

        let mismatched = AnchorCoverage::new(Window::around(Landmark::L1Begin));
        assert!(left.absorb(mismatched).is_err());
        Ok(())
    }
}
