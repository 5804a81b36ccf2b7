use eyre::{ensure, eyre, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};

use repkit_core_rs::loc::Interval;
use repkit_core_rs::progress::Noop;
use repkit_core_rs::repseq::{Landmark, Partitioning};
use repkit_core_rs::source::{IterSource, RecordSource};
use repkit_covstat_rs::{CollectorSet, Engine, ReportWriter, Targets};
use repkit_io_rs::archive::Alignment;

fn lcg(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 33
}

/// Deterministic synthetic dataset: reads over a ~450 nt frame with most
/// landmarks resolved and 1-3 aligned spans each.
fn simulated(records: usize, seed: u64) -> Vec<Alignment> {
    let mut state = seed;
    let mut dataset = Vec::with_capacity(records);
    for _ in 0..records {
        let mut partitioning = Partitioning::new();
        for (ind, landmark) in Landmark::ALL.into_iter().enumerate() {
            // Roughly 1 in 8 landmarks is left unresolved
            if lcg(&mut state) % 8 == 0 {
                continue;
            }
            let pos = ind as u64 * 30 + lcg(&mut state) % 10;
            partitioning.set(landmark, pos as u32);
        }

        let mut spans = Vec::new();
        for _ in 0..(1 + lcg(&mut state) % 3) {
            let start = lcg(&mut state) % 300;
            let length = 20 + lcg(&mut state) % 80;
            spans.push(Interval::new(start as u32, (start + length) as u32).unwrap());
        }
        dataset.push(Alignment::new(spans, partitioning));
    }
    dataset
}

fn shuffled(mut records: Vec<Alignment>, seed: u64) -> Vec<Alignment> {
    let mut state = seed;
    for ind in (1..records.len()).rev() {
        let other = (lcg(&mut state) as usize) % (ind + 1);
        records.swap(ind, other);
    }
    records
}

fn pool(threads: usize) -> ThreadPool {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("Failed to build a thread pool")
}

fn run(records: Vec<Alignment>, threads: usize) -> Result<CollectorSet> {
    let mut engine = Engine::new(Some(pool(threads)));
    let collectors = CollectorSet::from_targets(&Targets::standard());
    engine.run(IterSource::new(records), collectors, &Noop)
}

fn render(collectors: &CollectorSet) -> Result<String> {
    let mut sink = Vec::new();
    ReportWriter::plain().write(collectors, &mut sink)?;
    Ok(String::from_utf8(sink)?)
}

#[test]
fn commutativity_under_shuffling() -> Result<()> {
    let records = simulated(2000, 42);
    let baseline = render(&run(records.clone(), 1)?)?;

    for seed in [7, 19, 1231] {
        let report = render(&run(shuffled(records.clone(), seed), 1)?)?;
        ensure!(
            report == baseline,
            "Report depends on the input order (shuffle seed {})",
            seed
        );
    }
    Ok(())
}

#[test]
fn non_interference_across_parallelism() -> Result<()> {
    let records = simulated(5000, 13);
    let sequential = render(&run(records.clone(), 1)?)?;
    let parallel = render(&run(records, 4)?)?;

    ensure!(
        sequential == parallel,
        "Parallel run diverged from the sequential baseline"
    );
    Ok(())
}

#[test]
fn fanout_completeness() -> Result<()> {
    let records = simulated(3000, 3);
    let collectors = run(records, 4)?;

    ensure!(collectors.len() == 24, "Unexpected collector count");
    for collector in collectors.collectors() {
        ensure!(
            collector.total() == 3000,
            "Collector {} saw {} of 3000 records",
            collector.label(),
            collector.total()
        );
    }
    Ok(())
}

#[test]
fn empty_input_yields_all_zero_report() -> Result<()> {
    let collectors = run(Vec::new(), 4)?;
    for collector in collectors.collectors() {
        ensure!(collector.total() == 0);
    }

    let report = render(&collectors)?;
    for collector in collectors.collectors() {
        ensure!(
            report.contains(&format!("{}\n", collector.label())),
            "Fragment {} missing from the report",
            collector.label()
        );
    }
    for line in report.lines() {
        let mut fields = line.split('\t');
        if let (Some(_), Some(count)) = (fields.next(), fields.next()) {
            ensure!(count == "0", "Non-zero count on empty input: {}", line);
        }
    }
    Ok(())
}

#[test]
fn single_record_covers_its_region_exactly() -> Result<()> {
    // One alignment spanning the whole read; CDR3 resolved at [100, 110)
    let record = Alignment::new(
        vec![Interval::new(0, 300).unwrap()],
        [(Landmark::Cdr3Begin, 100), (Landmark::Fr4Begin, 110)]
            .into_iter()
            .collect(),
    );
    let report = render(&run(vec![record], 4)?)?;

    let fragment = report
        .split("\n\n")
        .find(|fragment| fragment.starts_with("CDR3\n"))
        .ok_or_else(|| eyre!("CDR3 fragment missing"))?;
    let lines: Vec<_> = fragment.lines().collect();
    ensure!(lines.len() == 11, "Expected 10 positions, got {:?}", lines);
    for (pos, line) in lines[1..].iter().enumerate() {
        ensure!(
            *line == format!("{}\t1\t1.0000", pos),
            "Unexpected line for position {}: {}",
            pos,
            line
        );
    }
    Ok(())
}

struct FailingSource {
    remaining: usize,
}

impl RecordSource for FailingSource {
    type Item = Alignment;

    fn pull(&mut self) -> Result<Option<Alignment>> {
        if self.remaining == 0 {
            return Err(eyre!("simulated read failure"));
        }
        self.remaining -= 1;
        Ok(Some(Alignment::new(
            vec![Interval::new(0, 100).unwrap()],
            Partitioning::new(),
        )))
    }
}

#[test]
fn source_failure_aborts_the_run() {
    let mut engine = Engine::new(Some(pool(4)));
    let collectors = CollectorSet::from_targets(&Targets::standard());
    let result = engine.run(FailingSource { remaining: 500 }, collectors, &Noop);

    let err = result.err().expect("A failing source must abort the run");
    assert!(format!("{:?}", err).contains("simulated read failure"));
}
