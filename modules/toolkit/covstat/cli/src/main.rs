use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, WrapErr};
use rayon::ThreadPoolBuilder;

use repkit_core_rs::parallelism;
use repkit_covstat_rs::{CollectorSet, Engine, LogProgress, ReportWriter, Targets};
use repkit_io_rs::archive;

/// Worker cap for one run; the host may offer less.
const MAX_THREADS: usize = 4;

const OUTPUT_BUFFER: usize = 32 * 1024;

/// Positional coverage statistics over an alignment archive.
#[derive(Parser, Debug)]
#[command(name = "covstat", version, about)]
struct Args {
    /// Input alignment archive
    input: PathBuf,

    /// Output report path; stdout when omitted
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let reader = archive::Reader::from_path(&args.input)?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(parallelism::available(MAX_THREADS)?)
        .build()?;
    let mut engine = Engine::new(Some(pool));

    let collectors = CollectorSet::from_targets(&Targets::standard());
    let progress = LogProgress::new("analysis");
    let collectors = engine.run(reader, collectors, &progress)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Failed to create the report file: {}", path.display()))?;
            let mut sink = BufWriter::with_capacity(OUTPUT_BUFFER, file);
            ReportWriter::plain().write(&collectors, &mut sink)?;
        }
        None => {
            let stdout = io::stdout();
            ReportWriter::interactive().write(&collectors, &mut stdout.lock())?;
        }
    }
    Ok(())
}
