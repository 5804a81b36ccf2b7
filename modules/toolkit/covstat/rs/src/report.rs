use std::io::Write;

use eyre::{Result, WrapErr};

use crate::collector::CollectorSet;

/// Renders the final report: every collector fragment in construction order,
/// fully flushed before returning. A failed write is fatal; the caller must
/// not treat the sink's content as a valid report afterwards.
#[derive(Clone, Copy, Debug)]
pub struct ReportWriter {
    interactive: bool,
}

impl ReportWriter {
    /// Writer for a file or pipe sink.
    pub fn plain() -> Self {
        Self { interactive: false }
    }

    /// Writer for an interactive sink: a leading blank line separates the
    /// report from whatever the terminal printed last.
    pub fn interactive() -> Self {
        Self { interactive: true }
    }

    pub fn write(&self, collectors: &CollectorSet, sink: &mut impl Write) -> Result<()> {
        if self.interactive {
            writeln!(sink).wrap_err("Failed to write the coverage report")?;
        }
        collectors
            .write(sink)
            .wrap_err("Failed to write the coverage report")?;
        sink.flush().wrap_err("Failed to flush the coverage report")
    }
}
