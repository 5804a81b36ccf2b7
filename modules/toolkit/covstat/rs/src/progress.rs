use repkit_core_rs::progress::ProgressObserver;

/// Observer that forwards run liveness to the `log` facade.
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressObserver for LogProgress {
    fn update(&self, records: u64, fraction: Option<f64>) {
        match fraction {
            Some(fraction) => log::info!(
                "{}: {} records processed ({:.1}%)",
                self.label,
                records,
                fraction * 100.0
            ),
            None => log::info!("{}: {} records processed", self.label, records),
        }
    }

    fn finished(&self, records: u64) {
        log::info!("{}: finished, {} records total", self.label, records);
    }
}
