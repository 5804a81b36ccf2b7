/// Observer notified by the pipeline driver as records flow through a run.
///
/// Implementations must tolerate concurrent calls: the driver reports from
/// whichever worker currently owns the sequential pull point.
pub trait ProgressObserver: Send + Sync {
    /// Periodic liveness report: records pulled so far and, when the source
    /// can estimate it, the completed fraction in [0, 1].
    fn update(&self, records: u64, fraction: Option<f64>);

    /// The run pulled the last record and passed the completion barrier.
    fn finished(&self, records: u64);
}

/// Observer that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct Noop;

impl ProgressObserver for Noop {
    fn update(&self, _records: u64, _fraction: Option<f64>) {}

    fn finished(&self, _records: u64) {}
}
