pub use collector::{AnchorCoverage, Collector, CollectorFault, CollectorSet, RegionCoverage};
pub use engine::Engine;
pub use progress::LogProgress;
pub use report::ReportWriter;
pub use targets::{Targets, Window, DEFAULT_MARGIN};

mod collector;
mod engine;
mod progress;
mod report;
mod targets;
