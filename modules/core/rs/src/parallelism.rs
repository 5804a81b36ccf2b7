use std::thread::available_parallelism;

use eyre::Result;

fn _clamp(requested: usize, max: usize) -> usize {
    requested.clamp(1, max)
}

/// Worker count for a run: the requested parallelism clamped to what the host
/// actually offers, and never below one.
pub fn available(requested: usize) -> Result<usize> {
    let max = available_parallelism()?.get();
    Ok(_clamp(requested, max))
}
