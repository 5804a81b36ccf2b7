use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use eyre::{eyre, Report, Result};
use rayon::ThreadPool;
use thread_local::ThreadLocal;

use repkit_core_rs::progress::ProgressObserver;
use repkit_core_rs::source::RecordSource;
use repkit_io_rs::archive::Alignment;

use crate::collector::CollectorSet;

/// Records moved from the feed to a worker per lock acquisition.
const BATCH: usize = 64;

/// Observer cadence, in records.
const PROGRESS_CADENCE: u64 = 65_536;

/// The single point of sequential pull over the record source. Workers take
/// turns draining it; nothing else ever touches the source during a run.
struct Feed<'run, S> {
    source: S,
    observer: &'run dyn ProgressObserver,
    pulled: u64,
    next_report: u64,
}

impl<'run, S: RecordSource<Item = Alignment>> Feed<'run, S> {
    fn new(source: S, observer: &'run dyn ProgressObserver) -> Self {
        Self {
            source,
            observer,
            pulled: 0,
            next_report: PROGRESS_CADENCE,
        }
    }

    /// Refill the buffer with up to `limit` records. An empty buffer on
    /// return means the source is exhausted.
    fn refill(&mut self, buffer: &mut Vec<Alignment>, limit: usize) -> Result<()> {
        while buffer.len() < limit {
            match self.source.pull()? {
                Some(record) => {
                    buffer.push(record);
                    self.pulled += 1;
                }
                None => break,
            }
        }
        if self.pulled >= self.next_report {
            self.observer.update(self.pulled, self.source.progress());
            self.next_report = self.pulled + PROGRESS_CADENCE;
        }
        Ok(())
    }
}

/// Bounded-parallelism dispatcher over a sequential record source.
///
/// A fixed pool of workers drains the feed in batches; each worker
/// accumulates into its own zeroed copy of the collector set, so no counter
/// is ever shared between threads mid-run. The `rayon::scope` below is the
/// completion barrier: partials are merged and the set finalized only after
/// every worker has returned and no record remains in flight. Any failure
/// (source read, collector contract) aborts the whole run before
/// finalization, so a partial tally can never masquerade as a report.
pub struct Engine {
    thread_pool: Option<ThreadPool>,
}

impl Engine {
    /// An engine running on the given pool, or on the current rayon context
    /// when no dedicated pool is supplied.
    pub fn new(thread_pool: Option<ThreadPool>) -> Self {
        Self { thread_pool }
    }

    pub fn run<S>(
        &mut self,
        source: S,
        collectors: CollectorSet,
        observer: &dyn ProgressObserver,
    ) -> Result<CollectorSet>
    where
        S: RecordSource<Item = Alignment> + Send,
    {
        match self.thread_pool.take() {
            Some(pool) => {
                let result = pool.install(|| Self::_run(source, collectors, observer));
                self.thread_pool = Some(pool);
                result
            }
            None => Self::_run(source, collectors, observer),
        }
    }

    fn _run<S>(
        source: S,
        mut collectors: CollectorSet,
        observer: &dyn ProgressObserver,
    ) -> Result<CollectorSet>
    where
        S: RecordSource<Item = Alignment> + Send,
    {
        let feed = Mutex::new(Feed::new(source, observer));
        let partials: ThreadLocal<RefCell<CollectorSet>> = ThreadLocal::new();
        let has_failed = AtomicBool::new(false);
        let failure: Mutex<Option<Report>> = Mutex::new(None);

        let fail = |err: Report| {
            log::error!("Coverage analysis failed: {:?}", err);
            if let Ok(mut slot) = failure.lock() {
                slot.get_or_insert(err);
            }
            has_failed.store(true, Ordering::Relaxed);
        };

        let workers = rayon::current_num_threads();
        rayon::scope(|s| {
            for _ in 0..workers {
                s.spawn(|_| {
                    let mut buffer = Vec::with_capacity(BATCH);
                    loop {
                        if has_failed.load(Ordering::Relaxed) {
                            return;
                        }

                        // Take a turn at the single sequential pull point
                        {
                            let Ok(mut feed) = feed.lock() else {
                                has_failed.store(true, Ordering::Relaxed);
                                return;
                            };
                            if let Err(err) = feed.refill(&mut buffer, BATCH) {
                                fail(err);
                                return;
                            }
                        }
                        if buffer.is_empty() {
                            return;
                        }

                        let partial = partials.get_or(|| RefCell::new(collectors.detached()));
                        let mut partial = partial.borrow_mut();
                        for record in buffer.drain(..) {
                            if let Err(err) = partial.put(&record) {
                                fail(err.into());
                                return;
                            }
                        }
                    }
                });
            }
        });

        if has_failed.into_inner() {
            return Err(failure
                .into_inner()
                .ok()
                .flatten()
                .unwrap_or_else(|| eyre!("Coverage analysis failed. See log for details.")));
        }

        // The barrier has passed: no record is in flight, partials are quiescent
        let pulled = feed
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .pulled;
        for partial in partials.into_iter() {
            collectors.absorb(partial.into_inner())?;
        }
        collectors.end();
        observer.finished(pulled);

        Ok(collectors)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(None)
    }
}
