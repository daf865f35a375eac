// src/registry.rs

//! The watch registry and its driver entry point.

use std::time::Instant;

use tracing::debug;

use crate::errors::Result;
use crate::job::builder::WatchBuilder;
use crate::job::runtime::WatchJob;

/// Owns every registered watch job.
///
/// There is no process-wide default registry; callers create a `Watcher`,
/// register jobs through [`Watcher::watch`], and drive it from their own
/// loop via [`Watcher::run_pending`]. Taking `&mut self` in the driver
/// entry point makes overlapping evaluations unrepresentable.
#[derive(Debug, Default)]
pub struct Watcher {
    jobs: Vec<WatchJob>,
}

impl Watcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start configuring a new watch job associated with this registry.
    pub fn watch(&mut self) -> WatchBuilder<'_> {
        WatchBuilder::new(self)
    }

    pub(crate) fn register(&mut self, job: WatchJob) {
        debug!(job = ?job, "registered watch job");
        self.jobs.push(job);
    }

    /// Number of registered jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Evaluate every job whose check period has elapsed.
    ///
    /// Jobs run strictly one after another; a job's post-fire lag delays
    /// everything behind it. Transient file errors are handled inside each
    /// job. An action failure propagates immediately and leaves the
    /// remaining jobs unevaluated for this call; a failing action should be
    /// visible, not swallowed.
    pub fn run_pending(&mut self) -> Result<()> {
        let now = Instant::now();
        for job in &mut self.jobs {
            if !job.is_due(now) {
                continue;
            }
            job.mark_evaluated(now);
            let fired = job.evaluate()?;
            debug!(fired, "evaluated watch job");
        }
        Ok(())
    }
}
