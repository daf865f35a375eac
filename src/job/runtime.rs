// src/job/runtime.rs

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::errors::{Result, WatcherError};
use crate::job::builder::{TargetSpec, WatchConfig};
use crate::watch::breadcrumb;
use crate::watch::condition::{self, EventKind, Quantifier};
use crate::watch::mtime::MtimeTracker;
use crate::watch::resolve::{walk_folder, TrackedSet};

/// Caller-supplied action, captured at registration time. The closure owns
/// everything it needs; evaluation calls it with no arguments.
pub type Action = Box<dyn FnMut() -> anyhow::Result<()> + Send>;

/// One configured watch: targets, condition, action and per-job state.
///
/// Jobs are created by [`crate::WatchBuilder::run`] and evaluated by
/// [`crate::Watcher::run_pending`] until the process ends; there is no way
/// to remove one.
pub struct WatchJob {
    /// Set for folder-backed jobs; the tracked set is re-walked from here
    /// on every modification cycle.
    folder: Option<PathBuf>,
    tracked: TrackedSet,
    mtimes: MtimeTracker,
    quantifier: Quantifier,
    event: EventKind,
    check_period: Duration,
    lag: Duration,
    breadcrumb: PathBuf,
    label: String,
    action: Action,
    last_evaluated: Option<Instant>,
}

impl std::fmt::Debug for WatchJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchJob")
            .field("label", &self.label)
            .field("event", &self.event)
            .field("quantifier", &self.quantifier)
            .field("tracked", &self.tracked.len())
            .finish_non_exhaustive()
    }
}

impl WatchJob {
    pub(crate) fn from_config(config: WatchConfig, action: Action) -> Result<Self> {
        let event = config.event.ok_or_else(|| {
            WatcherError::Config("no event kind selected (exists or modified)".to_string())
        })?;

        let (folder, initial) = match config.target {
            TargetSpec::None => (None, Vec::new()),
            TargetSpec::List(paths) => (None, paths),
            TargetSpec::Folder(path) => {
                let files = walk_folder(&path);
                (Some(path), files)
            }
        };

        let tracked = TrackedSet::from_paths(initial);

        // Baseline files that already exist so only changes made after
        // registration count. Files appearing later have no baseline and
        // fire as first-sight events.
        let mut mtimes = MtimeTracker::new();
        if event == EventKind::Modified {
            for path in tracked.iter() {
                mtimes.seed(path);
            }
        }

        Ok(Self {
            folder,
            tracked,
            mtimes,
            quantifier: config.quantifier,
            event,
            check_period: config.check_period,
            lag: config.lag,
            breadcrumb: config.breadcrumb,
            label: config.label,
            action,
            last_evaluated: None,
        })
    }

    /// Whether `check_period` has elapsed since the last evaluation. A job
    /// that has never been evaluated is always due.
    pub(crate) fn is_due(&self, now: Instant) -> bool {
        match self.last_evaluated {
            None => true,
            Some(at) => now.duration_since(at) >= self.check_period,
        }
    }

    pub(crate) fn mark_evaluated(&mut self, now: Instant) {
        self.last_evaluated = Some(now);
    }

    /// Evaluate the watch condition once, firing the action if it holds.
    ///
    /// Returns whether the action ran. Files that vanish mid-cycle are
    /// skipped for this cycle only; action failures propagate.
    pub fn evaluate(&mut self) -> Result<bool> {
        match self.event {
            EventKind::Exists => self.evaluate_exists(),
            EventKind::Modified => self.evaluate_modified(),
        }
    }

    fn evaluate_exists(&mut self) -> Result<bool> {
        // No pruning here: a vanished path must stay tracked so its absence
        // remains observable through the predicate.
        let outcomes: Vec<bool> = self
            .tracked
            .iter()
            .map(|path| condition::exists_nonempty(path))
            .collect();

        if !condition::combine_exists(self.quantifier, &outcomes) {
            return Ok(false);
        }

        if breadcrumb::is_spent(&self.breadcrumb) {
            debug!(
                label = %self.label,
                breadcrumb = %self.breadcrumb.display(),
                "existence condition holds but breadcrumb is present, suppressing"
            );
            return Ok(false);
        }

        breadcrumb::write_marker(&self.breadcrumb, &self.label, self.lag)?;
        self.fire()
    }

    fn evaluate_modified(&mut self) -> Result<bool> {
        if let Some(folder) = &self.folder {
            self.tracked.refresh_from_folder(folder, &mut self.mtimes);
        } else {
            self.tracked.prune_missing(&mut self.mtimes);
        }

        // Fixed at cycle start: files vanishing below shrink the evaluated
        // subset but not this count, so AllOf cannot be satisfied by a
        // disappearance.
        let cycle_size = self.tracked.len();

        let mut modified: Vec<PathBuf> = Vec::new();
        for path in self.tracked.iter() {
            match self.mtimes.was_modified(path) {
                Ok(true) => modified.push(path.clone()),
                Ok(false) => {}
                Err(err) => {
                    // Vanished between pruning and stat. Skip it this cycle;
                    // the next prune drops it for good.
                    debug!(path = %path.display(), %err, "file vanished mid-cycle, skipping");
                }
            }
        }

        if !condition::combine_modified(self.quantifier, modified.len(), cycle_size) {
            return Ok(false);
        }

        info!(label = %self.label, ?modified, "detected modification");
        self.fire()
    }

    fn fire(&mut self) -> Result<bool> {
        if !self.lag.is_zero() {
            // Deliberate blocking pause before the action runs. It stalls
            // the whole driver loop, which keeps evaluation strictly serial
            // at the cost of responsiveness of every other job.
            thread::sleep(self.lag);
        }
        info!(label = %self.label, "watch condition met, running action");
        (self.action)().map_err(WatcherError::Action)?;
        Ok(true)
    }
}
