// src/job/builder.rs

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::errors::{Result, WatcherError};
use crate::job::runtime::WatchJob;
use crate::registry::Watcher;
use crate::watch::breadcrumb::DEFAULT_BREADCRUMB_PATH;
use crate::watch::condition::{EventKind, Quantifier};

/// What a job watches, fixed at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// No target selected yet. A job registered like this evaluates an
    /// empty tracked set, which never fires.
    None,
    /// An explicit list of paths; a single-file selection is a one-element
    /// list.
    List(Vec<PathBuf>),
    /// A folder whose contents are re-walked on every evaluation.
    Folder(PathBuf),
}

/// Immutable snapshot of a job's configuration.
///
/// Built step by step by [`WatchBuilder`] and turned into a [`WatchJob`] at
/// registration time; nothing aliases it afterwards.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub target: TargetSpec,
    pub quantifier: Quantifier,
    /// Must be selected before finalization.
    pub event: Option<EventKind>,
    /// How often `run_pending` re-evaluates the job.
    pub check_period: Duration,
    /// Pause between condition satisfaction and running the action.
    pub lag: Duration,
    /// Marker path for existence watches.
    pub breadcrumb: PathBuf,
    /// Human-readable name used in logs and the breadcrumb status line.
    pub label: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            target: TargetSpec::None,
            quantifier: Quantifier::OneOf,
            event: None,
            check_period: Duration::from_secs(1),
            lag: Duration::ZERO,
            breadcrumb: PathBuf::from(DEFAULT_BREADCRUMB_PATH),
            label: "watch action".to_string(),
        }
    }
}

/// Fluent, by-value configuration for a new watch job.
///
/// Obtained from [`Watcher::watch`]; the builder stays associated with that
/// registry and [`WatchBuilder::run`] registers the finished job there.
/// Configuration calls may come in any order, but `run` must be last.
///
/// A builder created with [`WatchBuilder::detached`] can be configured but
/// not finalized, mirroring the rule that registration requires a registry.
pub struct WatchBuilder<'w> {
    watcher: Option<&'w mut Watcher>,
    config: WatchConfig,
}

impl<'w> WatchBuilder<'w> {
    pub(crate) fn new(watcher: &'w mut Watcher) -> Self {
        Self {
            watcher: Some(watcher),
            config: WatchConfig::default(),
        }
    }

    /// Builder without a registry association; calling `run` on it fails
    /// with a configuration error.
    pub fn detached() -> WatchBuilder<'static> {
        WatchBuilder {
            watcher: None,
            config: WatchConfig::default(),
        }
    }

    /// Watch a single file.
    ///
    /// A path that does not currently exist is a warning, not an error; the
    /// target selection is left unchanged so registration never aborts for
    /// one bad path.
    pub fn file(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            warn!(path = %path.display(), "file does not exist, leaving watch target unchanged");
            return self;
        }
        self.files([path], Quantifier::OneOf)
    }

    /// Watch an explicit list of paths under the given quantifier.
    ///
    /// Existence is not required at registration time; duplicates are
    /// dropped, keeping first-occurrence order.
    pub fn files<I, P>(mut self, paths: I, quantifier: Quantifier) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut list: Vec<PathBuf> = Vec::new();
        for path in paths {
            let path = path.into();
            if !list.contains(&path) {
                list.push(path);
            }
        }
        self.config.target = TargetSpec::List(list);
        self.config.quantifier = quantifier;
        self
    }

    /// Watch every file under `path`, recursively, re-walking the folder on
    /// each evaluation so later additions and deletions are picked up.
    ///
    /// Fails immediately if `path` is not a directory.
    pub fn folder(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(WatcherError::Config(format!(
                "folder path {:?} is not a directory",
                path
            )));
        }
        self.config.target = TargetSpec::Folder(path);
        self.config.quantifier = Quantifier::OneOf;
        Ok(self)
    }

    /// Select the event that triggers the action.
    pub fn on(mut self, event: EventKind) -> Self {
        self.config.event = Some(event);
        self
    }

    /// How often [`Watcher::run_pending`] re-evaluates this job.
    /// Defaults to one second.
    pub fn check_period(mut self, period: Duration) -> Self {
        self.config.check_period = period;
        self
    }

    /// Delay between condition satisfaction and running the action.
    ///
    /// The sleep happens inside the evaluation step, so a large lag stalls
    /// the whole driver loop, not just this job.
    pub fn lag(mut self, lag: Duration) -> Self {
        self.config.lag = lag;
        self
    }

    /// Where the existence marker is written. Only meaningful for
    /// [`EventKind::Exists`] jobs.
    pub fn breadcrumb(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.breadcrumb = path.into();
        self
    }

    /// Human-readable name used in logs and the breadcrumb status line.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Finalize: capture the action, build the runtime job and register it
    /// with the associated watcher.
    ///
    /// Fails if the builder has no registry association or no event kind
    /// was selected.
    pub fn run<F>(self, action: F) -> Result<()>
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        let Some(watcher) = self.watcher else {
            return Err(WatcherError::Config(
                "unable to add watcher job: job is not associated with a watcher".to_string(),
            ));
        };
        let job = WatchJob::from_config(self.config, Box::new(action))?;
        watcher.register(job);
        Ok(())
    }
}
