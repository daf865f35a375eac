// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

/// Errors surfaced by watch registration and evaluation.
///
/// Transient conditions (a tracked file vanishing between the pruning step
/// and the stat call) never show up here; they are logged and the file is
/// skipped for that cycle only.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Invalid configuration, raised at registration time rather than
    /// deferred to evaluation.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied action failed. Propagated to the driver so a bad
    /// action is visible instead of silently swallowed.
    #[error("watch action failed: {0}")]
    Action(#[source] anyhow::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WatcherError>;
