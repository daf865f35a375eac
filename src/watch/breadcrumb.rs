// src/watch/breadcrumb.rs

//! Debounce marker ("breadcrumb") for existence watches.
//!
//! The marker is a plain text file whose existence alone means "the
//! existence condition already fired once". Its content is an informational
//! status line; only the file's presence is load-bearing. The crate never
//! deletes the marker, so removing it by hand re-arms the job.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

/// Default marker location, relative to the current working directory.
pub const DEFAULT_BREADCRUMB_PATH: &str = ".pollwatch/breadcrumb.txt";

/// Whether the marker already exists, i.e. the job is spent.
pub fn is_spent(path: &Path) -> bool {
    path.exists()
}

/// Write the marker, creating parent directories as needed.
///
/// The check in [`is_spent`] and this write are not atomic; the
/// single-threaded driver contract keeps that from being a race.
pub fn write_marker(path: &Path, action_label: &str, lag: Duration) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating breadcrumb directory {:?}", parent))?;
        }
    }

    let now = chrono::Local::now().format("%H:%M");
    let mut file =
        File::create(path).with_context(|| format!("creating breadcrumb file {:?}", path))?;
    writeln!(
        file,
        "Found everything in the watchlist at {now}. {action_label} will start in {} seconds.",
        lag.as_secs()
    )
    .with_context(|| format!("writing breadcrumb file {:?}", path))?;

    info!(path = %path.display(), "wrote breadcrumb marker");
    Ok(())
}
