// src/watch/mtime.rs

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

/// Stat a file's modification time.
///
/// Fails with `NotFound` if the file vanished between the resolver's pruning
/// step and this call; the caller treats that as a benign race and skips the
/// file for the current cycle only.
pub fn observe(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// Last-observed modification timestamp per tracked file.
///
/// A file with no entry has never been observed existing; its first
/// observation is reported as a change, so a brand-new file is detected even
/// though it has no prior baseline.
#[derive(Debug, Default)]
pub struct MtimeTracker {
    last_seen: HashMap<PathBuf, SystemTime>,
}

impl MtimeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` changed since the last observation, updating the
    /// stored record either way.
    ///
    /// Comparison is exact equality of modification time, not "newer than".
    /// Two writes within the filesystem's mtime granularity are
    /// indistinguishable from no change.
    pub fn was_modified(&mut self, path: &Path) -> io::Result<bool> {
        let current = observe(path)?;
        match self.last_seen.get(path) {
            None => {
                debug!(path = %path.display(), "first sight, counts as modified");
                self.last_seen.insert(path.to_path_buf(), current);
                Ok(true)
            }
            Some(&previous) if previous != current => {
                self.last_seen.insert(path.to_path_buf(), current);
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Record the current mtime for `path` without reporting a change.
    ///
    /// Used at registration time so files that already exist only fire on
    /// changes made after the watch was set up. A path that cannot be
    /// statted is left without a record and will fire as a first-sight
    /// event when it appears.
    pub fn seed(&mut self, path: &Path) {
        if let Ok(mtime) = observe(path) {
            self.last_seen.insert(path.to_path_buf(), mtime);
        }
    }

    /// Drop the record for a path that left the tracked set. A later
    /// recreation of the file is then a fresh first-sight event.
    pub fn forget(&mut self, path: &Path) {
        self.last_seen.remove(path);
    }

    /// Number of files with a recorded baseline.
    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }
}
