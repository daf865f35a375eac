// src/watch/resolve.rs

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::watch::mtime::MtimeTracker;

/// Recursively list every file under `root`, subdirectories included.
///
/// Unreadable entries are skipped rather than failing the walk; a folder
/// watch keeps going even if a subtree is momentarily inaccessible.
pub fn walk_folder(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Ordered, duplicate-free set of paths observed by one watch job.
#[derive(Debug, Default)]
pub struct TrackedSet {
    files: Vec<PathBuf>,
}

impl TrackedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        let mut set = Self::new();
        set.extend(paths);
        set
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }

    /// Add paths, keeping insertion order and dropping duplicates.
    pub fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        for path in paths {
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }
    }

    /// Drop entries that no longer exist, together with their mtime records,
    /// so a deleted-then-recreated file is a fresh first-sight event.
    ///
    /// Called at the start of a modification cycle, never mid-evaluation.
    /// Existence watches must not prune: the predicate itself observes
    /// existence, and a vanished path has to stay checkable.
    pub fn prune_missing(&mut self, mtimes: &mut MtimeTracker) {
        let (kept, removed): (Vec<PathBuf>, Vec<PathBuf>) =
            self.files.drain(..).partition(|p| p.exists());

        if !removed.is_empty() {
            warn!(?removed, "paths no longer exist, removed from watch list");
            for path in &removed {
                mtimes.forget(path);
            }
        }

        self.files = kept;
    }

    /// Re-resolve a folder-backed set: pick up files added since the last
    /// cycle and drop the ones that disappeared.
    pub fn refresh_from_folder(&mut self, folder: &Path, mtimes: &mut MtimeTracker) {
        self.extend(walk_folder(folder));
        self.prune_missing(mtimes);
    }
}
