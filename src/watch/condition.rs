// src/watch/condition.rs

use std::fs;
use std::path::Path;

/// How per-file predicate outcomes combine into a job-level fire decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Fire if any tracked file satisfies the predicate.
    OneOf,
    /// Fire only if every tracked file satisfies the predicate.
    AllOf,
}

/// Which per-file predicate a job evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// File exists and has non-zero size.
    Exists,
    /// File modification time changed since the last observation.
    Modified,
}

/// Existence predicate: the file exists *and* has a non-zero size.
///
/// A zero-length file counts as not yet present, so a file that was just
/// created but not yet written does not trigger mid-write.
pub fn exists_nonempty(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

/// Combine per-file outcomes for an existence check.
///
/// An empty tracked set never fires; `all` over nothing is vacuously true,
/// which is not what a watch over zero files should mean.
pub fn combine_exists(quantifier: Quantifier, outcomes: &[bool]) -> bool {
    if outcomes.is_empty() {
        return false;
    }
    match quantifier {
        Quantifier::OneOf => outcomes.iter().any(|&b| b),
        Quantifier::AllOf => outcomes.iter().all(|&b| b),
    }
}

/// Combine the modified-file count for a modification check.
///
/// `tracked` is the size of the tracked set at the start of the cycle.
/// Files that vanished mid-cycle are missing from `modified` but still
/// counted in `tracked`, so a disappearing file can never satisfy `AllOf`.
pub fn combine_modified(quantifier: Quantifier, modified: usize, tracked: usize) -> bool {
    if tracked == 0 {
        return false;
    }
    match quantifier {
        Quantifier::OneOf => modified > 0,
        Quantifier::AllOf => modified == tracked,
    }
}
