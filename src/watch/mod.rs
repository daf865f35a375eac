// src/watch/mod.rs

//! Watch-evaluation primitives.
//!
//! This module is responsible for:
//! - Resolving file / list / folder targets into a tracked set of paths.
//! - Tracking last-observed modification times per file.
//! - Combining per-file predicate outcomes under a quantifier.
//! - The breadcrumb marker that debounces existence triggers.
//!
//! It does **not** know about jobs or scheduling; `job` composes these
//! pieces into one evaluation step.

pub mod breadcrumb;
pub mod condition;
pub mod mtime;
pub mod resolve;

pub use breadcrumb::{is_spent, write_marker, DEFAULT_BREADCRUMB_PATH};
pub use condition::{combine_exists, combine_modified, exists_nonempty, EventKind, Quantifier};
pub use mtime::{observe, MtimeTracker};
pub use resolve::{walk_folder, TrackedSet};
