// src/lib.rs

//! `pollwatch` — polling-based file and folder watcher.
//!
//! A [`Watcher`] owns a set of watch jobs. Each job tracks a single file, an
//! explicit list of files, or a recursively walked folder, and fires a
//! caller-supplied action when its condition holds: the targets exist (with
//! non-zero size), or their modification time changed since the last check.
//!
//! The crate does no scheduling of its own. The caller's loop invokes
//! [`Watcher::run_pending`] on whatever cadence it likes (typically about
//! once per second); each job re-evaluates when its own check period has
//! elapsed.
//!
//! ```no_run
//! use std::time::Duration;
//! use pollwatch::{EventKind, Quantifier, Watcher};
//!
//! fn main() -> pollwatch::Result<()> {
//!     let mut watcher = Watcher::new();
//!
//!     watcher
//!         .watch()
//!         .files(["results/a.csv", "results/b.csv"], Quantifier::AllOf)
//!         .on(EventKind::Exists)
//!         .lag(Duration::from_secs(2))
//!         .label("collect results")
//!         .run(|| {
//!             println!("all results are in");
//!             Ok(())
//!         })?;
//!
//!     loop {
//!         watcher.run_pending()?;
//!         std::thread::sleep(Duration::from_secs(1));
//!     }
//! }
//! ```
//!
//! Existence watches debounce through an on-disk marker file (the
//! "breadcrumb"): once the condition has fired, the job stays spent until
//! the marker is deleted by hand.

pub mod errors;
pub mod job;
pub mod logging;
pub mod registry;
pub mod watch;

pub use errors::{Result, WatcherError};
pub use job::{TargetSpec, WatchBuilder, WatchConfig, WatchJob};
pub use registry::Watcher;
pub use watch::{EventKind, Quantifier, DEFAULT_BREADCRUMB_PATH};
