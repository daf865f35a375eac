// src/job/mod.rs

//! Watch job configuration and runtime.
//!
//! `builder` holds the immutable configuration surface; `runtime` is the
//! registered job with its per-cycle state and the single evaluation entry
//! point the registry drives.

pub mod builder;
pub mod runtime;

pub use builder::{TargetSpec, WatchBuilder, WatchConfig};
pub use runtime::{Action, WatchJob};
