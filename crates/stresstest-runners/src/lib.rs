//! Stresstest Runners
//!
//! Settings handed to the scheduler that runs stress operations in
//! parallel. The scheduler itself lives elsewhere; this crate only parses
//! and validates its configuration.

pub mod parallel;

pub use parallel::{ParallelRunConfig, RunInParallel, RunnerConfigError};
