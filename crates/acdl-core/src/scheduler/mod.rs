//! Batch scheduler.
//!
//! Coordinates the pipeline for one run:
//! manifest rows → path planning (skip finished work) → bounded worker pool →
//! extractor → summary.

mod progress;
mod run;

pub use progress::Progress;
pub use run::run_batch;
