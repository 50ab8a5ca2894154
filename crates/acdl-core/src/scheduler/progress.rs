//! Progress reporting for a batch (tasks done, running counts).
//!
//! Used by the scheduler to report progress to the CLI.

use crate::task::{Outcome, Summary};

/// Snapshot of batch progress (CLI-friendly).
#[derive(Debug, Clone)]
pub struct Progress {
    /// Tasks that reached a terminal state, skips included.
    pub done: usize,
    /// Total number of manifest rows in the batch.
    pub total: usize,
    /// Counts so far.
    pub summary: Summary,
    /// Id and outcome of the task that just finished; `None` for the bulk
    /// report of skipped rows.
    pub last: Option<(String, Outcome)>,
}

impl Progress {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.done as f64 / self.total as f64).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.done >= self.total
    }
}
