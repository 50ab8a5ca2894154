//! Per-row download tasks, their outcomes, and the run summary.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::format::{AudioFormat, Quality};
use crate::manifest::ManifestRow;
use crate::plan;
use crate::split::Split;

/// Length of every AudioCaps segment, in seconds.
pub const CLIP_SECONDS: u64 = 10;

/// Half-open clip window `[start, end)` in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_secs: u64,
    pub end_secs: u64,
}

impl TimeWindow {
    pub fn clip_from(start_secs: u64) -> Self {
        Self {
            start_secs,
            end_secs: start_secs.saturating_add(CLIP_SECONDS),
        }
    }

    pub fn len_secs(&self) -> u64 {
        self.end_secs - self.start_secs
    }
}

/// Run-wide settings shared by every task of one `download` call.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub root_path: PathBuf,
    pub format: AudioFormat,
    pub quality: Quality,
    /// Upper bound on concurrent extractor invocations (clamped to at least 1).
    pub n_jobs: usize,
}

/// One unit of work: fetch a single clip into `output_path`.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub youtube_id: String,
    pub split: Split,
    pub format: AudioFormat,
    pub quality: Quality,
    pub time_window: TimeWindow,
    pub output_path: PathBuf,
}

impl DownloadTask {
    pub fn from_row(row: &ManifestRow, settings: &RunSettings) -> Self {
        Self {
            youtube_id: row.youtube_id.clone(),
            split: row.split,
            format: settings.format,
            quality: settings.quality,
            time_window: row.time_window(),
            output_path: plan::plan(
                &settings.root_path,
                row.split,
                &row.youtube_id,
                settings.format,
            ),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        plan::exists(&self.output_path)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Terminal state of a task. There is no path back to pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Succeeded,
    Failed(String),
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Skipped => OutcomeKind::Skipped,
            Outcome::Succeeded => OutcomeKind::Succeeded,
            Outcome::Failed(_) => OutcomeKind::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Skipped,
    Succeeded,
    Failed,
}

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.skipped + self.succeeded + self.failed
    }
}

/// Lock-free counters the workers bump as tasks finish.
#[derive(Debug, Default)]
pub struct SummaryCounters {
    skipped: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl SummaryCounters {
    pub fn record(&self, kind: OutcomeKind) {
        let counter = match kind {
            OutcomeKind::Skipped => &self.skipped,
            OutcomeKind::Succeeded => &self.succeeded,
            OutcomeKind::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> Summary {
        Summary {
            skipped: self.skipped.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
