//! Run a batch of download tasks with a bounded number in flight.
//!
//! Keeps up to `n_jobs` extractor calls running at once; when one finishes,
//! the next pending task is started until the queue is empty.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::extract::Extractor;
use crate::manifest::ManifestRow;
use crate::plan;
use crate::task::{DownloadTask, Outcome, OutcomeKind, RunSettings, Summary, SummaryCounters};

use super::progress::Progress;

/// Processes every row: skips rows whose output already exists, runs the rest
/// through `extractor` with at most `settings.n_jobs` in flight, and returns
/// the counts. Individual failures never stop the batch.
///
/// If `progress_tx` is `Some`, a `Progress` is sent after the skip pass and
/// after every finished task.
pub async fn run_batch(
    rows: &[ManifestRow],
    settings: &RunSettings,
    extractor: Arc<dyn Extractor>,
    progress_tx: Option<tokio::sync::mpsc::Sender<Progress>>,
) -> Summary {
    let started = Instant::now();
    let max_concurrent = settings.n_jobs.max(1);
    let counters = Arc::new(SummaryCounters::default());
    let total = rows.len();

    let mut pending: VecDeque<DownloadTask> = VecDeque::new();
    for row in rows {
        let task = DownloadTask::from_row(row, settings);
        if task.is_satisfied() {
            tracing::debug!(youtube_id = %task.youtube_id, split = %task.split, "already present, skipping");
            counters.record(OutcomeKind::Skipped);
        } else {
            pending.push_back(task);
        }
    }

    let mut done = total - pending.len();
    tracing::info!(
        total,
        skipped = done,
        pending = pending.len(),
        n_jobs = max_concurrent,
        "starting batch"
    );
    report(&progress_tx, done, total, &counters, None).await;

    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(task) = pending.pop_front() else {
                break;
            };
            let extractor = Arc::clone(&extractor);
            let counters = Arc::clone(&counters);
            let root = settings.root_path.clone();
            join_set.spawn(async move {
                let outcome = execute_task(&task, extractor.as_ref(), &root).await;
                counters.record(outcome.kind());
                (task.youtube_id, outcome)
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        done += 1;
        let last = match res {
            Ok(finished) => Some(finished),
            Err(e) => {
                // A panicking worker is one failed item, not a failed batch.
                tracing::error!("download worker join: {}", e);
                counters.record(OutcomeKind::Failed);
                None
            }
        };
        report(&progress_tx, done, total, &counters, last).await;
    }

    let summary = counters.snapshot();
    tracing::info!(
        skipped = summary.skipped,
        succeeded = summary.succeeded,
        failed = summary.failed,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "batch finished"
    );
    summary
}

/// Runs one task to a terminal outcome. Errors become `Outcome::Failed`.
async fn execute_task(task: &DownloadTask, extractor: &dyn Extractor, root: &Path) -> Outcome {
    if let Err(e) = plan::ensure_split_dir(root, task.split) {
        let reason = format!("{:#}", e);
        tracing::warn!(youtube_id = %task.youtube_id, split = %task.split, %reason, "download failed");
        return Outcome::Failed(reason);
    }
    match extractor.invoke(task).await {
        Ok(()) => {
            tracing::debug!(
                youtube_id = %task.youtube_id,
                split = %task.split,
                path = %task.output_path.display(),
                "downloaded"
            );
            Outcome::Succeeded
        }
        Err(e) => {
            let reason = e.to_string();
            tracing::warn!(youtube_id = %task.youtube_id, split = %task.split, %reason, "download failed");
            Outcome::Failed(reason)
        }
    }
}

async fn report(
    tx: &Option<tokio::sync::mpsc::Sender<Progress>>,
    done: usize,
    total: usize,
    counters: &SummaryCounters,
    last: Option<(String, Outcome)>,
) {
    if let Some(tx) = tx {
        let _ = tx
            .send(Progress {
                done,
                total,
                summary: counters.snapshot(),
                last,
            })
            .await;
    }
}
