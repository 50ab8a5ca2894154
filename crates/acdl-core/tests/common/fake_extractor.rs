//! Instrumented in-process extractor.
//!
//! Writes a small file at the task's output path, or fails for ids listed in
//! `fail_ids` with a yt-dlp style diagnostic, or panics for ids in `panic_ids`. Tracks how many invocations are
//! in flight so tests can check the concurrency bound.

use acdl_core::extract::{ExtractError, Extractor};
use acdl_core::task::{DownloadTask, TimeWindow};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct FakeExtractor {
    fail_ids: HashSet<String>,
    panic_ids: HashSet<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<(String, TimeWindow)>>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, ids: &[&str]) -> Self {
        self.fail_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn panicking(mut self, ids: &[&str]) -> Self {
        self.panic_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, TimeWindow)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn invoke(&self, task: &DownloadTask) -> Result<(), ExtractError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap()
            .push((task.youtube_id.clone(), task.time_window));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.panic_ids.contains(&task.youtube_id) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("extractor crashed on {}", task.youtube_id);
        }

        let result = if self.fail_ids.contains(&task.youtube_id) {
            Err(ExtractError::Exit {
                program: "yt-dlp".to_string(),
                status: "exit status: 1".to_string(),
                diagnostic: format!("ERROR: [youtube] {}: Video unavailable", task.youtube_id),
            })
        } else {
            std::fs::write(&task.output_path, b"OggS").map_err(|source| ExtractError::Spawn {
                program: "fake".to_string(),
                source,
            })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
