//! `yt-dlp` sub-process extractor.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use super::{ExtractError, Extractor};
use crate::plan;
use crate::task::DownloadTask;

/// Keep the tail of long tool output; the last lines carry the actual error.
const DIAGNOSTIC_MAX_BYTES: usize = 2048;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Runs `yt-dlp` once per task, extracting audio and trimming it with ffmpeg
/// post-processor arguments. The tool writes a staging file that is renamed
/// onto `output_path` only after a clean exit.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    leading_args: Vec<String>,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before the generated ones (e.g. `-m yt_dlp` when the
    /// program is a Python interpreter).
    pub fn with_leading_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Full argument list for one task writing to `dest`, leading args included.
    pub(crate) fn args_for(&self, task: &DownloadTask, dest: &Path) -> Vec<OsString> {
        let window = task.time_window;
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.extend(
            [
                "-x".to_string(),
                "--audio-format".to_string(),
                task.format.codec().to_string(),
                "--audio-quality".to_string(),
                task.quality.to_string(),
                "--no-playlist".to_string(),
                "--no-progress".to_string(),
                "--postprocessor-args".to_string(),
                format!("ffmpeg:-ss {} -to {}", window.start_secs, window.end_secs),
                "--output".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(output_template(dest));
        args.push(OsString::from(format!("{}{}", WATCH_URL, task.youtube_id)));
        args
    }
}

#[async_trait]
impl Extractor for YtDlp {
    async fn invoke(&self, task: &DownloadTask) -> Result<(), ExtractError> {
        let staging = plan::staging_path(&task.output_path);
        tracing::debug!(
            youtube_id = %task.youtube_id,
            output = %task.output_path.display(),
            staging = %staging.display(),
            start = task.time_window.start_secs,
            clip_secs = task.time_window.len_secs(),
            "running extractor"
        );
        let result = self.run_to(task, &staging).await;
        if result.is_err() {
            discard_staging(&staging).await;
        }
        result
    }
}

impl YtDlp {
    async fn run_to(&self, task: &DownloadTask, staging: &Path) -> Result<(), ExtractError> {
        let output = tokio::process::Command::new(&self.program)
            .args(self.args_for(task, staging))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ExtractError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::Exit {
                program: self.program_name(),
                status: output.status.to_string(),
                diagnostic: diagnostic_text(&output.stdout, &output.stderr),
            });
        }
        if !staging.exists() {
            return Err(ExtractError::MissingOutput {
                program: self.program_name(),
                path: task.output_path.clone(),
                diagnostic: diagnostic_text(&output.stdout, &output.stderr),
            });
        }
        tokio::fs::rename(staging, &task.output_path)
            .await
            .map_err(|source| ExtractError::Finalize {
                path: task.output_path.clone(),
                source,
            })
    }
}

async fn discard_staging(staging: &Path) {
    match tokio::fs::remove_file(staging).await {
        Ok(()) => tracing::debug!(path = %staging.display(), "removed staging file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %staging.display(), "remove staging file: {}", e),
    }
}

/// `--output` is a template; a literal `%` must be doubled.
fn output_template(path: &Path) -> OsString {
    match path.to_str() {
        Some(s) => OsString::from(s.replace('%', "%%")),
        None => path.as_os_str().to_owned(),
    }
}

/// Stderr if the tool wrote any, otherwise stdout, trimmed to the last
/// `DIAGNOSTIC_MAX_BYTES`.
fn diagnostic_text(stdout: &[u8], stderr: &[u8]) -> String {
    let err = String::from_utf8_lossy(stderr);
    let text = if err.trim().is_empty() {
        String::from_utf8_lossy(stdout).trim().to_string()
    } else {
        err.trim().to_string()
    };
    if text.is_empty() {
        return "(no output)".to_string();
    }
    if text.len() <= DIAGNOSTIC_MAX_BYTES {
        return text;
    }
    let mut start = text.len() - DIAGNOSTIC_MAX_BYTES;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
