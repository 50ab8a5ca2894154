//! Extraction: fetch, transcode and trim one clip with an external tool.
//!
//! A failure here belongs to one item only. It is returned as a value and
//! turned into `Outcome::Failed` by the scheduler; it never ends the run.

mod ytdlp;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::task::DownloadTask;

pub use ytdlp::YtDlp;

/// Anything that can materialize one `DownloadTask` at its `output_path`.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Produces `task.output_path` or reports why it could not.
    /// Must not retry internally, and must not leave a file at `output_path`
    /// when it returns an error.
    async fn invoke(&self, task: &DownloadTask) -> Result<(), ExtractError>;
}

/// Why a single extraction failed. The diagnostic text is the tool's own
/// output and is not interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {diagnostic}")]
    Exit {
        program: String,
        status: String,
        diagnostic: String,
    },
    #[error("{program} succeeded but {} is missing: {diagnostic}", path.display())]
    MissingOutput {
        program: String,
        path: PathBuf,
        diagnostic: String,
    },
    #[error("could not move finished file to {}: {source}", path.display())]
    Finalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
