//! Manifest loading: the three split CSVs that define what to download.
//!
//! Manifests come from an HTTP(S) base URL (the published AudioCaps CSVs by
//! default) or a local directory holding `train.csv`, `val.csv` and `test.csv`.
//! Loading is all-or-nothing: if any split cannot be read or parsed the run
//! has nothing trustworthy to do and fails before dispatching work.

mod export;
mod fetch;
mod parse;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::split::Split;
use crate::task::TimeWindow;

pub use export::write_available;
pub use fetch::http_get;
pub use parse::parse_manifest;

/// Published AudioCaps manifests.
pub const AUDIOCAPS_BASE_URL: &str =
    "https://raw.githubusercontent.com/cdjkim/audiocaps/master/dataset/";

/// One dataset entry. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub youtube_id: String,
    pub split: Split,
    pub start_seconds: u64,
    /// AudioCaps caption id, carried through to exported manifests.
    pub audiocap_id: Option<String>,
    pub caption: Option<String>,
}

impl ManifestRow {
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::clip_from(self.start_seconds)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("{split} manifest: {source}")]
    Csv {
        split: Split,
        #[source]
        source: csv::Error,
    },
    #[error("{split} manifest line {line}: empty youtube_id")]
    EmptyId { split: Split, line: u64 },
    #[error("{split} manifest line {line}: invalid start time `{value}`")]
    StartTime { split: Split, line: u64, value: String },
}

/// Where the three split manifests live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Base URL; `<base>/<split>.csv` is fetched for each split.
    Url(String),
    /// Local directory containing `<split>.csv` files.
    Dir(PathBuf),
}

impl Default for ManifestSource {
    fn default() -> Self {
        ManifestSource::Url(AUDIOCAPS_BASE_URL.to_string())
    }
}

impl ManifestSource {
    /// Human-readable location of one split's manifest (URL or path).
    pub fn location(&self, split: Split) -> String {
        match self {
            ManifestSource::Url(base) => {
                format!("{}/{}", base.trim_end_matches('/'), split.manifest_file())
            }
            ManifestSource::Dir(dir) => dir.join(split.manifest_file()).display().to_string(),
        }
    }

    /// Reads the raw bytes of one split's manifest.
    pub async fn read(&self, split: Split) -> Result<Vec<u8>> {
        let location = self.location(split);
        match self {
            ManifestSource::Url(_) => {
                let url = location.clone();
                tokio::task::spawn_blocking(move || http_get(&url))
                    .await
                    .context("manifest fetch task join")?
                    .with_context(|| format!("fetch {} manifest from {}", split, location))
            }
            ManifestSource::Dir(_) => tokio::fs::read(&location)
                .await
                .with_context(|| format!("read {} manifest {}", split, location)),
        }
    }

    /// Reads and parses one split.
    pub async fn load_split(&self, split: Split) -> Result<Vec<ManifestRow>> {
        let data = self.read(split).await?;
        let rows = parse_manifest(split, &data)?;
        tracing::debug!(%split, rows = rows.len(), "loaded manifest");
        Ok(rows)
    }

    /// Loads train, val and test (in that order). Any failure is fatal.
    pub async fn load_all(&self) -> Result<Vec<ManifestRow>> {
        let (train, val, test) = tokio::try_join!(
            self.load_split(Split::Train),
            self.load_split(Split::Val),
            self.load_split(Split::Test),
        )?;
        let mut rows = Vec::with_capacity(train.len() + val.len() + test.len());
        rows.extend(train);
        rows.extend(val);
        rows.extend(test);
        Ok(rows)
    }
}
