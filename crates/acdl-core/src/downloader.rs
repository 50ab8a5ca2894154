//! Dataset downloader: the entry point tying manifests to the scheduler.
//!
//! `Downloader::new` prepares `root/{train,val,test}`; each `download` call
//! loads all three manifests (fatal on failure), runs the batch, and logs a
//! per-split census of files on disk.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::extract::{Extractor, YtDlp};
use crate::format::{AudioFormat, Quality};
use crate::manifest::{self, ManifestSource};
use crate::plan;
use crate::scheduler::{self, Progress};
use crate::split::Split;
use crate::task::{RunSettings, Summary};

pub struct Downloader {
    root_path: PathBuf,
    n_jobs: usize,
    source: ManifestSource,
    extractor: Arc<dyn Extractor>,
    export_available: bool,
}

impl std::fmt::Debug for Downloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Downloader")
            .field("root_path", &self.root_path)
            .field("n_jobs", &self.n_jobs)
            .field("source", &self.source)
            .field("export_available", &self.export_available)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    /// Creates `root_path` and its split directories. `n_jobs` below 1 is treated as 1.
    pub fn new(root_path: impl Into<PathBuf>, n_jobs: usize) -> Result<Self> {
        let root_path = root_path.into();
        plan::prepare_layout(&root_path)
            .with_context(|| format!("prepare dataset root {}", root_path.display()))?;
        Ok(Self {
            root_path,
            n_jobs: n_jobs.max(1),
            source: ManifestSource::default(),
            extractor: Arc::new(YtDlp::default()),
            export_available: false,
        })
    }

    pub fn with_source(mut self, source: ManifestSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// After each run, write `root/<split>.csv` listing only rows present on disk.
    pub fn with_export_available(mut self, enabled: bool) -> Self {
        self.export_available = enabled;
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn n_jobs(&self) -> usize {
        self.n_jobs
    }

    pub async fn download(&self, format: AudioFormat, quality: Quality) -> Result<Summary> {
        self.download_with_progress(format, quality, None).await
    }

    /// Like `download`, forwarding scheduler progress to `progress_tx`.
    pub async fn download_with_progress(
        &self,
        format: AudioFormat,
        quality: Quality,
        progress_tx: Option<tokio::sync::mpsc::Sender<Progress>>,
    ) -> Result<Summary> {
        let started = Instant::now();
        let rows = self.source.load_all().await.context("load manifests")?;
        tracing::info!(rows = rows.len(), %format, %quality, root = %self.root_path.display(), "manifests loaded");

        let settings = RunSettings {
            root_path: self.root_path.clone(),
            format,
            quality,
            n_jobs: self.n_jobs,
        };
        let summary =
            scheduler::run_batch(&rows, &settings, Arc::clone(&self.extractor), progress_tx).await;

        for (split, files) in split_census(&self.root_path) {
            tracing::info!(%split, files, "files on disk");
        }
        tracing::info!(elapsed_secs = started.elapsed().as_secs_f64(), "download finished");

        if self.export_available {
            let counts = manifest::write_available(&self.root_path, &rows, format)
                .context("export available manifests")?;
            tracing::info!(train = counts[0], val = counts[1], test = counts[2], "exported available manifests");
        }
        Ok(summary)
    }
}

/// Number of files in each split directory under `root`.
pub fn split_census(root: &Path) -> [(Split, usize); 3] {
    Split::ALL.map(|split| (split, plan::count_split_files(root, split)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prepares_layout_and_clamps_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("audiocaps");
        let d = Downloader::new(&root, 0).unwrap();
        assert_eq!(d.n_jobs(), 1);
        assert_eq!(d.root_path(), root.as_path());
        for split in Split::ALL {
            assert!(root.join(split.dir_name()).is_dir());
        }
    }

    #[test]
    fn census_counts_each_split() {
        let dir = tempfile::tempdir().unwrap();
        plan::prepare_layout(dir.path()).unwrap();
        std::fs::write(plan::plan(dir.path(), Split::Val, "a", AudioFormat::Wav), b"x").unwrap();
        let census = split_census(dir.path());
        assert_eq!(census, [(Split::Train, 0), (Split::Val, 1), (Split::Test, 0)]);
    }

    #[tokio::test]
    async fn unreadable_manifest_aborts_before_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let d = Downloader::new(dir.path().join("root"), 2)
            .unwrap()
            .with_source(ManifestSource::Dir(dir.path().join("missing")));
        let err = d
            .download(AudioFormat::default(), Quality::default())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("load manifests"));
    }
}
