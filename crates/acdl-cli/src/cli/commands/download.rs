//! `acdl download` – fetch every manifest row that is not on disk yet.

use acdl_core::config::AcdlConfig;
use acdl_core::extract::YtDlp;
use acdl_core::manifest::ManifestSource;
use acdl_core::scheduler::Progress;
use acdl_core::{downloader, AudioFormat, Downloader, Outcome, Quality};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Flags for `acdl download`; `None` falls back to the config value.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub root: PathBuf,
    pub jobs: Option<usize>,
    pub format: Option<AudioFormat>,
    pub quality: Option<u8>,
    pub manifest_dir: Option<PathBuf>,
    pub manifest_url: Option<String>,
    pub tool: Option<String>,
    pub export_available: bool,
}

impl DownloadOptions {
    fn manifest_source(&self, cfg: &AcdlConfig) -> ManifestSource {
        match (&self.manifest_dir, &self.manifest_url) {
            (Some(dir), _) => ManifestSource::Dir(dir.clone()),
            (None, Some(url)) => ManifestSource::Url(url.clone()),
            (None, None) => cfg.manifest_source(),
        }
    }

    fn extractor(&self, cfg: &AcdlConfig) -> YtDlp {
        match &self.tool {
            // An explicit program replaces the configured one, leading args included.
            Some(tool) => YtDlp::new(tool),
            None => YtDlp::new(&cfg.tool).with_leading_args(cfg.tool_args.clone()),
        }
    }
}

pub async fn run_download(cfg: &AcdlConfig, opts: DownloadOptions) -> Result<()> {
    let format = opts.format.unwrap_or(cfg.format);
    let quality = match opts.quality {
        Some(q) => Quality::new(q)?,
        None => cfg.quality,
    };
    let jobs = opts.jobs.unwrap_or(cfg.n_jobs);

    let downloader = Downloader::new(&opts.root, jobs)?
        .with_source(opts.manifest_source(cfg))
        .with_extractor(Arc::new(opts.extractor(cfg)))
        .with_export_available(opts.export_available);

    println!(
        "Downloading AudioCaps into {} ({} @ quality {}, {} job(s))",
        downloader.root_path().display(),
        format,
        quality,
        downloader.n_jobs()
    );

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<Progress>(64);
    const PROGRESS_INTERVAL_MS: u64 = 500;
    let progress_handle = tokio::spawn(async move {
        let mut last_print = Instant::now();
        while let Some(p) = progress_rx.recv().await {
            if let Some((id, Outcome::Failed(reason))) = &p.last {
                eprintln!("  failed {}: {}", id, reason);
            }
            let now = Instant::now();
            if now.duration_since(last_print).as_millis() as u64 >= PROGRESS_INTERVAL_MS
                || p.is_finished()
            {
                println!(
                    "\r  {} / {} ({:.1}%)  ok {}  skipped {}  failed {}  ",
                    p.done,
                    p.total,
                    p.fraction() * 100.0,
                    p.summary.succeeded,
                    p.summary.skipped,
                    p.summary.failed
                );
                last_print = now;
            }
        }
    });

    let result = downloader
        .download_with_progress(format, quality, Some(progress_tx))
        .await;
    let _ = progress_handle.await;
    let summary = result?;

    println!(
        "Done: {} downloaded, {} already present, {} failed.",
        summary.succeeded, summary.skipped, summary.failed
    );
    for (split, files) in downloader::split_census(downloader.root_path()) {
        println!("  {:<6} {} file(s)", split, files);
    }
    if summary.failed > 0 {
        println!("Re-run the same command later to retry failed clips.");
    }
    tracing::info!(
        skipped = summary.skipped,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "download command completed"
    );
    Ok(())
}
