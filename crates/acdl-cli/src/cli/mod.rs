//! CLI for the ACDL dataset downloader.

mod commands;

use acdl_core::config::{self, AcdlConfig};
use acdl_core::{AudioFormat, Split};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_completions, run_download, run_plan, run_status, DownloadOptions};

/// Top-level CLI for the ACDL dataset downloader.
#[derive(Debug, Parser)]
#[command(name = "acdl")]
#[command(about = "ACDL: parallel AudioCaps audio downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every clip listed in the train/val/test manifests.
    Download {
        /// Dataset root (default: config `root_path`, else current directory).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Run up to N extractions concurrently (default from config, 1 if unset).
        #[arg(long, value_name = "N", value_parser = parse_jobs)]
        jobs: Option<usize>,
        /// Output codec: vorbis, wav, mp3, m4a, flac, opus.
        #[arg(long)]
        format: Option<AudioFormat>,
        /// Tool quality, 0 (best) to 10 (worst).
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        quality: Option<u8>,
        /// Read train.csv/val.csv/test.csv from this directory.
        #[arg(long, value_name = "DIR", conflicts_with = "manifest_url")]
        manifest_dir: Option<PathBuf>,
        /// Fetch train.csv/val.csv/test.csv from this base URL.
        #[arg(long, value_name = "URL")]
        manifest_url: Option<String>,
        /// Extraction program (default: yt-dlp).
        #[arg(long, value_name = "PATH")]
        tool: Option<String>,
        /// Write <root>/<split>.csv listing only rows whose audio is present.
        #[arg(long)]
        export_available: bool,
    },

    /// Show how many files each split directory holds.
    Status {
        /// Dataset root (default: config `root_path`, else current directory).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Print the output path a manifest row maps to.
    Plan {
        /// Split: train, val or test.
        split: Split,
        /// YouTube video id.
        youtube_id: String,
        /// Dataset root (default: config `root_path`, else current directory).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Output codec (default from config).
        #[arg(long)]
        format: Option<AudioFormat>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

fn parse_jobs(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Flag, then config `root_path`, then the current directory.
fn resolve_root(flag: Option<PathBuf>, cfg: &AcdlConfig) -> Result<PathBuf> {
    if let Some(root) = flag.or_else(|| cfg.root_path.clone()) {
        return Ok(root);
    }
    Ok(std::env::current_dir()?)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download {
                root,
                jobs,
                format,
                quality,
                manifest_dir,
                manifest_url,
                tool,
                export_available,
            } => {
                let root = resolve_root(root, &cfg)?;
                let opts = DownloadOptions {
                    root,
                    jobs,
                    format,
                    quality,
                    manifest_dir,
                    manifest_url,
                    tool,
                    export_available,
                };
                run_download(&cfg, opts).await?;
            }
            CliCommand::Status { root } => {
                let root = resolve_root(root, &cfg)?;
                run_status(&root)?;
            }
            CliCommand::Plan {
                split,
                youtube_id,
                root,
                format,
            } => {
                let root = resolve_root(root, &cfg)?;
                run_plan(&root, split, &youtube_id, format.unwrap_or(cfg.format));
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
