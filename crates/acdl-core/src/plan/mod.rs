//! Output path planning and the per-split directory layout.
//!
//! Every output path is a pure function of `(root, split, youtube_id, format)`,
//! so a later run can find finished work with nothing but an existence check.

mod sanitize;

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::format::AudioFormat;
use crate::split::Split;

pub use sanitize::file_stem_for_id;

/// Canonical output path: `root/<split>/<youtube_id>.<ext>`.
pub fn plan(root: &Path, split: Split, youtube_id: &str, format: AudioFormat) -> PathBuf {
    let file_name = format!("{}.{}", file_stem_for_id(youtube_id), format.extension());
    split_dir(root, split).join(file_name)
}

/// Marks in-progress files inside a split directory.
const STAGING_MARKER: &str = ".partial-";

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Scratch path next to `output` for the extractor to write into. Unique per
/// call, so duplicate rows in flight never share one. Keeps the extension.
pub fn staging_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = format!("{}{}{}-{}", stem, STAGING_MARKER, std::process::id(), seq);
    if let Some(ext) = output.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    output.with_file_name(name)
}

/// True for file names produced by `staging_path`.
pub fn is_staging_name(file_name: &str) -> bool {
    file_name.contains(STAGING_MARKER)
}

pub fn split_dir(root: &Path, split: Split) -> PathBuf {
    root.join(split.dir_name())
}

/// Plain existence check. A zero-byte or truncated file still counts as done.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Creates the split directory if needed. Safe to call from many workers at once.
pub fn ensure_split_dir(root: &Path, split: Split) -> Result<PathBuf> {
    let dir = split_dir(root, split);
    create_dir_tolerant(&dir)?;
    Ok(dir)
}

/// Creates `root` and all split directories.
pub fn prepare_layout(root: &Path) -> Result<()> {
    create_dir_tolerant(root)?;
    for split in Split::ALL {
        ensure_split_dir(root, split)?;
    }
    Ok(())
}

fn create_dir_tolerant(dir: &Path) -> Result<()> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("create directory {}", dir.display())),
    }
}

/// Number of regular files currently in a split directory (0 if missing).
/// Leftover staging files are not counted.
pub fn count_split_files(root: &Path, split: Split) -> usize {
    let Ok(entries) = std::fs::read_dir(split_dir(root, split)) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| !is_staging_name(&e.file_name().to_string_lossy()))
        .count()
}
