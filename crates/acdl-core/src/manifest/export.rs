//! Writes per-split manifests listing only the rows whose audio is on disk.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use super::ManifestRow;
use crate::format::AudioFormat;
use crate::plan;
use crate::split::Split;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    audiocap_id: Option<&'a str>,
    youtube_id: &'a str,
    start_time: u64,
    caption: Option<&'a str>,
}

/// Writes `root/<split>.csv` for every split, keeping rows whose planned output
/// file exists. Returns the number of rows written per split (train, val, test).
pub fn write_available(root: &Path, rows: &[ManifestRow], format: AudioFormat) -> Result<[usize; 3]> {
    let mut counts = [0usize; 3];
    for (i, split) in Split::ALL.into_iter().enumerate() {
        let path = root.join(split.manifest_file());
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("create {}", path.display()))?;
        // Explicit header so it is written even when no rows survive.
        wtr.write_record(["audiocap_id", "youtube_id", "start_time", "caption"])?;
        for row in rows.iter().filter(|r| r.split == split) {
            if !plan::exists(&plan::plan(root, split, &row.youtube_id, format)) {
                continue;
            }
            wtr.serialize(ExportRow {
                audiocap_id: row.audiocap_id.as_deref(),
                youtube_id: &row.youtube_id,
                start_time: row.start_seconds,
                caption: row.caption.as_deref(),
            })
            .with_context(|| format!("write {}", path.display()))?;
            counts[i] += 1;
        }
        wtr.flush().with_context(|| format!("flush {}", path.display()))?;
        tracing::debug!(%split, rows = counts[i], path = %path.display(), "wrote available manifest");
    }
    Ok(counts)
}
