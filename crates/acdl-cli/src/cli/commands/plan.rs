//! `acdl plan <split> <youtube_id>` – show where a clip is (or would be) stored.

use acdl_core::{plan, AudioFormat, Split};
use std::path::Path;

pub fn run_plan(root: &Path, split: Split, youtube_id: &str, format: AudioFormat) {
    let path = plan::plan(root, split, youtube_id, format);
    let state = if plan::exists(&path) { "present" } else { "missing" };
    println!("{}  ({})", path.display(), state);
}
