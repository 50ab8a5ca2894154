//! `acdl status` – count files per split directory.

use acdl_core::downloader;
use anyhow::Result;
use std::path::Path;

pub fn run_status(root: &Path) -> Result<()> {
    if !root.is_dir() {
        println!("No dataset at {}.", root.display());
        return Ok(());
    }
    println!("{:<6} {}", "SPLIT", "FILES");
    let mut total = 0;
    for (split, files) in downloader::split_census(root) {
        println!("{:<6} {}", split, files);
        total += files;
    }
    println!("{:<6} {}", "total", total);
    Ok(())
}
