//! Tests for the download subcommand.

use super::{parse, parse_err};
use crate::cli::CliCommand;
use acdl_core::AudioFormat;
use std::path::Path;

#[test]
fn cli_parse_download_defaults() {
    match parse(&["acdl", "download"]) {
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
            assert!(root.is_none());
            assert!(jobs.is_none());
            assert!(format.is_none());
            assert!(quality.is_none());
            assert!(manifest_dir.is_none());
            assert!(manifest_url.is_none());
            assert!(tool.is_none());
            assert!(!export_available);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_all_flags() {
    match parse(&[
        "acdl",
        "download",
        "--root",
        "/data/audiocaps",
        "--jobs",
        "8",
        "--format",
        "wav",
        "--quality",
        "0",
        "--manifest-dir",
        "/srv/m",
        "--tool",
        "/opt/yt-dlp",
        "--export-available",
    ]) {
        CliCommand::Download {
            root,
            jobs,
            format,
            quality,
            manifest_dir,
            tool,
            export_available,
            ..
        } => {
            assert_eq!(root.as_deref(), Some(Path::new("/data/audiocaps")));
            assert_eq!(jobs, Some(8));
            assert_eq!(format, Some(AudioFormat::Wav));
            assert_eq!(quality, Some(0));
            assert_eq!(manifest_dir.as_deref(), Some(Path::new("/srv/m")));
            assert_eq!(tool.as_deref(), Some("/opt/yt-dlp"));
            assert!(export_available);
        }
        _ => panic!("expected Download with flags"),
    }
}

#[test]
fn cli_parse_download_manifest_url() {
    match parse(&["acdl", "download", "--manifest-url", "https://mirror/ds/"]) {
        CliCommand::Download { manifest_url, .. } => {
            assert_eq!(manifest_url.as_deref(), Some("https://mirror/ds/"));
        }
        _ => panic!("expected Download with --manifest-url"),
    }
}

#[test]
fn cli_rejects_zero_jobs() {
    parse_err(&["acdl", "download", "--jobs", "0"]);
}

#[test]
fn cli_rejects_quality_above_ten() {
    parse_err(&["acdl", "download", "--quality", "11"]);
}

#[test]
fn cli_rejects_unknown_format() {
    parse_err(&["acdl", "download", "--format", "aiff"]);
}

#[test]
fn cli_rejects_both_manifest_sources() {
    let err = parse_err(&[
        "acdl",
        "download",
        "--manifest-dir",
        "/m",
        "--manifest-url",
        "http://h/",
    ]);
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}
