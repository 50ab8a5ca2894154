//! CSV manifest parsing.

use serde::Deserialize;

use super::{ManifestError, ManifestRow};
use crate::split::Split;

/// Column layout of the AudioCaps manifests. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    audiocap_id: Option<String>,
    #[serde(alias = "ytid", alias = "YTID")]
    youtube_id: String,
    #[serde(alias = "start_seconds")]
    start_time: String,
    #[serde(default)]
    caption: Option<String>,
}

/// Parses one split's manifest. Any malformed row fails the whole manifest.
pub fn parse_manifest(split: Split, data: &[u8]) -> Result<Vec<ManifestRow>, ManifestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = rdr
        .headers()
        .map_err(|source| ManifestError::Csv { split, source })?
        .clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| ManifestError::Csv { split, source })?;
        // Line where the record starts; quoted fields may span several.
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawRow = record
            .deserialize(Some(&headers))
            .map_err(|source| ManifestError::Csv { split, source })?;
        if raw.youtube_id.is_empty() {
            return Err(ManifestError::EmptyId { split, line });
        }
        let start_seconds =
            parse_start_time(&raw.start_time).ok_or_else(|| ManifestError::StartTime {
                split,
                line,
                value: raw.start_time.clone(),
            })?;
        rows.push(ManifestRow {
            youtube_id: raw.youtube_id,
            split,
            start_seconds,
            audiocap_id: raw.audiocap_id.filter(|s| !s.is_empty()),
            caption: raw.caption.filter(|s| !s.is_empty()),
        });
    }
    Ok(rows)
}

/// Whole, non-negative seconds. `30` and `30.0` are accepted; `-1`, `1.5` are not.
fn parse_start_time(s: &str) -> Option<u64> {
    if let Ok(v) = s.parse::<u64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUDIOCAPS: &str = "audiocap_id,youtube_id,start_time,caption\n\
        91139,r1nicOVtvkQ,130,A woman talks nearby as water pours\n\
        58146,UDGBjjwyaqE,20,\"Multiple clanging and clanking sounds, then a man speaks\"\n";

    #[test]
    fn parses_audiocaps_columns() {
        let rows = parse_manifest(Split::Train, AUDIOCAPS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].youtube_id, "r1nicOVtvkQ");
        assert_eq!(rows[0].start_seconds, 130);
        assert_eq!(rows[0].audiocap_id.as_deref(), Some("91139"));
        assert_eq!(rows[1].split, Split::Train);
        assert_eq!(
            rows[1].caption.as_deref(),
            Some("Multiple clanging and clanking sounds, then a man speaks")
        );
    }

    #[test]
    fn minimal_columns_and_aliases() {
        let data = "ytid,start_seconds\nabc123,0\n  def , 30.0 \n";
        let rows = parse_manifest(Split::Test, data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].youtube_id, "def");
        assert_eq!(rows[1].start_seconds, 30);
        assert!(rows[0].audiocap_id.is_none());
        assert!(rows[0].caption.is_none());
    }

    #[test]
    fn duplicates_are_kept() {
        let data = "youtube_id,start_time\nabc,0\nabc,0\n";
        let rows = parse_manifest(Split::Val, data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn negative_start_rejected_with_line() {
        let data = "youtube_id,start_time\nok,1\nbad,-5\n";
        match parse_manifest(Split::Val, data.as_bytes()) {
            Err(ManifestError::StartTime { line, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "-5");
            }
            other => panic!("expected StartTime error, got {:?}", other),
        }
    }

    #[test]
    fn error_line_accounts_for_multiline_captions() {
        let data = "youtube_id,start_time,caption\n\
            ok,1,\"a dog barks\nthen a car passes\"\n\
            bad,1.5,wind\n";
        match parse_manifest(Split::Test, data.as_bytes()) {
            Err(ManifestError::StartTime { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected StartTime error, got {:?}", other),
        }
    }

    #[test]
    fn missing_id_column_is_error() {
        let data = "audiocap_id,start_time\n1,0\n";
        assert!(matches!(
            parse_manifest(Split::Train, data.as_bytes()),
            Err(ManifestError::Csv { .. })
        ));
    }

    #[test]
    fn start_time_forms() {
        assert_eq!(parse_start_time("0"), Some(0));
        assert_eq!(parse_start_time("12.0"), Some(12));
        assert_eq!(parse_start_time("1.5"), None);
        assert_eq!(parse_start_time("abc"), None);
        assert_eq!(parse_start_time("NaN"), None);
    }
}
