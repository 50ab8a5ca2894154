//! Output codec and quality requested from the extraction tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audio codec passed to `yt-dlp --audio-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Vorbis,
    Wav,
    Mp3,
    M4a,
    Flac,
    Opus,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Vorbis,
        AudioFormat::Wav,
        AudioFormat::Mp3,
        AudioFormat::M4a,
        AudioFormat::Flac,
        AudioFormat::Opus,
    ];

    /// Codec name as the extraction tool spells it.
    pub fn codec(self) -> &'static str {
        match self {
            AudioFormat::Vorbis => "vorbis",
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Flac => "flac",
            AudioFormat::Opus => "opus",
        }
    }

    /// File extension of the produced file. Vorbis lands in an Ogg container.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Vorbis => "ogg",
            other => other.codec(),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.codec())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported audio format `{0}` (expected one of vorbis, wav, mp3, m4a, flac, opus)")]
pub struct ParseFormatError(String);

impl FromStr for AudioFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "ogg" {
            return Ok(AudioFormat::Vorbis);
        }
        AudioFormat::ALL
            .into_iter()
            .find(|f| f.codec() == lower)
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

/// Tool quality scale, 0 (best) through 10 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("quality {0} out of range (expected 0..=10)")]
pub struct QualityError(pub u8);

impl Quality {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, QualityError> {
        if value > Self::MAX {
            return Err(QualityError(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Quality {
    type Error = QualityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
