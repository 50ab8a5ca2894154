use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::format::{AudioFormat, Quality};
use crate::manifest::{ManifestSource, AUDIOCAPS_BASE_URL};

/// Global configuration loaded from `~/.config/acdl/config.toml`.
/// Command-line flags override every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcdlConfig {
    /// Dataset root; `None` means the current directory.
    #[serde(default)]
    pub root_path: Option<PathBuf>,
    /// Maximum concurrent extractor processes.
    pub n_jobs: usize,
    /// Output codec.
    #[serde(default)]
    pub format: AudioFormat,
    /// Tool quality, 0 (best) to 10 (worst).
    #[serde(default)]
    pub quality: Quality,
    /// Extraction program (path or name on `PATH`).
    pub tool: String,
    /// Arguments placed before the generated ones, e.g. `["-m", "yt_dlp"]`.
    #[serde(default)]
    pub tool_args: Vec<String>,
    /// Base URL for `train.csv`, `val.csv` and `test.csv`.
    pub manifest_url: String,
    /// Local manifest directory; takes precedence over `manifest_url`.
    #[serde(default)]
    pub manifest_dir: Option<PathBuf>,
}

impl Default for AcdlConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            n_jobs: 1,
            format: AudioFormat::default(),
            quality: Quality::default(),
            tool: "yt-dlp".to_string(),
            tool_args: Vec::new(),
            manifest_url: AUDIOCAPS_BASE_URL.to_string(),
            manifest_dir: None,
        }
    }
}

impl AcdlConfig {
    pub fn manifest_source(&self) -> ManifestSource {
        match &self.manifest_dir {
            Some(dir) => ManifestSource::Dir(dir.clone()),
            None => ManifestSource::Url(self.manifest_url.clone()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("acdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AcdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AcdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: AcdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
