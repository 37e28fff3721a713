use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per segment (including the first).
    pub max_attempts: u32,
    /// Delay in seconds between attempts (0.0 = retry immediately).
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 0.0,
        }
    }
}

/// Global configuration loaded from `~/.config/hlsget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlsgetConfig {
    /// Number of concurrent segment downloads.
    pub worker_count: usize,
    /// Directory holding per-segment files until assembly.
    pub work_dir: PathBuf,
    /// Path of the progress record (completed segment indices).
    pub progress_file: PathBuf,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for HlsgetConfig {
    fn default() -> Self {
        Self {
            worker_count: 5,
            work_dir: PathBuf::from("ts_files"),
            progress_file: PathBuf::from("progress.txt"),
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HlsgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
