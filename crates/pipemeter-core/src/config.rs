use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bar width in character cells.
pub const DEFAULT_BAR_WIDTH: usize = 34;

/// Default time between status line refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime configuration for one transfer, assembled by the CLI and passed by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterConfig {
    /// Expected total in bytes. `> 0` selects determinate mode; `<= 0` means unknown.
    pub total_size: i64,
    /// Time between renders. Must be non-zero.
    pub refresh_interval: Duration,
    /// When set, no renderer runs and nothing is written to the status channel.
    pub quiet: bool,
    /// Width of the bar glyph in character cells.
    pub bar_width: usize,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            total_size: 0,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            quiet: false,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("refresh interval must be greater than zero")]
    ZeroRefreshInterval,
}

impl MeterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }

    /// Whether the declared size puts the renderer in determinate mode.
    pub fn is_determinate(&self) -> bool {
        self.total_size > 0
    }
}

/// User defaults loaded from `~/.config/pipemeter/config.toml`.
///
/// Every key is optional; anything missing keeps the built-in default.
/// The expected size is per-invocation and therefore not configurable here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserDefaults {
    /// Refresh interval in milliseconds.
    pub refresh_interval_ms: Option<u64>,
    /// Bar width in character cells.
    pub bar_width: Option<usize>,
    /// Suppress the status line by default.
    pub quiet: Option<bool>,
}

impl UserDefaults {
    /// Layer these defaults over the built-in ones.
    pub fn apply(&self, mut cfg: MeterConfig) -> MeterConfig {
        if let Some(ms) = self.refresh_interval_ms {
            cfg.refresh_interval = Duration::from_millis(ms);
        }
        if let Some(width) = self.bar_width {
            cfg.bar_width = width;
        }
        if let Some(quiet) = self.quiet {
            cfg.quiet = quiet;
        }
        cfg
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pipemeter")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load user defaults from `path`; a missing file yields empty defaults.
pub fn load_from_path(path: &Path) -> Result<UserDefaults> {
    if !path.exists() {
        return Ok(UserDefaults::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let defaults: UserDefaults = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(defaults)
}

/// Load user defaults from the XDG config location. The file is never created implicitly.
pub fn load_user_defaults() -> Result<UserDefaults> {
    load_from_path(&config_path()?)
}
