//! Persistent defaults for the roster binary
//!
//! Settings live in `<config dir>/roster/settings.json`. A missing file means
//! defaults; command-line flags override whatever the file says.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use roster_query::{SortConfig, SortDirection};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Column key sorted by when no `--sort` is given
    pub default_sort: Option<String>,
    pub default_direction: SortDirection,
    /// Reference date for relative date filters instead of the local date
    pub date_override: Option<NaiveDate>,
    /// Log filter used when neither `--log-level` nor the environment sets one
    pub log_filter: Option<String>,
    /// Directory for JSON log files
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join("roster").join("settings.json"))
    }

    /// Load from an explicit file, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::settings_path()?),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON in {:?}", path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// The sort to apply: an explicit key wins over the configured default.
    /// `descending` forces the direction; otherwise an explicit key sorts
    /// ascending and the default key uses the configured direction.
    pub fn resolve_sort(&self, key: Option<&str>, descending: bool) -> Option<SortConfig> {
        let (key, direction) = match key {
            Some(key) => (key, SortDirection::Ascending),
            None => (self.default_sort.as_deref()?, self.default_direction),
        };
        let direction = if descending {
            SortDirection::Descending
        } else {
            direction
        };
        Some(SortConfig::new(key, direction))
    }
}
