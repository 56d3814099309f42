//! Dashboard configuration loaded from TOML.
//!
//! Every field has a default, so an empty or missing file is valid. Binaries
//! apply command-line overrides on top of the loaded value.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{
    DataError, DatasetCache, DatasetSource, FileSource, HttpSource, DEFAULT_SOURCE_URL,
    TOTAL_EXPORTS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP(S) URL or local path of the dataset CSV.
    pub source: String,
    /// Cache directory; defaults to the platform cache dir.
    pub cache_dir: Option<PathBuf>,
    pub max_age_hours: u64,
    pub offline: bool,
    /// Category chosen when a session starts.
    pub default_category: String,
    pub http_timeout_secs: u64,
    /// Extra attempts after a failed download. Off unless configured.
    pub max_retries: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_URL.to_string(),
            cache_dir: None,
            max_age_hours: 24 * 7,
            offline: false,
            default_category: TOTAL_EXPORTS.to_string(),
            http_timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file. A missing file yields defaults; anything else that
    /// goes wrong is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    /// `{config_dir}/agexports/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agexports").join("config.toml"))
    }

    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("agexports")
        })
    }

    pub fn cache(&self) -> DatasetCache {
        DatasetCache::new(self.resolved_cache_dir())
    }

    pub fn max_age(&self) -> chrono::Duration {
        // capped at a century
        chrono::Duration::hours(self.max_age_hours.min(24 * 365 * 100) as i64)
    }

    /// Build the dataset source this config points at.
    pub fn dataset_source(&self) -> Result<Box<dyn DatasetSource>, DataError> {
        if self.is_remote() {
            let source = HttpSource::new(
                self.source.clone(),
                Duration::from_secs(self.http_timeout_secs),
                self.max_retries,
            )?;
            Ok(Box::new(source))
        } else {
            Ok(Box::new(FileSource::new(&self.source)))
        }
    }
}
