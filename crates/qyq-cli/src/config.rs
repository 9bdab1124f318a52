//! CLI configuration

use crate::error::{CliError, CliResult};
use qyq_core::DEFAULT_SHOTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Shots per line for the local sampler
    pub shots: Option<u32>,

    /// Context label written into record headers
    pub context_label: Option<String>,

    /// Fixed sampler seed for reproducible casts
    pub seed: Option<u64>,

    /// Directory relative `--save` paths are written to
    pub record_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Shots per line: flag, then file, then built-in default.
    pub fn shots(&self, flag: Option<u32>) -> u32 {
        flag.or(self.shots).unwrap_or(DEFAULT_SHOTS)
    }

    /// Seed: flag, then file.
    pub fn seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.seed)
    }

    /// Label: flag, then file, then whatever the counts source calls itself.
    pub fn context_label(&self, flag: Option<String>, source: String) -> String {
        flag.or_else(|| self.context_label.clone()).unwrap_or(source)
    }

    /// Where a saved record goes; absolute paths are left alone.
    pub fn record_path(&self, path: &Path) -> PathBuf {
        match &self.record_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("qyq").join("config.toml"))
    }
}
