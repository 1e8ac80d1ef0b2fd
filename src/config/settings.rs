//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use w1temp_sources::DriverSettings;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Sensor driver settings
    #[serde(default)]
    pub driver: DriverSettings,
    /// Calibration file; the config directory's `calibration.json` when unset
    #[serde(default)]
    pub calibration_path: Option<PathBuf>,
    /// Period of the `--watch` loop
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_watch_interval() -> u64 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            driver: DriverSettings::default(),
            calibration_path: None,
            watch_interval_ms: default_watch_interval(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::debug!("No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.json"))
    }
}

/// Per-user configuration directory
pub fn config_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("org", "w1temp", "w1temp")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.watch_interval_ms, 500);
        assert_eq!(config.driver.cache_timeout_secs, 30);
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.driver.base_dir = PathBuf::from("/tmp/w1");
        config.calibration_path = Some(PathBuf::from("/etc/w1temp/calibration.json"));
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.json"));
    }
}
