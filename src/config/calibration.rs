//! Calibration file loading

use super::settings::config_dir;
use anyhow::{Context, Result};
use std::path::Path;
use w1temp_types::CalibrationConfig;

/// Default calibration file name inside the config directory
pub const CALIBRATION_FILE: &str = "calibration.json";

/// Load calibration settings
///
/// An explicit `path` must exist. Without one, the config directory's
/// `calibration.json` is used if present, otherwise calibration is empty.
pub fn load_calibration(path: Option<&Path>) -> Result<CalibrationConfig> {
    if let Some(path) = path {
        return load_calibration_file(path);
    }

    let default_path = config_dir()?.join(CALIBRATION_FILE);
    if !default_path.exists() {
        log::info!("No calibration file at {:?}, using empty calibration", default_path);
        return Ok(CalibrationConfig::default());
    }

    load_calibration_file(&default_path)
}

fn load_calibration_file(path: &Path) -> Result<CalibrationConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read calibration {}", path.display()))?;
    let calibration: CalibrationConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid calibration {}", path.display()))?;
    if calibration.is_empty() {
        log::warn!("Calibration {:?} has no settings, enriched reads need an offset", path);
    } else {
        log::info!("Loaded calibration from {:?}", path);
    }
    Ok(calibration)
}
