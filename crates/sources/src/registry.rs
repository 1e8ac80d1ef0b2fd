//! Device registry
//!
//! Enumerates DS18x20 devices under the w1 bus directory once, at driver
//! construction. The set of sensors does not change afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use w1temp_core::{DATA_FILE, SENSOR_FAMILIES};
use w1temp_types::SensorId;

/// Discovered sensors and the data file backing each one
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<SensorId, PathBuf>,
}

impl DeviceRegistry {
    /// Scan `base_dir` for DS18S20 (`10*`) and DS18B20 (`28*`) devices
    ///
    /// Finding nothing is not an error, and neither is a missing or
    /// unreadable base directory: both produce an empty registry.
    pub fn discover(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let mut devices = BTreeMap::new();

        log::info!("Scanning {} for 1-wire temperature sensors...", base_dir.display());

        match std::fs::read_dir(&base_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();

                    if !SENSOR_FAMILIES.iter().any(|family| name.starts_with(family)) {
                        continue;
                    }

                    let id = SensorId::from(name.as_ref());
                    let data_file = entry.path().join(DATA_FILE);

                    log::info!("  {:?}: {} ({})", id.kind(), id, data_file.display());
                    devices.insert(id, data_file);
                }
            }
            Err(e) => {
                log::warn!("Cannot read sensor directory {}: {}", base_dir.display(), e);
            }
        }

        log::info!("Sensor discovery complete: {} sensors found", devices.len());

        Self { devices }
    }

    /// Build a registry from known locations, skipping the directory scan
    pub fn from_locations(locations: impl IntoIterator<Item = (SensorId, PathBuf)>) -> Self {
        Self {
            devices: locations.into_iter().collect(),
        }
    }

    /// All known sensor ids, ascending
    pub fn sensor_ids(&self) -> Vec<SensorId> {
        self.devices.keys().cloned().collect()
    }

    pub fn contains(&self, id: &SensorId) -> bool {
        self.devices.contains_key(id)
    }

    /// Data file backing a sensor
    pub fn location(&self, id: &SensorId) -> Option<&Path> {
        self.devices.get(id).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SensorId, &Path)> {
        self.devices.iter().map(|(id, path)| (id, path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
