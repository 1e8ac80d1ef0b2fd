//! Sysfs raw reader

use crate::registry::DeviceRegistry;
use std::fs;
use w1temp_core::{DriverError, RawContent, RawSource, Result};
use w1temp_types::{RawReading, SensorId};

/// Reads `w1_slave` files for every registered sensor
pub struct SysfsReader {
    registry: DeviceRegistry,
}

impl SysfsReader {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self { registry }
    }
}

impl RawSource for SysfsReader {
    fn sensor_ids(&self) -> Vec<SensorId> {
        self.registry.sensor_ids()
    }

    fn read_all_raw(&self) -> Result<RawContent> {
        let mut content = RawContent::new();

        for (id, path) in self.registry.iter() {
            let text = fs::read_to_string(path).map_err(|source| DriverError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            content.insert(id.clone(), RawReading::from_text(&text));
        }

        log::debug!("Read raw content for {} sensors", content.len());
        Ok(content)
    }
}
