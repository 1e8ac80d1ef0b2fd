//! DS18x20 driver facade
//!
//! Ties discovery, the snapshot cache, the readiness-polling decoder and the
//! enrichment engine together behind the read operations that callers use.

use crate::decoder::{self, Decoded, PollPolicy};
use crate::enrichment::{self, EnrichedSet};
use crate::registry::DeviceRegistry;
use crate::snapshot_cache::SnapshotCache;
use crate::sysfs::SysfsReader;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use w1temp_core::{
    BoxedRawSource, DriverError, RawSnapshot, Result, DEFAULT_BASE_DIR, DEFAULT_CACHE_TIMEOUT,
    DEFAULT_MAX_READY_WAIT, DEFAULT_POLL_INTERVAL,
};
use w1temp_types::{CalibrationConfig, SensorId};

/// Settings consumed by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSettings {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default = "default_cache_timeout_secs")]
    pub cache_timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// `null` waits for readiness without limit
    #[serde(default = "default_max_ready_wait_secs")]
    pub max_ready_wait_secs: Option<u64>,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
}

fn default_cache_timeout_secs() -> u64 {
    DEFAULT_CACHE_TIMEOUT.as_secs()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_max_ready_wait_secs() -> Option<u64> {
    Some(DEFAULT_MAX_READY_WAIT.as_secs())
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            cache_timeout_secs: default_cache_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_ready_wait_secs: default_max_ready_wait_secs(),
        }
    }
}

impl DriverSettings {
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_timeout_secs)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_wait: self.max_ready_wait_secs.map(Duration::from_secs),
        }
    }
}

/// Driver for all DS18S20/DS18B20 sensors on the w1 bus
pub struct Ds18x20 {
    sensor_ids: Vec<SensorId>,
    cache: SnapshotCache,
    cache_timeout: Duration,
    policy: PollPolicy,
}

impl Ds18x20 {
    /// Discover sensors under the configured base directory
    pub fn new(settings: &DriverSettings) -> Self {
        let registry = DeviceRegistry::discover(&settings.base_dir);
        Self::with_source(
            Box::new(SysfsReader::new(registry)),
            settings.cache_timeout(),
            settings.poll_policy(),
        )
    }

    /// Build a driver over any raw source
    pub fn with_source(source: BoxedRawSource, cache_timeout: Duration, policy: PollPolicy) -> Self {
        let mut sensor_ids = source.sensor_ids();
        sensor_ids.sort();
        sensor_ids.dedup();
        Self {
            sensor_ids,
            cache: SnapshotCache::new(source),
            cache_timeout,
            policy,
        }
    }

    /// Ids of all known sensors, ascending
    pub fn sensor_ids(&self) -> &[SensorId] {
        &self.sensor_ids
    }

    pub fn contains(&self, id: &SensorId) -> bool {
        self.sensor_ids.binary_search(id).is_ok()
    }

    /// Current raw snapshot, refreshed if older than the cache timeout
    pub fn raw_snapshot(&self) -> Result<Arc<RawSnapshot>> {
        self.cache.get_snapshot(self.cache_timeout)
    }

    /// Capture time of the cached snapshot, `None` before the first read
    pub fn last_snapshot_timestamp(&self) -> Option<DateTime<Utc>> {
        self.cache.last_snapshot_timestamp()
    }

    /// Temperature of one sensor in degrees
    ///
    /// `Ok(None)` for an unknown id or an undecodable reading. Filesystem
    /// failures and readiness timeouts are errors.
    pub fn read_temperature(&self, id: &SensorId) -> Result<Option<f64>> {
        if !self.contains(id) {
            log::debug!("Unknown sensor requested: {}", id);
            return Ok(None);
        }
        self.decode(id).map(|decoded| decoded.value)
    }

    /// Temperature of every sensor
    ///
    /// A sensor that never reports ready is logged and reported as `None`;
    /// a filesystem failure aborts the whole read.
    pub fn read_all_simple(&self) -> Result<BTreeMap<SensorId, Option<f64>>> {
        let mut temperatures = BTreeMap::new();
        for id in &self.sensor_ids {
            temperatures.insert(id.clone(), self.read_in_batch(id)?.value);
        }
        Ok(temperatures)
    }

    /// Temperature of every sensor combined with its calibration settings
    pub fn read_all_enriched(&self, calibration: &CalibrationConfig) -> Result<EnrichedSet> {
        let mut readings = EnrichedSet::new();

        for (rank, id) in self.sensor_ids.iter().enumerate() {
            let decoded = self.read_in_batch(id)?;

            let reading =
                enrichment::enrich(id, rank, decoded.value, decoded.captured_at, calibration);
            if let Err(e) = &reading {
                log::warn!("Enrichment failed: {}", e);
            }
            readings.insert(id.clone(), reading);
        }

        Ok(readings)
    }

    fn decode(&self, id: &SensorId) -> Result<Decoded> {
        decoder::read_temperature(&self.cache, id, self.cache_timeout, &self.policy)
    }

    /// Decode one sensor of a batch read, reporting a stuck sensor as unavailable
    fn read_in_batch(&self, id: &SensorId) -> Result<Decoded> {
        match self.decode(id) {
            Err(DriverError::NotReady {
                id,
                waited,
                captured_at,
            }) => {
                log::warn!("Sensor {} unavailable: not ready after {:?}", id, waited);
                Ok(Decoded {
                    value: None,
                    captured_at,
                })
            }
            other => other,
        }
    }
}
