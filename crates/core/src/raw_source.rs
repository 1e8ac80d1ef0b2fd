//! Raw source trait and snapshot type

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use w1temp_types::{RawReading, SensorId};

/// Raw lines for every sensor, ordered by sensor id
pub type RawContent = BTreeMap<SensorId, RawReading>;

/// Trait for anything that can produce raw sensor content
///
/// The sysfs reader is the production implementation; tests substitute
/// in-memory sources.
pub trait RawSource: Send + Sync {
    /// Every sensor this source knows about, in ascending id order
    fn sensor_ids(&self) -> Vec<SensorId>;

    /// Read the current content of every sensor in one pass
    ///
    /// A missing or unreadable sensor fails the whole pass.
    fn read_all_raw(&self) -> Result<RawContent>;
}

/// Type-erased raw source for dynamic dispatch
pub type BoxedRawSource = Box<dyn RawSource>;

/// One timestamped filesystem pass over all sensors
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    /// Wall-clock capture time, reported to callers
    pub captured_at: DateTime<Utc>,
    /// Monotonic capture time, used for staleness checks
    taken: Instant,
    readings: RawContent,
}

impl RawSnapshot {
    pub fn new(readings: RawContent) -> Self {
        Self {
            captured_at: Utc::now(),
            taken: Instant::now(),
            readings,
        }
    }

    pub fn reading(&self, id: &SensorId) -> Option<&RawReading> {
        self.readings.get(id)
    }

    pub fn readings(&self) -> &RawContent {
        &self.readings
    }

    pub fn age(&self) -> Duration {
        self.taken.elapsed()
    }

    /// True once more than `timeout` has passed since capture
    pub fn is_stale(&self, timeout: Duration) -> bool {
        self.age() > timeout
    }
}
