//! Readiness-polling temperature decoder
//!
//! A sensor's status line ends in `YES` once its last conversion passed the
//! CRC check. Until then the decoder keeps asking the snapshot cache for
//! content, so a not-ready sensor is only re-read from the bus when the
//! cached snapshot goes stale. The decoder never bypasses the cache.

use crate::snapshot_cache::SnapshotCache;
use chrono::{DateTime, Utc};
use std::thread;
use std::time::{Duration, Instant};
use w1temp_core::{
    DriverError, Result, DEFAULT_MAX_READY_WAIT, DEFAULT_POLL_INTERVAL, READY_MARKER,
    TEMPERATURE_MARKER,
};
use w1temp_types::{RawReading, SensorId};

/// How the decoder waits for a sensor to report ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between readiness checks
    pub interval: Duration,
    /// Give up after this long; `None` waits forever
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: Some(DEFAULT_MAX_READY_WAIT),
        }
    }
}

/// True when the status line, trimmed, ends in the readiness marker.
/// An empty file counts as not ready.
pub fn is_ready(raw: &RawReading) -> bool {
    raw.status_line()
        .map(|line| line.trim().ends_with(READY_MARKER))
        .unwrap_or(false)
}

/// Parse `t=<millidegrees>` from the data line into degrees
///
/// Returns `None` when the line or the marker is missing or the count is not
/// an integer.
pub fn parse_temperature(raw: &RawReading) -> Option<f64> {
    let line = raw.data_line()?;
    let start = line.find(TEMPERATURE_MARKER)? + TEMPERATURE_MARKER.len();
    let millidegrees = line[start..].split_whitespace().next()?.parse::<i64>().ok()?;
    Some(millidegrees as f64 / 1000.0)
}

/// A decoded temperature and the capture time of the snapshot it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    /// `None` when the sensor is missing from the snapshot or its data line
    /// could not be decoded
    pub value: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

/// Wait for `id` to report ready, then decode its temperature
///
/// The cache lock is only held while fetching a snapshot, never while
/// sleeping.
pub fn read_temperature(
    cache: &SnapshotCache,
    id: &SensorId,
    cache_timeout: Duration,
    policy: &PollPolicy,
) -> Result<Decoded> {
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        let snapshot = cache.get_snapshot(cache_timeout)?;

        let Some(raw) = snapshot.reading(id) else {
            log::warn!("Sensor {} missing from raw snapshot", id);
            return Ok(Decoded {
                value: None,
                captured_at: snapshot.captured_at,
            });
        };

        if is_ready(raw) {
            let value = parse_temperature(raw);
            if value.is_none() {
                log::warn!("Sensor {}: cannot decode data line {:?}", id, raw.data_line());
            }
            return Ok(Decoded {
                value,
                captured_at: snapshot.captured_at,
            });
        }

        let waited = started.elapsed();
        if let Some(max_wait) = policy.max_wait {
            if waited >= max_wait {
                log::warn!("Sensor {} not ready after {} polls ({:?})", id, polls, waited);
                return Err(DriverError::NotReady {
                    id: id.clone(),
                    waited,
                    captured_at: snapshot.captured_at,
                });
            }
        }

        polls += 1;
        log::debug!("Sensor {} not ready, poll #{}", id, polls);
        thread::sleep(policy.interval);
    }
}
