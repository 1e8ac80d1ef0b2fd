//! Freshness cache for raw snapshots
//!
//! Reading the 1-wire bus is slow, so one filesystem pass over all sensors
//! is reused until it is older than the caller's timeout. Only one snapshot
//! is held at a time and it is always replaced as a whole.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use w1temp_core::{BoxedRawSource, RawSnapshot, Result};

/// Single-slot snapshot cache in front of a raw source
pub struct SnapshotCache {
    source: BoxedRawSource,
    slot: Mutex<Option<Arc<RawSnapshot>>>,
}

impl SnapshotCache {
    pub fn new(source: BoxedRawSource) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached snapshot, or take a fresh one if there is none or
    /// it is older than `timeout`
    ///
    /// The staleness check and the replacement happen under one lock, so
    /// concurrent callers never both decide to re-read the bus. A failed
    /// pass leaves the previous snapshot in place.
    pub fn get_snapshot(&self, timeout: Duration) -> Result<Arc<RawSnapshot>> {
        let mut slot = self.lock();

        if let Some(snapshot) = slot.as_ref() {
            if !snapshot.is_stale(timeout) {
                log::trace!("Reusing raw snapshot ({:?} old)", snapshot.age());
                return Ok(Arc::clone(snapshot));
            }
        }

        let snapshot = Arc::new(RawSnapshot::new(self.source.read_all_raw()?));
        log::debug!(
            "Captured raw snapshot of {} sensors at {}",
            snapshot.readings().len(),
            snapshot.captured_at
        );
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Capture time of the cached snapshot, `None` before the first pass
    pub fn last_snapshot_timestamp(&self) -> Option<DateTime<Utc>> {
        self.lock().as_ref().map(|snapshot| snapshot.captured_at)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<RawSnapshot>>> {
        // Recover from a poisoned mutex - the slot is only ever replaced whole
        self.slot.lock().unwrap_or_else(|poisoned| {
            log::warn!("Snapshot cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
