//! In-memory raw sources for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use w1temp_core::{RawContent, RawSource, Result};
use w1temp_types::{RawReading, SensorId};

pub(crate) fn ready(millidegrees: &str) -> String {
    format!("4b 46 7f ff 0e 10 57 : crc=57 YES\n4b 46 7f ff 0e 10 57 t={millidegrees}\n")
}

pub(crate) fn not_ready() -> String {
    "4b 46 7f ff 0e 10 57 : crc=00 NO\n4b 46 7f ff 0e 10 57 t=85000\n".to_string()
}

/// Plays back one frame per filesystem pass, repeating the last frame
pub(crate) struct ScriptedSource {
    frames: Vec<RawContent>,
    passes: Arc<AtomicUsize>,
}

impl ScriptedSource {
    /// Each frame is a list of `(sensor id, file text)` pairs
    pub(crate) fn new(frames: Vec<Vec<(&str, String)>>) -> (Self, Arc<AtomicUsize>) {
        let frames: Vec<RawContent> = frames
            .into_iter()
            .map(|frame| {
                frame
                    .into_iter()
                    .map(|(id, text)| (SensorId::from(id), RawReading::from_text(&text)))
                    .collect()
            })
            .collect();
        let passes = Arc::new(AtomicUsize::new(0));
        (
            Self {
                frames,
                passes: Arc::clone(&passes),
            },
            passes,
        )
    }

    /// Same content on every pass
    pub(crate) fn fixed(sensors: Vec<(&str, String)>) -> (Self, Arc<AtomicUsize>) {
        Self::new(vec![sensors])
    }
}

impl RawSource for ScriptedSource {
    fn sensor_ids(&self) -> Vec<SensorId> {
        self.frames
            .first()
            .map(|frame| frame.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read_all_raw(&self) -> Result<RawContent> {
        let pass = self.passes.fetch_add(1, Ordering::SeqCst);
        let index = pass.min(self.frames.len().saturating_sub(1));
        Ok(self.frames.get(index).cloned().unwrap_or_default())
    }
}

/// Slow source whose readings encode the pass that produced them:
/// pass `n` (counting from 1) reports `n` degrees for every sensor
pub(crate) struct CountingSource {
    ids: Vec<SensorId>,
    delay: Duration,
    passes: Arc<AtomicUsize>,
}

impl CountingSource {
    pub(crate) fn new(ids: &[&str], delay: Duration) -> (Self, Arc<AtomicUsize>) {
        let passes = Arc::new(AtomicUsize::new(0));
        (
            Self {
                ids: ids.iter().map(|id| SensorId::from(*id)).collect(),
                delay,
                passes: Arc::clone(&passes),
            },
            passes,
        )
    }
}

impl RawSource for CountingSource {
    fn sensor_ids(&self) -> Vec<SensorId> {
        self.ids.clone()
    }

    fn read_all_raw(&self) -> Result<RawContent> {
        thread::sleep(self.delay);
        let pass = self.passes.fetch_add(1, Ordering::SeqCst) + 1;
        let text = ready(&(pass * 1000).to_string());
        Ok(self
            .ids
            .iter()
            .map(|id| (id.clone(), RawReading::from_text(&text)))
            .collect())
    }
}
