//! Driver error taxonomy
//!
//! Unknown sensors and undecodable readings are not errors: they come back
//! as `None` ("unavailable"). What remains here are the conditions a caller
//! has to act on.

use chrono::{DateTime, Utc};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use w1temp_types::{CalibrationError, SensorId};

#[derive(Debug, Error)]
pub enum DriverError {
    /// A sensor data file is missing or unreadable
    #[error("failed to read sensor data file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The readiness wait ran past its limit; `captured_at` is the last
    /// snapshot that was checked
    #[error("sensor {id} did not report ready within {waited:?}")]
    NotReady {
        id: SensorId,
        waited: Duration,
        captured_at: DateTime<Utc>,
    },

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

pub type Result<T> = std::result::Result<T, DriverError>;
