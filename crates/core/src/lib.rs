//! w1temp-core: Core traits, errors and constants for the w1temp driver.
//!
//! This crate contains the `RawSource` trait that separates the sysfs
//! reader from the snapshot cache, the snapshot type itself, the driver
//! error taxonomy, and shared constants.

pub mod constants;
pub mod error;
mod raw_source;

pub use constants::{
    DATA_FILE, DEFAULT_BASE_DIR, DEFAULT_CACHE_TIMEOUT, DEFAULT_MAX_READY_WAIT,
    DEFAULT_POLL_INTERVAL, NUMBER_TOKEN, READY_MARKER, SENSOR_FAMILIES, TEMPERATURE_MARKER,
};
pub use error::{DriverError, Result};
pub use raw_source::{BoxedRawSource, RawContent, RawSnapshot, RawSource};

// Re-export types used in trait signatures for convenience
pub use w1temp_types::{RawReading, SensorId};
