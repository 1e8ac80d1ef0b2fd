//! Shared constants for the w1temp driver

use std::time::Duration;

pub use w1temp_types::{FAMILY_DS18B20, FAMILY_DS18S20};

/// Where the kernel w1 subsystem exposes bus devices
pub const DEFAULT_BASE_DIR: &str = "/sys/bus/w1/devices/";

/// Data file inside each device directory
pub const DATA_FILE: &str = "w1_slave";

/// Device directory prefixes picked up by discovery
pub const SENSOR_FAMILIES: [&str; 2] = [FAMILY_DS18S20, FAMILY_DS18B20];

/// Token ending the status line once a conversion passed its CRC check
pub const READY_MARKER: &str = "YES";

/// Marker preceding the millidegree count on the data line
pub const TEMPERATURE_MARKER: &str = "t=";

/// Calibration token replaced by the sensor's zero-based rank
pub const NUMBER_TOKEN: &str = "##number##";

/// How long a raw snapshot is reused before the bus is read again.
/// Reading a DS18x20 takes hundreds of milliseconds per device.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between readiness checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Upper bound on a readiness wait. Twice the cache timeout, so a stuck
/// sensor always gets at least one fresh filesystem pass before giving up.
pub const DEFAULT_MAX_READY_WAIT: Duration = Duration::from_secs(60);
