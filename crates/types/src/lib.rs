//! w1temp-types: Shared data types for the w1temp sensor driver.
//!
//! Pure data types (sensor identity, raw and enriched readings, calibration
//! settings) shared by every w1temp crate. Nothing here touches the
//! filesystem.

pub mod calibration;
pub mod reading;
pub mod sensor;

pub use calibration::{
    CalibrationConfig, CalibrationError, CalibrationValue, DEFAULT_SECTION, OFFSET_KEY,
    RESERVED_KEYS,
};
pub use reading::{EnrichedReading, RawReading};
pub use sensor::{SensorId, SensorKind, FAMILY_DS18B20, FAMILY_DS18S20};
