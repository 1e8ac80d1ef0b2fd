//! w1temp: DS18x20 1-wire temperature sensors on Linux
//!
//! This library wires the sensor driver crates to the application:
//! - Configuration loading (driver settings and calibration)
//! - JSON rendering of simple and enriched readings

pub mod config;
pub mod output;

// Re-export commonly used types
pub use config::{load_calibration, AppConfig};
pub use w1temp_sources::{DriverSettings, Ds18x20};
pub use w1temp_types::{CalibrationConfig, EnrichedReading, SensorId, SensorKind};
