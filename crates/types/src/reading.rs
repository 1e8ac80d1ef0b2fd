//! Raw and enriched sensor readings

use crate::calibration::CalibrationValue;
use crate::sensor::{SensorId, SensorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unparsed lines of a sensor's data file at one instant
///
/// A DS18x20 `w1_slave` file looks like:
///
/// ```text
/// 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
/// 72 01 4b 46 7f ff 0e 10 57 t=23125
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    pub lines: Vec<String>,
}

impl RawReading {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// First line: CRC check result ending in the readiness marker
    pub fn status_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Second line: scratchpad bytes followed by `t=<millidegrees>`
    pub fn data_line(&self) -> Option<&str> {
        self.lines.get(1).map(String::as_str)
    }
}

/// A decoded temperature combined with its calibration settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedReading {
    pub id: SensorId,
    /// Decoded temperature, `None` when the sensor is unavailable
    pub value: Option<f64>,
    /// `value - offset`
    pub corrected_value: Option<f64>,
    /// Capture time of the snapshot the value was decoded from
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: SensorKind,
    /// Every calibration setting that applies to this sensor, coerced
    #[serde(flatten)]
    pub fields: BTreeMap<String, CalibrationValue>,
}

impl EnrichedReading {
    pub fn field(&self, key: &str) -> Option<&CalibrationValue> {
        self.fields.get(key)
    }
}
