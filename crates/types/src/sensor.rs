//! Sensor identity and family classification

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Family code prefix of the DS1820 / DS18S20 parts
pub const FAMILY_DS18S20: &str = "10";

/// Family code prefix of the DS18B20 part
pub const FAMILY_DS18B20: &str = "28";

/// Identifier of a 1-wire device, taken from its sysfs directory name
/// (e.g. `28-0316a2791eff`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(String);

impl SensorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sensor model derived from the family code prefix
    pub fn kind(&self) -> SensorKind {
        SensorKind::from_id(&self.0)
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SensorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SensorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Sensor model reported alongside enriched readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SensorKind {
    /// Family `10`: DS1820 and DS18S20
    #[serde(rename = "DS18S20")]
    Ds18s20,
    /// Family `28`: DS18B20
    #[serde(rename = "DS18B20")]
    Ds18b20,
    #[serde(rename = "unknown")]
    Unknown,
}

impl SensorKind {
    /// Classify a device id by its family code prefix
    pub fn from_id(id: &str) -> Self {
        if id.starts_with(FAMILY_DS18S20) {
            SensorKind::Ds18s20
        } else if id.starts_with(FAMILY_DS18B20) {
            SensorKind::Ds18b20
        } else {
            SensorKind::Unknown
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SensorKind::Ds18s20 => "DS18S20",
            SensorKind::Ds18b20 => "DS18B20",
            SensorKind::Unknown => "unknown",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_family_prefix() {
        assert_eq!(SensorId::from("28-000123").kind(), SensorKind::Ds18b20);
        assert_eq!(SensorId::from("10-000abc").kind(), SensorKind::Ds18s20);
        assert_eq!(SensorId::from("99-xyz").kind(), SensorKind::Unknown);
    }

    #[test]
    fn test_kind_serializes_as_label() {
        let json = serde_json::to_string(&SensorKind::Ds18b20).unwrap();
        assert_eq!(json, "\"DS18B20\"");
        assert_eq!(SensorKind::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_sensor_id_is_transparent() {
        let id = SensorId::from("28-aaa");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"28-aaa\"");
        assert_eq!(id.as_str(), "28-aaa");
    }
}
