//! Calibration configuration and typed calibration values
//!
//! Calibration is a set of text settings: one `DEFAULT` section that every
//! sensor inherits, plus optional per-sensor sections keyed by sensor id that
//! override individual settings. Values stay text until a reading is
//! enriched, at which point each one is coerced to an int, a float, or left
//! as text (first form that parses wins).

use crate::sensor::SensorId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Name of the section every sensor inherits from
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Required numeric setting subtracted from the raw value
pub const OFFSET_KEY: &str = "offset";

/// Output field names that calibration settings may not shadow
pub const RESERVED_KEYS: &[&str] = &["id", "value", "corrected_value", "timestamp", "type"];

/// Errors raised while building or applying calibration settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("sensor {id}: required calibration key '{key}' is not set in its section or in DEFAULT")]
    MissingKey { id: SensorId, key: String },

    #[error("sensor {id}: calibration key '{key}' must be numeric, got '{value}'")]
    NonNumeric {
        id: SensorId,
        key: String,
        value: String,
    },

    #[error("calibration key '{key}' collides with a built-in reading field")]
    ReservedKey { key: String },

    #[error("calibration section '{section}': value of '{key}' must be a scalar")]
    NestedValue { section: String, key: String },
}

/// A calibration setting after type coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalibrationValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CalibrationValue {
    /// Coerce setting text by priority: int, then float, then text.
    ///
    /// Only a plain run of ASCII digits counts as an int. Anything else that
    /// parses as a number (signs, decimals, exponents, surrounding blanks)
    /// becomes a float. A digit run too large for `i64` falls through to
    /// float as well.
    pub fn coerce(text: &str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(int) = text.parse::<i64>() {
                return CalibrationValue::Int(int);
            }
        }

        match text.trim().parse::<f64>() {
            Ok(float) => CalibrationValue::Float(float),
            Err(_) => CalibrationValue::Text(text.to_string()),
        }
    }

    /// Numeric view of the value, `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CalibrationValue::Int(int) => Some(*int as f64),
            CalibrationValue::Float(float) => Some(*float),
            CalibrationValue::Text(_) => None,
        }
    }
}

type RawSections = BTreeMap<String, BTreeMap<String, Value>>;
type TextSections = BTreeMap<String, BTreeMap<String, String>>;

/// Default settings plus per-sensor overrides
///
/// Serialized as a JSON object of sections:
///
/// ```json
/// {
///   "DEFAULT": { "offset": "0.5", "name": "probe ##number##" },
///   "28-0316a2791eff": { "offset": "1.0" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSections", into = "TextSections")]
pub struct CalibrationConfig {
    defaults: BTreeMap<String, String>,
    sensors: BTreeMap<SensorId, BTreeMap<String, String>>,
}

impl CalibrationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a setting in the `DEFAULT` section
    pub fn set_default(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CalibrationError> {
        let key = checked_key(key.into())?;
        self.defaults.insert(key, value.into());
        Ok(())
    }

    /// Set a setting in one sensor's section
    pub fn set_override(
        &mut self,
        id: impl Into<SensorId>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CalibrationError> {
        let key = checked_key(key.into())?;
        self.sensors
            .entry(id.into())
            .or_default()
            .insert(key, value.into());
        Ok(())
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    /// Sensor-specific section, if one exists
    pub fn section(&self, id: &SensorId) -> Option<&BTreeMap<String, String>> {
        self.sensors.get(id)
    }

    /// All settings that apply to a sensor: defaults overlaid with its section
    pub fn resolve(&self, id: &SensorId) -> BTreeMap<String, String> {
        let mut settings = self.defaults.clone();
        if let Some(section) = self.sensors.get(id) {
            for (key, value) in section {
                settings.insert(key.clone(), value.clone());
            }
        }
        settings
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.sensors.is_empty()
    }
}

fn checked_key(key: String) -> Result<String, CalibrationError> {
    if RESERVED_KEYS.contains(&key.as_str()) {
        return Err(CalibrationError::ReservedKey { key });
    }
    Ok(key)
}

/// Text form of a scalar setting; strings are taken verbatim
fn scalar_text(section: &str, key: &str, value: Value) -> Result<String, CalibrationError> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(CalibrationError::NestedValue {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

impl TryFrom<RawSections> for CalibrationConfig {
    type Error = CalibrationError;

    fn try_from(raw: RawSections) -> Result<Self, Self::Error> {
        let mut config = CalibrationConfig::new();

        for (section, entries) in raw {
            for (key, value) in entries {
                let text = scalar_text(&section, &key, value)?;
                if section == DEFAULT_SECTION {
                    config.set_default(key, text)?;
                } else {
                    config.set_override(section.as_str(), key, text)?;
                }
            }
        }

        Ok(config)
    }
}

impl From<CalibrationConfig> for TextSections {
    fn from(config: CalibrationConfig) -> Self {
        let mut sections = TextSections::new();
        if !config.defaults.is_empty() {
            sections.insert(DEFAULT_SECTION.to_string(), config.defaults);
        }
        for (id, section) in config.sensors {
            sections.insert(id.to_string(), section);
        }
        sections
    }
}
