//! Enrichment of decoded temperatures with calibration settings

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use w1temp_core::NUMBER_TOKEN;
use w1temp_types::{
    CalibrationConfig, CalibrationError, CalibrationValue, EnrichedReading, SensorId, OFFSET_KEY,
};

/// Per-sensor enrichment outcome; a calibration problem only fails its own sensor
pub type EnrichedSet = BTreeMap<SensorId, Result<EnrichedReading, CalibrationError>>;

/// Build the enriched reading for one sensor
///
/// `rank` is the sensor's zero-based position in ascending id order and
/// replaces every `##number##` token in its settings before coercion.
pub fn enrich(
    id: &SensorId,
    rank: usize,
    value: Option<f64>,
    timestamp: DateTime<Utc>,
    calibration: &CalibrationConfig,
) -> Result<EnrichedReading, CalibrationError> {
    let rank_text = rank.to_string();

    let fields: BTreeMap<String, CalibrationValue> = calibration
        .resolve(id)
        .into_iter()
        .map(|(key, text)| {
            let text = text.replace(NUMBER_TOKEN, &rank_text);
            (key, CalibrationValue::coerce(&text))
        })
        .collect();

    let offset = match fields.get(OFFSET_KEY) {
        None => {
            return Err(CalibrationError::MissingKey {
                id: id.clone(),
                key: OFFSET_KEY.to_string(),
            })
        }
        Some(CalibrationValue::Text(text)) => {
            return Err(CalibrationError::NonNumeric {
                id: id.clone(),
                key: OFFSET_KEY.to_string(),
                value: text.clone(),
            })
        }
        Some(CalibrationValue::Int(int)) => *int as f64,
        Some(CalibrationValue::Float(float)) => *float,
    };

    Ok(EnrichedReading {
        id: id.clone(),
        value,
        corrected_value: value.map(|value| value - offset),
        timestamp,
        kind: id.kind(),
        fields,
    })
}
