//! JSON rendering of driver results

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use w1temp_sources::{Ds18x20, EnrichedSet};
use w1temp_types::SensorId;

/// `{ "<id>": <degrees or null>, ... }`
pub fn simple_json(temperatures: &BTreeMap<SensorId, Option<f64>>) -> Value {
    let map: Map<String, Value> = temperatures
        .iter()
        .map(|(id, temperature)| (id.to_string(), json!(temperature)))
        .collect();
    Value::Object(map)
}

/// `{ "<id>": { enriched fields } | { "error": "..." }, ... }`
pub fn enriched_json(readings: &EnrichedSet) -> Result<Value> {
    let mut map = Map::new();
    for (id, reading) in readings {
        let value = match reading {
            Ok(reading) => serde_json::to_value(reading)?,
            Err(e) => json!({ "error": e.to_string() }),
        };
        map.insert(id.to_string(), value);
    }
    Ok(Value::Object(map))
}

/// `{ "<id>": "<sensor type>", ... }`
pub fn sensor_list_json(driver: &Ds18x20) -> Value {
    let map: Map<String, Value> = driver
        .sensor_ids()
        .iter()
        .map(|id| (id.to_string(), json!(id.kind())))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use w1temp_types::{CalibrationConfig, CalibrationError};

    #[test]
    fn test_simple_json_uses_null_for_unavailable() {
        let mut temperatures = BTreeMap::new();
        temperatures.insert(SensorId::from("28-aaa"), Some(23.5));
        temperatures.insert(SensorId::from("28-bbb"), None);

        let json = simple_json(&temperatures);
        assert_eq!(json, json!({ "28-aaa": 23.5, "28-bbb": null }));
    }

    #[test]
    fn test_enriched_json_reports_errors_inline() {
        let mut calibration = CalibrationConfig::new();
        calibration.set_default("offset", "0.5").unwrap();

        let mut readings = EnrichedSet::new();
        readings.insert(
            SensorId::from("28-aaa"),
            w1temp_sources::enrich(&SensorId::from("28-aaa"), 0, Some(23.5), Utc::now(), &calibration),
        );
        readings.insert(
            SensorId::from("28-bbb"),
            Err(CalibrationError::MissingKey {
                id: SensorId::from("28-bbb"),
                key: "offset".to_string(),
            }),
        );

        let json = enriched_json(&readings).unwrap();
        assert_eq!(json["28-aaa"]["corrected_value"], 23.0);
        assert_eq!(json["28-aaa"]["type"], "DS18B20");
        assert!(json["28-bbb"]["error"].as_str().unwrap().contains("offset"));
    }
}
