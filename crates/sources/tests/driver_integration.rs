//! Integration tests for the DS18x20 driver against a fake sysfs tree

use std::fs;
use std::path::Path;
use std::time::Duration;
use w1temp_core::DriverError;
use w1temp_sources::{DriverSettings, Ds18x20};
use w1temp_types::{CalibrationConfig, CalibrationValue, SensorId, SensorKind};

fn write_device(base: &Path, id: &str, content: &str) {
    let dir = base.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("w1_slave"), content).unwrap();
}

fn ready(millidegrees: i64) -> String {
    format!(
        "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n72 01 4b 46 7f ff 0e 10 57 t={}\n",
        millidegrees
    )
}

fn settings(base: &Path) -> DriverSettings {
    DriverSettings {
        base_dir: base.to_path_buf(),
        cache_timeout_secs: 0,
        poll_interval_ms: 5,
        max_ready_wait_secs: Some(1),
    }
}

#[test]
fn test_discovers_and_reads_sysfs_tree() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-0316a2791eff", &ready(23500));
    write_device(tmp.path(), "10-000802b4c8a1", &ready(-1062));
    fs::create_dir_all(tmp.path().join("w1_bus_master1")).unwrap();

    let driver = Ds18x20::new(&settings(tmp.path()));

    assert_eq!(
        driver.sensor_ids(),
        &[SensorId::from("10-000802b4c8a1"), SensorId::from("28-0316a2791eff")]
    );

    let temperatures = driver.read_all_simple().unwrap();
    assert_eq!(temperatures[&SensorId::from("28-0316a2791eff")], Some(23.5));
    assert_eq!(temperatures[&SensorId::from("10-000802b4c8a1")], Some(-1.062));
}

#[test]
fn test_fresh_pass_sees_file_changes() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-aaa", &ready(20000));

    let driver = Ds18x20::new(&settings(tmp.path()));
    let id = SensorId::from("28-aaa");
    assert_eq!(driver.read_temperature(&id).unwrap(), Some(20.0));

    write_device(tmp.path(), "28-aaa", &ready(21000));
    std::thread::sleep(Duration::from_millis(10));
    assert_eq!(driver.read_temperature(&id).unwrap(), Some(21.0));
}

#[test]
fn test_cached_pass_hides_file_changes() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-aaa", &ready(20000));

    let driver = Ds18x20::new(&DriverSettings {
        cache_timeout_secs: 30,
        ..settings(tmp.path())
    });
    let id = SensorId::from("28-aaa");
    assert_eq!(driver.read_temperature(&id).unwrap(), Some(20.0));

    write_device(tmp.path(), "28-aaa", &ready(21000));
    assert_eq!(driver.read_temperature(&id).unwrap(), Some(20.0));
}

#[test]
fn test_removed_device_file_is_a_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-aaa", &ready(20000));

    let driver = Ds18x20::new(&settings(tmp.path()));
    fs::remove_file(tmp.path().join("28-aaa").join("w1_slave")).unwrap();

    let err = driver.read_all_simple().unwrap_err();
    assert!(matches!(err, DriverError::Read { .. }));
}

#[test]
fn test_enriched_read_from_json_calibration() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-aaa", &ready(23500));
    write_device(tmp.path(), "28-bbb", &ready(18000));

    let calibration: CalibrationConfig = serde_json::from_str(
        r#"{
            "DEFAULT": { "offset": "0.5", "name": "probe ##number##" },
            "28-bbb": { "offset": "1.0", "name": "freezer" }
        }"#,
    )
    .unwrap();

    let driver = Ds18x20::new(&settings(tmp.path()));
    let enriched = driver.read_all_enriched(&calibration).unwrap();

    let first = enriched[&SensorId::from("28-aaa")].as_ref().unwrap();
    assert_eq!(first.corrected_value, Some(23.0));
    assert_eq!(first.fields["name"], CalibrationValue::Text("probe 0".to_string()));
    assert_eq!(first.kind, SensorKind::Ds18b20);

    let second = enriched[&SensorId::from("28-bbb")].as_ref().unwrap();
    assert_eq!(second.corrected_value, Some(17.0));
    assert_eq!(second.fields["name"], CalibrationValue::Text("freezer".to_string()));
}
