//! Configuration loading and validation tests.

use skywatch_core::{
    config::{SimConfig, StationConfig},
    error::SimError,
    station::Region,
};
use std::fs;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn station(id: u32, name: &str, region: &str) -> StationConfig {
    StationConfig {
        id,
        name: name.into(),
        region: region.into(),
    }
}

fn minimal(stations: Vec<StationConfig>) -> SimConfig {
    let json = serde_json::json!({
        "stations": stations
            .iter()
            .map(|s| serde_json::json!({"id": s.id, "name": s.name, "region": s.region}))
            .collect::<Vec<_>>(),
    });
    serde_json::from_value(json).expect("parse minimal config")
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Omitted fields fall back to their serde defaults: seed 42, one
/// simulated minute per tick, one real minute between ticks, no fixed
/// epoch.
#[test]
fn omitted_fields_take_defaults() {
    let config = minimal(vec![station(1, "Barcelona", "coastal-urban")]);

    assert_eq!(config.seed, 42);
    assert_eq!(config.tick_step_secs, 60);
    assert_eq!(config.tick_interval_ms, 60_000);
    assert!(config.epoch.is_none());
    assert!(config.validate().is_ok());
}

/// The built-in network is five stations with distinct ids and passes
/// its own validation.
#[test]
fn default_network_is_valid() {
    let config = SimConfig::default_network(7);

    assert_eq!(config.seed, 7);
    assert_eq!(config.stations.len(), 5);
    assert!(config.validate().is_ok());

    let mut ids: Vec<u32> = config.stations.iter().map(|s| s.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5, "default network has duplicate station ids");
}

#[test]
fn empty_station_list_is_rejected() {
    let config = minimal(vec![]);
    match config.validate() {
        Err(SimError::Config(msg)) => {
            assert!(msg.contains("empty"), "unexpected message: {msg}")
        }
        other => panic!("expected Config error for empty station list, got {other:?}"),
    }
}

#[test]
fn duplicate_station_ids_are_rejected() {
    let config = minimal(vec![
        station(1, "Barcelona", "coastal-urban"),
        station(1, "Girona", "foothill"),
    ]);
    match config.validate() {
        Err(SimError::Config(msg)) => {
            assert!(msg.contains("duplicate"), "unexpected message: {msg}")
        }
        other => panic!("expected Config error for duplicate ids, got {other:?}"),
    }
}

#[test]
fn non_positive_tick_step_is_rejected() {
    let mut config = minimal(vec![station(1, "Barcelona", "coastal-urban")]);
    config.tick_step_secs = 0;
    assert!(
        matches!(config.validate(), Err(SimError::Config(_))),
        "tick_step_secs = 0 must fail validation"
    );
}

/// Unknown region labels are a display string, not an error: the config
/// loads and the model side degrades them to zero bias.
#[test]
fn unknown_regions_load_and_degrade_to_zero_bias() {
    let config = minimal(vec![station(2, "Tarragona", "south-coast")]);
    assert!(config.validate().is_ok());
    assert_eq!(Region::from_label("south-coast"), Region::Other);
}

/// Round trip through an on-disk JSON file, the way the runner loads it.
#[test]
fn loads_from_a_json_file() {
    let path = std::env::temp_dir().join("skywatch-config-load-test.json");
    fs::write(
        &path,
        r#"{
            "seed": 99,
            "tick_interval_ms": 250,
            "stations": [
                { "id": 1, "name": "Barcelona", "region": "coastal-urban" },
                { "id": 4, "name": "Lleida", "region": "dry-interior" }
            ]
        }"#,
    )
    .expect("write temp config");

    let config = SimConfig::from_json_file(&path).expect("load config");
    fs::remove_file(&path).ok();

    assert_eq!(config.seed, 99);
    assert_eq!(config.tick_interval_ms, 250);
    assert_eq!(config.tick_step_secs, 60, "omitted step should default");
    assert_eq!(config.stations.len(), 2);
    assert_eq!(config.stations[1].name, "Lleida");
}

#[test]
fn missing_file_surfaces_an_io_error() {
    let path = std::env::temp_dir().join("skywatch-config-does-not-exist.json");
    match SimConfig::from_json_file(&path) {
        Err(SimError::Io(_)) => {}
        other => panic!("expected Io error for a missing file, got {other:?}"),
    }
}

#[test]
fn malformed_json_surfaces_a_serialization_error() {
    let path = std::env::temp_dir().join("skywatch-config-malformed-test.json");
    fs::write(&path, "{ not json").expect("write temp file");

    let result = SimConfig::from_json_file(&path);
    fs::remove_file(&path).ok();

    match result {
        Err(SimError::Serialization(_)) => {}
        other => panic!("expected Serialization error for malformed JSON, got {other:?}"),
    }
}
