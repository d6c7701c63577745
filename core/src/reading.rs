//! The immutable telemetry record each station emits once per tick.
//!
//! Assembly is the only place numeric fields are rounded; a Reading never
//! changes after it is built, and ownership moves to the publish boundary.

use crate::{atmosphere::AtmosphericState, types::StationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One station telemetry record. All numeric fields carry one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: StationId,
    pub name: String,
    pub region: String,
    pub timestamp: String,
    pub season: String,
    pub cloud_cover: f64,
    pub uv_index: f64,
    pub humidity: f64,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation: f64,
    pub solar_radiation: f64,
}

/// Raw derived sensor values for one tick, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorOutputs {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation: f64,
    pub uv_index: f64,
}

impl Reading {
    /// Build the record from station identity, a timestamp, the atmosphere
    /// snapshot, and the derived sensor outputs.
    pub fn assemble(
        id: StationId,
        name: &str,
        region: &str,
        timestamp: DateTime<Utc>,
        atmos: &AtmosphericState,
        sensors: &SensorOutputs,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            region: region.to_string(),
            timestamp: timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            season: atmos.season.label().to_string(),
            cloud_cover: tenths(atmos.cloud_cover),
            uv_index: tenths(sensors.uv_index),
            humidity: tenths(sensors.humidity),
            temperature: tenths(sensors.temperature),
            apparent_temperature: tenths(sensors.apparent_temperature),
            pressure: tenths(atmos.pressure),
            wind_speed: tenths(sensors.wind_speed),
            wind_direction: tenths(sensors.wind_direction),
            precipitation: tenths(sensors.precipitation),
            solar_radiation: tenths(atmos.solar_radiation),
        }
    }

    /// The per-station destination this record is published on.
    pub fn topic(&self) -> String {
        format!("sensors/weather/{}", self.name)
    }
}

/// Round to one decimal — the precision every emitted field carries.
fn tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
