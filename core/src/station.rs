//! Per-station sensor model.
//!
//! RULES:
//!   - Each station owns its state and RNG stream exclusively; the only
//!     shared input is the atmosphere snapshot passed into tick().
//!   - Every output is bound-clamped by construction. The model performs
//!     no I/O and cannot fail.

use crate::{
    atmosphere::AtmosphericState,
    config::StationConfig,
    reading::{Reading, SensorOutputs},
    rng::StreamRng,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TEMPERATURE_MIN: f64 = 5.0;
pub const TEMPERATURE_MAX: f64 = 40.0;
pub const HUMIDITY_MIN: f64 = 20.0;
pub const HUMIDITY_MAX: f64 = 95.0;
pub const WIND_MIN: f64 = 0.0;
pub const WIND_MAX: f64 = 20.0;

/// Flat temperature boost while a heat wave is active, °C.
pub const HEAT_WAVE_BOOST: f64 = 5.0;

pub const STORM_RAIN_INTENSITY: f64 = 5.0;
pub const BASE_RAIN_INTENSITY: f64 = 1.0;

/// Climate region a station sits in. Drives the fixed bias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    CoastalUrban,
    DryInterior,
    HighMountain,
    Foothill,
    /// Any region without a bias entry. Applies zero offsets.
    Other,
}

impl Region {
    /// Map a configured region label onto the bias table. Unknown labels
    /// fall back to Other rather than failing the station.
    pub fn from_label(label: &str) -> Self {
        match label {
            "coastal-urban" => Self::CoastalUrban,
            "dry-interior" => Self::DryInterior,
            "high-mountain" => Self::HighMountain,
            "foothill" => Self::Foothill,
            _ => Self::Other,
        }
    }

    pub fn bias(&self) -> RegionalBias {
        match self {
            Self::CoastalUrban => RegionalBias { temperature: 0.0, humidity: 10.0 },
            Self::DryInterior => RegionalBias { temperature: 3.0, humidity: -10.0 },
            Self::HighMountain => RegionalBias { temperature: -7.0, humidity: 5.0 },
            Self::Foothill => RegionalBias { temperature: -2.0, humidity: 5.0 },
            Self::Other => RegionalBias::ZERO,
        }
    }
}

/// Fixed additive offsets applied to a station's draws every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalBias {
    pub temperature: f64,
    pub humidity: f64,
}

impl RegionalBias {
    pub const ZERO: Self = Self { temperature: 0.0, humidity: 0.0 };
}

/// Mutable sensor state, owned exclusively by the station's task.
///
/// The temperature bias is applied at output and never folded into the
/// stored trend; the humidity bias accumulates into stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationState {
    pub temperature_trend: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
}

/// One station's simulation: static identity plus its random-walk state.
pub struct StationModel {
    config: StationConfig,
    region: Region,
    state: StationState,
    rng: StreamRng,
}

impl StationModel {
    /// Seed a fresh model. Temperature and humidity start inside a
    /// plausible band so stations do not begin in lockstep.
    pub fn new(config: StationConfig, mut rng: StreamRng) -> Self {
        let temperature = rng.uniform(15.0, 25.0);
        let humidity = rng.uniform(40.0, 70.0);
        let region = Region::from_label(&config.region);
        Self {
            config,
            region,
            state: StationState {
                temperature_trend: temperature,
                humidity,
                wind_speed: 5.0,
                wind_direction: 180.0,
            },
            rng,
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn state(&self) -> &StationState {
        &self.state
    }

    /// Advance the sensors one tick against the given atmosphere snapshot
    /// and assemble the resulting reading.
    pub fn tick(&mut self, now: DateTime<Utc>, atmos: &AtmosphericState) -> Reading {
        let bias = self.region.bias();

        self.state.temperature_trend += self.rng.gaussian(0.3);
        let heat_boost = if atmos.heat_wave_active { HEAT_WAVE_BOOST } else { 0.0 };
        let temperature = (self.state.temperature_trend + bias.temperature + heat_boost)
            .clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);

        self.state.humidity = (self.state.humidity + self.rng.gaussian(0.5) + bias.humidity)
            .clamp(HUMIDITY_MIN, HUMIDITY_MAX);

        self.state.wind_speed =
            (self.state.wind_speed + self.rng.gaussian(0.5)).clamp(WIND_MIN, WIND_MAX);
        self.state.wind_direction =
            wrap_degrees(self.state.wind_direction + self.rng.gaussian(2.0));

        let precipitation = self.roll_precipitation(atmos);

        let sensors = SensorOutputs {
            temperature,
            apparent_temperature: apparent_temperature(
                temperature,
                self.state.wind_speed,
                self.state.humidity,
            ),
            humidity: self.state.humidity,
            wind_speed: self.state.wind_speed,
            wind_direction: self.state.wind_direction,
            precipitation,
            uv_index: uv_index(atmos.solar_radiation),
        };

        log::debug!(
            "station {} ({}): temperature={:.1} apparent={:.1} humidity={:.1} wind={:.1} dir={:.1} precipitation={:.1} uv={:.1}",
            self.config.id,
            self.config.name,
            sensors.temperature,
            sensors.apparent_temperature,
            sensors.humidity,
            sensors.wind_speed,
            sensors.wind_direction,
            sensors.precipitation,
            sensors.uv_index
        );

        Reading::assemble(
            self.config.id,
            &self.config.name,
            &self.config.region,
            now,
            atmos,
            &sensors,
        )
    }

    fn roll_precipitation(&mut self, atmos: &AtmosphericState) -> f64 {
        // A storm under full cloud cover pushes the sum past 1.0; clamp so
        // the draw stays a plain Bernoulli gate that always fires there.
        let base = if atmos.storm_active { 0.7 } else { 0.2 };
        let rain_probability = (base + atmos.cloud_cover / 200.0).min(1.0);
        if self.rng.chance(rain_probability) {
            if atmos.storm_active {
                STORM_RAIN_INTENSITY
            } else {
                BASE_RAIN_INTENSITY
            }
        } else {
            0.0
        }
    }
}

/// Wrap an angle into [0, 360). Handles both underflow and overflow,
/// including deltas larger than a full revolution.
pub fn wrap_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Human-perceived temperature.
///
/// Wind chill applies below 10 °C with wind above 3; heat index applies
/// above 26 °C with humidity above 40. The two regimes cannot overlap,
/// and outside both the raw temperature passes through unchanged.
pub fn apparent_temperature(temperature: f64, wind_speed: f64, humidity: f64) -> f64 {
    if temperature < 10.0 && wind_speed > 3.0 {
        let v = wind_speed.powf(0.16);
        13.12 + 0.6215 * temperature - 11.37 * v + 0.3965 * temperature * v
    } else if temperature > 26.0 && humidity > 40.0 {
        -8.784695 + 1.61139411 * temperature + 2.338549 * humidity
            - 0.14611605 * temperature * humidity
            - 0.012308094 * temperature * temperature
            - 0.016424828 * humidity * humidity
            + 0.002211732 * temperature * temperature * humidity
            + 0.00072546 * temperature * humidity * humidity
            - 0.000003582 * temperature * temperature * humidity * humidity
    } else {
        temperature
    }
}

/// Linear UV scale: radiation 0-1200 W/m² maps onto index 0-11.
pub fn uv_index(solar_radiation: f64) -> f64 {
    (solar_radiation / 1200.0 * 11.0).clamp(0.0, 11.0)
}
