//! The global atmosphere engine — the single shared weather state.
//!
//! RULES:
//!   - The engine is the sole mutator of AtmosphericState.
//!   - Stations read through snapshot() only. The snapshot is copied out
//!     under the same lock tick() mutates under, so a reader never sees
//!     a half-applied update.
//!   - The engine performs no I/O and cannot fail; it runs for the whole
//!     process lifetime.

use crate::rng::StreamRng;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub const PRESSURE_MIN: f64 = 950.0;
pub const PRESSURE_MAX: f64 = 1050.0;
pub const CLOUD_MIN: f64 = 0.0;
pub const CLOUD_MAX: f64 = 100.0;
/// Clear-sky radiation ceiling at solar noon, W/m².
pub const RADIATION_PEAK: f64 = 1200.0;

pub const STORM_PROBABILITY: f64 = 0.02;
pub const HEAT_WAVE_PROBABILITY: f64 = 0.01;

/// Calendar season, a pure function of the simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            _ => Self::Autumn,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
        }
    }
}

/// Daylight scaling for solar radiation: zero outside 06:00-18:00,
/// a triangular curve peaking at noon in between.
pub fn daylight_factor(hour: u32) -> f64 {
    if !(6..=18).contains(&hour) {
        return 0.0;
    }
    (1.0 - (12.0 - hour as f64).abs() / 6.0).max(0.0)
}

/// One consistent copy of the shared atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericState {
    pub pressure: f64,
    pub cloud_cover: f64,
    pub solar_radiation: f64,
    pub storm_active: bool,
    pub heat_wave_active: bool,
    pub season: Season,
}

impl Default for AtmosphericState {
    fn default() -> Self {
        // Mid-range startup values; the random walk drifts away from here.
        Self {
            pressure: 1015.0,
            cloud_cover: 30.0,
            solar_radiation: 500.0,
            storm_active: false,
            heat_wave_active: false,
            season: Season::Spring,
        }
    }
}

struct EngineCell {
    state: AtmosphericState,
    rng: StreamRng,
}

/// Owns the single shared AtmosphericState and its RNG stream.
pub struct AtmosphereEngine {
    cell: Mutex<EngineCell>,
}

impl AtmosphereEngine {
    pub fn new(rng: StreamRng) -> Self {
        Self {
            cell: Mutex::new(EngineCell {
                state: AtmosphericState::default(),
                rng,
            }),
        }
    }

    /// Advance the shared state one tick at the given simulated instant.
    pub fn tick(&self, now: DateTime<Utc>) {
        let mut cell = self.cell.lock().expect("atmosphere lock poisoned");
        let EngineCell { state, rng } = &mut *cell;

        state.season = Season::from_month(now.month());

        let radiation_cap = RADIATION_PEAK * daylight_factor(now.hour());
        state.pressure = (state.pressure + rng.gaussian(0.2)).clamp(PRESSURE_MIN, PRESSURE_MAX);
        state.cloud_cover = (state.cloud_cover + rng.gaussian(5.0)).clamp(CLOUD_MIN, CLOUD_MAX);
        state.solar_radiation =
            (state.solar_radiation + rng.gaussian(10.0)).clamp(0.0, radiation_cap);

        // Rare events re-roll every tick; they are not latched.
        state.heat_wave_active = rng.chance(HEAT_WAVE_PROBABILITY);
        state.storm_active = rng.chance(STORM_PROBABILITY);

        log::debug!(
            "atmosphere: season={} pressure={:.1} cloud={:.1} radiation={:.1} storm={} heat_wave={}",
            state.season.label(),
            state.pressure,
            state.cloud_cover,
            state.solar_radiation,
            state.storm_active,
            state.heat_wave_active
        );
    }

    /// A consistent copy of the current state. Safe to call while tick() runs.
    pub fn snapshot(&self) -> AtmosphericState {
        self.cell.lock().expect("atmosphere lock poisoned").state
    }
}
