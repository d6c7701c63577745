//! Run configuration — station list, timing, seed.
//!
//! Everything here is static after load. Unknown region labels are kept
//! verbatim for display and degrade to zero bias in the sensor model;
//! they are never a load error.

use crate::{
    error::{SimError, SimResult},
    types::StationId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub id: StationId,
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Master seed every RNG stream derives from.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Simulated seconds each tick advances the clock by.
    #[serde(default = "default_tick_step_secs")]
    pub tick_step_secs: i64,
    /// Wall-clock milliseconds each task sleeps between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Fixed simulated start instant. None anchors at wall-clock now.
    #[serde(default)]
    pub epoch: Option<DateTime<Utc>>,
    pub stations: Vec<StationConfig>,
}

fn default_seed() -> u64 {
    42
}

fn default_tick_step_secs() -> i64 {
    60
}

fn default_tick_interval_ms() -> u64 {
    60_000
}

impl SimConfig {
    pub fn from_json_file(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.stations.is_empty() {
            return Err(SimError::Config("station list is empty".into()));
        }
        let mut ids: Vec<StationId> = self.stations.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.stations.len() {
            return Err(SimError::Config("duplicate station ids".into()));
        }
        if self.tick_step_secs <= 0 {
            return Err(SimError::Config(format!(
                "tick_step_secs must be positive, got {}",
                self.tick_step_secs
            )));
        }
        Ok(())
    }

    /// The instant every task's clock anchors at.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.epoch.unwrap_or_else(Utc::now)
    }

    /// The built-in five-station network used when no config file is given.
    pub fn default_network(seed: u64) -> Self {
        Self {
            seed,
            tick_step_secs: default_tick_step_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            epoch: None,
            stations: vec![
                station(1, "Barcelona", "coastal-urban"),
                station(2, "Tarragona", "south-coast"),
                station(3, "Girona", "foothill"),
                station(4, "Lleida", "dry-interior"),
                station(5, "Pirineos", "high-mountain"),
            ],
        }
    }
}

fn station(id: StationId, name: &str, region: &str) -> StationConfig {
    StationConfig {
        id,
        name: name.to_string(),
        region: region.to_string(),
    }
}
