//! Simulation clock — owns tick state and the simulated timeline.
//!
//! Each long-lived task carries its own clock; clocks never synchronize
//! beyond sharing the run's epoch. The simulated instant for tick N is
//! always `epoch + N * step`, so a fixed epoch makes a run reproducible.

use crate::types::Tick;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    epoch: DateTime<Utc>,
    step_secs: i64,
    pub current_tick: Tick,
}

impl SimClock {
    /// Clock anchored at the current wall-clock time.
    pub fn starting_now(step_secs: i64) -> Self {
        Self::anchored(Utc::now(), step_secs)
    }

    /// Clock anchored at a fixed instant. Used for reproducible runs.
    pub fn anchored(epoch: DateTime<Utc>, step_secs: i64) -> Self {
        Self {
            epoch,
            step_secs,
            current_tick: 0,
        }
    }

    /// Advance one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// The simulated instant for the current tick.
    pub fn now(&self) -> DateTime<Utc> {
        self.epoch + Duration::seconds(self.step_secs * self.current_tick as i64)
    }
}
