//! skywatch-core: simulated weather-station telemetry.
//!
//! A single shared atmosphere advances on a fixed tick; each configured
//! station combines its own random walk with regional bias and the latest
//! atmosphere snapshot to derive a localized reading, which leaves the
//! core through a publish channel once per tick.

pub mod atmosphere;
pub mod clock;
pub mod config;
pub mod error;
pub mod publish;
pub mod reading;
pub mod rng;
pub mod scheduler;
pub mod station;
pub mod types;
