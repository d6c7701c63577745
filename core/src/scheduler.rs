//! The simulation scheduler — one long-lived task for the atmosphere
//! engine and one per station, all running until shutdown is signalled.
//!
//! RULES:
//!   - Stations never coordinate with each other. The only shared state
//!     is the atmosphere, read through snapshot().
//!   - Completed readings leave through a channel rather than a direct
//!     call into the transport, so a test can intercept them.
//!   - Within one station's task ticks are strictly sequential; across
//!     tasks no ordering is guaranteed.

use crate::{
    atmosphere::AtmosphereEngine,
    clock::SimClock,
    config::SimConfig,
    reading::Reading,
    rng::RngBank,
    station::StationModel,
};
use crossbeam_channel::Sender;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle over the running simulation tasks.
pub struct Scheduler {
    shutdown: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawn the engine task and one task per configured station.
    ///
    /// Readings flow out through `tx`. Dropping the receiver stops every
    /// station task at its next send; shutdown() stops them at their next
    /// tick regardless.
    pub fn spawn(config: &SimConfig, tx: Sender<Reading>) -> Scheduler {
        let shutdown = Arc::new(AtomicBool::new(false));
        let bank = RngBank::new(config.seed);
        let engine = Arc::new(AtmosphereEngine::new(bank.for_atmosphere()));
        let epoch = config.start_time();
        let interval = Duration::from_millis(config.tick_interval_ms);

        let mut handles = Vec::with_capacity(config.stations.len() + 1);

        {
            let engine = Arc::clone(&engine);
            let stop = Arc::clone(&shutdown);
            let mut clock = SimClock::anchored(epoch, config.tick_step_secs);
            handles.push(thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    clock.advance();
                    engine.tick(clock.now());
                    thread::sleep(interval);
                }
            }));
        }

        for station in &config.stations {
            let engine = Arc::clone(&engine);
            let stop = Arc::clone(&shutdown);
            let tx = tx.clone();
            let mut clock = SimClock::anchored(epoch, config.tick_step_secs);
            let mut model = StationModel::new(station.clone(), bank.for_station(station.id));
            handles.push(thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    clock.advance();
                    let snapshot = engine.snapshot();
                    let reading = model.tick(clock.now(), &snapshot);
                    if tx.send(reading).is_err() {
                        break; // receiver gone, nothing left to publish to
                    }
                    thread::sleep(interval);
                }
            }));
        }

        Scheduler { shutdown, handles }
    }

    /// Signal every task to stop and wait for all of them to exit.
    pub fn shutdown(self) {
        self.shutdown.store(true, Ordering::Relaxed);
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}
