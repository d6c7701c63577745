//! station-runner: headless weather telemetry publisher.
//!
//! Usage:
//!   station-runner --seed 42
//!   station-runner --config data/stations.json --ticks 10 --interval-ms 50

use anyhow::Result;
use crossbeam_channel::bounded;
use skywatch_core::{
    config::SimConfig,
    publish::{publish_one, run_publisher, PublishSink},
    reading::Reading,
    scheduler::Scheduler,
};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

/// Reference sink: one `topic payload` line per reading on stdout. A real
/// deployment swaps this for a broker client with the same contract.
struct StdoutSink;

impl PublishSink for StdoutSink {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<()> {
        println!("{topic} {payload}");
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 0u64);
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].clone());

    let mut config = match &config_path {
        Some(path) => SimConfig::from_json_file(Path::new(path))?,
        None => SimConfig::default_network(seed),
    };
    if args.iter().any(|a| a == "--seed") {
        config.seed = seed;
    }
    if let Some(interval_ms) = parse_opt_arg(&args, "--interval-ms") {
        config.tick_interval_ms = interval_ms;
    }

    println!("skywatch — station-runner");
    println!("  seed:        {}", config.seed);
    println!("  stations:    {}", config.stations.len());
    println!("  tick step:   {}s simulated", config.tick_step_secs);
    println!("  interval:    {}ms", config.tick_interval_ms);
    match ticks {
        0 => println!("  ticks:       unbounded"),
        n => println!("  ticks:       {n}"),
    }
    println!();

    let (tx, rx) = bounded::<Reading>(256);
    let scheduler = Scheduler::spawn(&config, tx);
    let mut sink = StdoutSink;

    if ticks == 0 {
        // Runs until the process is killed.
        run_publisher(rx, &mut sink);
        scheduler.shutdown();
        return Ok(());
    }

    let expected = ticks as usize * config.stations.len();
    let mut per_station: BTreeMap<String, u64> = BTreeMap::new();
    for reading in rx.iter().take(expected) {
        *per_station.entry(reading.name.clone()).or_default() += 1;
        publish_one(&mut sink, &reading);
    }
    scheduler.shutdown();

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  readings:  {expected}");
    for (name, count) in &per_station {
        println!("  {name}: {count}");
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt_arg(args, flag).unwrap_or(default)
}

fn parse_opt_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let value = args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring {flag} {value:?}: not a valid value");
            None
        }
    }
}
