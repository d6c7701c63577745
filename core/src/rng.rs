//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed on the run configuration.
//!
//! The atmosphere engine and each station get their own RNG stream,
//! seeded deterministically from (master_seed XOR stream_index). This means:
//!   - Adding or removing a station never changes another station's stream.
//!   - Each stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::types::StationId;

/// A deterministic RNG stream for a single simulation task.
pub struct StreamRng {
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed and a stable stream index.
    /// The index must never change once assigned.
    fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform draw in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Bernoulli trial: returns true with probability p.
    /// Any p >= 1.0 always fires; any p <= 0.0 never does.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Gaussian draw, mean 0.0, the given standard deviation (Box-Muller).
    pub fn gaussian(&mut self, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let mag = (-2.0 * u1.ln()).sqrt();
        sigma * mag * (std::f64::consts::TAU * u2).cos()
    }
}

/// All RNG streams for a single run, derived from the master seed.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Stream 0 is reserved for the atmosphere engine.
    pub fn for_atmosphere(&self) -> StreamRng {
        StreamRng::new(self.master_seed, 0)
    }

    /// Station streams start at index 1 and are keyed by station id,
    /// so the shape of the station list never shifts another station's draws.
    pub fn for_station(&self, id: StationId) -> StreamRng {
        StreamRng::new(self.master_seed, 1 + u64::from(id))
    }
}
