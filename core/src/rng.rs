//! Deterministic workload generation.
//!
//! RULE: nothing here touches a platform RNG. A workload is fully
//! determined by (seed, count, GeneratorConfig), so a generated run can be
//! reproduced from the seed alone.

use crate::{
    config::GeneratorConfig,
    error::SimResult,
    input::processes_from_pairs_with_prefix,
    scheduler::ProcessDescriptor,
    types::SimTime,
};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct WorkloadRng {
    inner: Pcg64Mcg,
}

impl WorkloadRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a float in [lo, hi]. Returns `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_f64() * (hi - lo)
    }

    /// Roll a whole number in [lo, hi].
    pub fn uniform_whole(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u64_below(hi.saturating_sub(lo).saturating_add(1))
    }
}

/// Generate `count` processes with ids `{prefix}1..{prefix}count`.
pub fn generate_workload(
    count: usize,
    seed: u64,
    config: &GeneratorConfig,
    prefix: &str,
) -> SimResult<Vec<ProcessDescriptor>> {
    config.validate()?;
    let mut rng = WorkloadRng::new(seed);
    let pairs: Vec<(SimTime, SimTime)> = (0..count)
        .map(|_| {
            if config.integral {
                let max_arrival = config.max_arrival.max(0.0).floor() as u64;
                let min_burst = (config.min_burst.ceil() as u64).max(1);
                let max_burst = config.max_burst.floor() as u64;
                (
                    rng.uniform_whole(0, max_arrival) as SimTime,
                    rng.uniform_whole(min_burst, max_burst) as SimTime,
                )
            } else {
                (
                    rng.uniform(0.0, config.max_arrival),
                    rng.uniform(config.min_burst, config.max_burst),
                )
            }
        })
        .collect();

    log::debug!("generated {count} processes from seed {seed:#x}");
    processes_from_pairs_with_prefix(&pairs, prefix)
}
