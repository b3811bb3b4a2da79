//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! Every draw in a run comes from one `SimRng`, seeded from the run's
//! master seed, in a fixed order within each tick:
//!   1. cross-team escalation check (admission)
//!   2. onboarding check (admission)
//!   3. one carryover check per cross-team token consumed (processing)
//!
//! Same seed, same config: same draws, same run.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Anything the policies can draw uniform decisions from.
///
/// Tests substitute scripted sources; production runs use `SimRng`.
pub trait RandomSource {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// The run's single sequential random stream.
pub struct SimRng {
    seed:  u64,
    inner: Pcg64Mcg,
    draws: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
            draws: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws taken so far. Useful when diffing two runs.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}
