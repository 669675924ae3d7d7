//! Seeded randomness for runs and agents.
//!
//! Two levels, both `SmallRng` underneath:
//!
//! - [`SimRng`] is created once from the configured master seed and hands
//!   out one run seed per reset.  A sequence of resets is therefore as
//!   reproducible as a single run.
//! - [`AgentRng`] is one stream per agent, keyed by the run seed and the
//!   agent id:
//!
//!   ```text
//!   stream seed = run_seed ^ (id * 0x9e37_79b9_7f4a_7c15)
//!   ```
//!
//!   Multiplying by the odd golden-ratio constant scatters neighbouring ids
//!   across the seed space.  Because each agent owns its stream, one agent's
//!   destination draws never depend on how many others arrived first.
//!
//! `AgentRng` implements [`RngCore`], so it plugs straight into anything
//! generic over `rand::Rng` (e.g. [`RegionBounds::sample`](crate::RegionBounds::sample)).

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::AgentId;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// One agent's private random stream.
#[derive(Clone, Debug)]
pub struct AgentRng {
    rng: SmallRng,
}

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let stream = run_seed ^ u64::from(agent.0).wrapping_mul(GOLDEN_GAMMA);
        Self { rng: SmallRng::seed_from_u64(stream) }
    }

    /// Draw from the standard distribution of `T` (`[0, 1)` for floats).
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        Standard.sample(&mut self.rng)
    }

    /// Uniform draw from `range`.  Available without importing `rand::Rng`.
    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.rng.gen_range(range)
    }
}

impl RngCore for AgentRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Source of run seeds.  Owned by the simulation; advanced once per reset.
#[derive(Clone, Debug)]
pub struct SimRng {
    rng: SmallRng,
}

impl SimRng {
    pub fn new(master_seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(master_seed) }
    }

    #[inline]
    pub fn next_run_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
