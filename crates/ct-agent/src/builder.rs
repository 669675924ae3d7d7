//! Seeded population generation.
//!
//! # Usage
//!
//! ```rust
//! use ct_agent::AgentStoreBuilder;
//! use ct_core::{AgentId, RegionBounds, Timestamp};
//!
//! let (store, rngs) = AgentStoreBuilder::new(200, /*seed=*/ 42)
//!     .bounds(RegionBounds::unit_square())
//!     .build(Timestamp(0))
//!     .unwrap();
//!
//! assert_eq!(store.count, 200);
//! assert_eq!(rngs.len(), 200);
//! assert_eq!(store.infected_count(), 1);
//! assert!(store.state(AgentId::PATIENT_ZERO).is_infected());
//! ```

use std::ops::Range;

use ct_core::{AgentId, CtError, CtResult, Point, RegionBounds, Timestamp};

use crate::{AgentRngs, AgentStore};

/// Range agent speeds are drawn from, uniformly.
pub const SPEED_RANGE: Range<f64> = 0.002..0.008;

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Every agent draws its starting position, first destination, and speed
/// from its own [`AgentRng`](ct_core::AgentRng), so agent `i` is laid out
/// identically for a given seed no matter how large the population is.
pub struct AgentStoreBuilder {
    count: usize,
    seed: u64,
    bounds: RegionBounds,
    patient_zero_position: Option<Point>,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the run seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            bounds: RegionBounds::unit_square(),
            patient_zero_position: None,
        }
    }

    /// Region all positions and destinations are sampled from.
    /// Default: the unit square.
    pub fn bounds(mut self, bounds: RegionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Pin patient zero's starting position instead of sampling it.
    pub fn patient_zero_position(mut self, position: Option<Point>) -> Self {
        self.patient_zero_position = position;
        self
    }

    /// Generate the population and seed patient zero as infected at `now`.
    ///
    /// Fails on an empty population (which would otherwise divide by zero
    /// in the rate computation), on populations that do not fit an
    /// `AgentId`, and on a pinned patient-zero position outside the bounds.
    pub fn build(self, now: Timestamp) -> CtResult<(AgentStore, AgentRngs)> {
        if self.count == 0 {
            return Err(CtError::InvalidPopulation(self.count));
        }
        AgentId::try_from(self.count - 1)
            .map_err(|_| CtError::Config(format!("population {} exceeds AgentId range", self.count)))?;
        if let Some(point) = self.patient_zero_position {
            if !self.bounds.contains(point) {
                return Err(CtError::OutOfBounds { point });
            }
        }

        let mut rngs = AgentRngs::new(self.count, self.seed);
        let mut position    = Vec::with_capacity(self.count);
        let mut destination = Vec::with_capacity(self.count);
        let mut speed       = Vec::with_capacity(self.count);

        for rng in rngs.inner.iter_mut() {
            position.push(self.bounds.sample(rng));
            destination.push(self.bounds.sample(rng));
            speed.push(rng.gen_range(SPEED_RANGE));
        }

        if let Some(point) = self.patient_zero_position {
            position[AgentId::PATIENT_ZERO.index()] = point;
        }

        let mut store = AgentStore::new(position, destination, speed);
        store.infect(AgentId::PATIENT_ZERO, now);

        Ok((store, rngs))
    }
}
