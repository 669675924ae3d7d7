//! Fluent builder for constructing a [`Sim`].

use ct_core::{ContagionConfig, Timestamp};
use ct_spatial::{BruteForceDetector, ProximityDetector};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<D>`].
///
/// # Required inputs
///
/// - [`ContagionConfig`]: population, region, radius, seed.
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                 |
/// |------------------|-------------------------|
/// | `.detector(d)`   | [`BruteForceDetector`]  |
/// | `.autostart(b)`  | `false` (starts paused) |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .detector(RTreeDetector)
///     .autostart(true)
///     .build(Timestamp(now_ms))?;
/// ```
pub struct SimBuilder<D: ProximityDetector> {
    config:    ContagionConfig,
    detector:  D,
    autostart: bool,
}

impl SimBuilder<BruteForceDetector> {
    /// Create a builder using the brute-force detector.
    pub fn new(config: ContagionConfig) -> Self {
        Self {
            config,
            detector:  BruteForceDetector,
            autostart: false,
        }
    }
}

impl<D: ProximityDetector> SimBuilder<D> {
    /// Swap in a different proximity detector.
    pub fn detector<E: ProximityDetector>(self, detector: E) -> SimBuilder<E> {
        SimBuilder {
            config:    self.config,
            detector,
            autostart: self.autostart,
        }
    }

    /// Whether the simulation is running (rather than paused) once built.
    pub fn autostart(mut self, running: bool) -> Self {
        self.autostart = running;
        self
    }

    /// Validate the configuration, generate the first run at `now`, and
    /// return a ready-to-tick [`Sim`].
    pub fn build(self, now: Timestamp) -> SimResult<Sim<D>> {
        self.config.validate()?;
        Sim::new(self.config, self.detector, self.autostart, now)
    }
}
