//! Run configuration.

use crate::{CtError, CtResult, Point, RegionBounds};

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the host application and passed to
/// `ct_sim::SimBuilder`.  Nothing is validated on construction; call
/// [`validate`](Self::validate) (the builder does) before use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContagionConfig {
    /// Number of agents generated at every reset.  Must be positive.
    pub population_size: usize,

    /// Rectangle all positions and destinations are sampled from.
    pub bounds: RegionBounds,

    /// Distance strictly below which an infected agent infects a clean one.
    pub infection_radius: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Where to place patient zero at reset.  `None` samples it uniformly
    /// like every other agent.
    pub patient_zero_position: Option<Point>,
}

impl ContagionConfig {
    /// Fail fast on any value that would make the run meaningless.
    pub fn validate(&self) -> CtResult<()> {
        if self.population_size == 0 {
            return Err(CtError::InvalidPopulation(self.population_size));
        }
        validate_radius(self.infection_radius)?;
        if let Some(point) = self.patient_zero_position {
            if !self.bounds.contains(point) {
                return Err(CtError::OutOfBounds { point });
            }
        }
        Ok(())
    }
}

impl Default for ContagionConfig {
    fn default() -> Self {
        Self {
            population_size:       200,
            bounds:                RegionBounds::unit_square(),
            infection_radius:      0.003,
            seed:                  42,
            patient_zero_position: None,
        }
    }
}

/// Reject zero, negative, and non-finite radii.  Never clamps.
pub fn validate_radius(radius: f64) -> CtResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(CtError::InvalidRadius(radius))
    }
}
