//! Running statistics and the infected-count time series.
//!
//! # Monotonic maxima
//!
//! Reported figures are the maxima observed so far in the run, not the
//! instantaneous count.  Infection is irreversible, so the two are equal in
//! practice; the maximum just makes the headline number stable regardless of
//! read order.  If a recovery state is ever added this framing would hide
//! real decreases, so [`StatisticsAggregator::observe`] logs a warning
//! whenever the instantaneous count falls below the reported maximum.

use ct_core::{CtError, CtResult};
use tracing::warn;

/// Headline statistics for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationStats {
    /// Population size.  Never zero.
    pub total:    usize,
    /// Largest infected count seen this run.
    pub infected: usize,
    /// Largest `infected / total * 100` seen this run.
    pub rate:     f64,
}

/// One point of the infected-count time series.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryPoint {
    /// Seconds since the run was reset.
    pub elapsed_seconds: f64,
    /// The reported (maximum) infected count at that moment.
    pub infected_count:  usize,
}

/// Maintains the run's monotonic infected count and rate.
#[derive(Clone, Debug)]
pub struct StatisticsAggregator {
    total:         usize,
    max_infected:  usize,
    max_rate:      f64,
    last_observed: usize,
}

impl StatisticsAggregator {
    /// Seed with the single patient zero: `(1, 100 / total)`.
    ///
    /// A zero total is rejected here so the rate can never divide by zero.
    pub fn new(total: usize) -> CtResult<Self> {
        if total == 0 {
            return Err(CtError::InvalidPopulation(total));
        }
        Ok(Self {
            total,
            max_infected:  1,
            max_rate:      rate(1, total),
            last_observed: 1,
        })
    }

    /// Fold in this tick's instantaneous infected count and return the
    /// updated headline statistics.
    pub fn observe(&mut self, current_infected: usize) -> SimulationStats {
        if current_infected < self.max_infected {
            warn!(
                current = current_infected,
                reported = self.max_infected,
                "infected count decreased; reported maximum hides the drop"
            );
        }
        self.last_observed = current_infected;
        self.max_infected = self.max_infected.max(current_infected);
        self.max_rate = self.max_rate.max(rate(current_infected, self.total));
        self.stats()
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            total:    self.total,
            infected: self.max_infected,
            rate:     self.max_rate,
        }
    }

    /// The instantaneous count passed to the most recent `observe`.
    pub fn last_observed(&self) -> usize {
        self.last_observed
    }
}

/// Percentage of `total` that `infected` represents.  Multiplies first so
/// whole-percent cases like 1/200 come out exact.
#[inline]
fn rate(infected: usize, total: usize) -> f64 {
    infected as f64 * 100.0 / total as f64
}
