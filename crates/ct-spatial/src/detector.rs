//! Proximity detector trait and the default brute-force implementation.
//!
//! # Contract
//!
//! Given the post-movement agent pool and a radius `r`, return one
//! [`Transmission`] for every agent that is `Susceptible` and lies strictly
//! within `r` of at least one `Infected` agent.
//!
//! - Detection reads the pool through `&AgentStore` and never mutates it, so
//!   it always sees the infected set as it was at the start of the pass.
//!   Agents infected by this pass cannot be sources until the next one.
//! - Output is sorted by ascending `target`, with at most one entry per
//!   target.
//! - When several infected agents are in range of the same target, the
//!   recorded `source` is the one with the lowest id.

use ct_agent::AgentStore;
use ct_core::{AgentId, Point};

// ── Transmission ──────────────────────────────────────────────────────────────

/// One `Susceptible → Infected` transition discovered by a detector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transmission {
    pub source: AgentId,
    pub target: AgentId,
}

// ── ProximityDetector trait ───────────────────────────────────────────────────

/// Pluggable proximity search.
///
/// Implementations must be `Send + Sync` so a simulation can be moved to
/// another thread between ticks.
pub trait ProximityDetector: Send + Sync {
    /// Find all transmissions for this tick.  `radius` is positive and
    /// finite; callers validate it.
    fn detect(&self, store: &AgentStore, radius: f64) -> Vec<Transmission>;
}

// ── BruteForceDetector ────────────────────────────────────────────────────────

/// Checks every susceptible agent against every infected agent.
#[derive(Copy, Clone, Debug, Default)]
pub struct BruteForceDetector;

impl ProximityDetector for BruteForceDetector {
    fn detect(&self, store: &AgentStore, radius: f64) -> Vec<Transmission> {
        let r2 = radius * radius;
        let sources: Vec<(AgentId, Point)> = store
            .infected_ids()
            .map(|a| (a, store.position[a.index()]))
            .collect();
        if sources.is_empty() {
            return Vec::new();
        }
        let targets: Vec<AgentId> = store.susceptible_ids().collect();

        let nearest_source = |target: AgentId| -> Option<Transmission> {
            let p = store.position[target.index()];
            sources
                .iter()
                .find(|(_, sp)| sp.distance_squared(p) < r2)
                .map(|&(source, _)| Transmission { source, target })
        };

        #[cfg(not(feature = "parallel"))]
        {
            targets.into_iter().filter_map(nearest_source).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // `filter_map` makes this unindexed; collecting into a `Vec` still
            // keeps the original target order.
            targets.into_par_iter().filter_map(nearest_source).collect()
        }
    }
}
