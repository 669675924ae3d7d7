//! R-tree backed proximity detector.
//!
//! Each pass bulk-loads the infected agents' positions into an `rstar`
//! R-tree and runs one radius query per susceptible agent, giving
//! O((I + S) log I) per tick instead of O(I × S).

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ct_agent::AgentStore;
use ct_core::AgentId;

use crate::{ProximityDetector, Transmission};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// An infected agent's `[x, y]` position and id.
#[derive(Clone)]
struct SourceEntry {
    point: [f64; 2],
    id: AgentId,
}

impl RTreeObject for SourceEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SourceEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RTreeDetector ─────────────────────────────────────────────────────────────

/// Spatial-index detector with the same contract and output as
/// [`BruteForceDetector`](crate::BruteForceDetector).
#[derive(Copy, Clone, Debug, Default)]
pub struct RTreeDetector;

impl ProximityDetector for RTreeDetector {
    fn detect(&self, store: &AgentStore, radius: f64) -> Vec<Transmission> {
        let r2 = radius * radius;
        let entries: Vec<SourceEntry> = store
            .infected_ids()
            .map(|id| SourceEntry { point: store.position[id.index()].to_array(), id })
            .collect();
        if entries.is_empty() {
            return Vec::new();
        }
        let tree = RTree::bulk_load(entries);

        store
            .susceptible_ids()
            .filter_map(|target| {
                let p = store.position[target.index()].to_array();
                // `locate_within_distance` is inclusive; the contract is strict.
                tree.locate_within_distance(p, r2)
                    .filter(|e| e.distance_2(&p) < r2)
                    .map(|e| e.id)
                    .min()
                    .map(|source| Transmission { source, target })
            })
            .collect()
    }
}
