//! Short-lived record of who infected whom, for visualisation only.
//!
//! Edges never influence the simulation.  Each lives for [`EDGE_TTL_MS`]
//! and is then evicted, so the ledger's size depends only on the recent
//! infection rate, never on how long the run has been going.

use std::collections::VecDeque;

use ct_agent::AgentStore;
use ct_core::{AgentId, Point, Timestamp};
use ct_spatial::Transmission;

/// How long an edge stays in the ledger, in milliseconds.
pub const EDGE_TTL_MS: u64 = 2_000;

// ── ConnectionEdge ────────────────────────────────────────────────────────────

/// A transmission event with both endpoints frozen at the moment of
/// infection.  The endpoints do not follow the agents afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionEdge {
    /// `"{source}-{target}"`.  Unique within a run, since an agent is
    /// infected at most once.
    pub id:         String,
    pub source:     AgentId,
    pub target:     AgentId,
    pub source_pos: Point,
    pub target_pos: Point,
    pub created_at: Timestamp,
}

impl ConnectionEdge {
    /// Snapshot both agents' current positions.
    pub fn from_transmission(store: &AgentStore, t: Transmission, now: Timestamp) -> Self {
        Self {
            id:         format!("{}-{}", t.source, t.target),
            source:     t.source,
            target:     t.target,
            source_pos: store.position[t.source.index()],
            target_pos: store.position[t.target.index()],
            created_at: now,
        }
    }

    /// Milliseconds since the edge was recorded.
    #[inline]
    pub fn age(&self, now: Timestamp) -> u64 {
        now.since(self.created_at)
    }

    #[inline]
    pub fn is_expired(&self, now: Timestamp, ttl_ms: u64) -> bool {
        self.age(now) >= ttl_ms
    }
}

// ── ConnectionLedger ──────────────────────────────────────────────────────────

/// Time-bounded buffer of [`ConnectionEdge`]s, oldest first.
#[derive(Clone, Debug)]
pub struct ConnectionLedger {
    edges:  VecDeque<ConnectionEdge>,
    ttl_ms: u64,
}

impl ConnectionLedger {
    pub fn new() -> Self {
        Self::with_ttl(EDGE_TTL_MS)
    }

    pub fn with_ttl(ttl_ms: u64) -> Self {
        Self { edges: VecDeque::new(), ttl_ms }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Add an edge, keeping the buffer ordered by `created_at`.
    ///
    /// Edges normally arrive in time order and go straight to the back.
    pub fn record(&mut self, edge: ConnectionEdge) {
        let at = self.edges.partition_point(|e| e.created_at <= edge.created_at);
        self.edges.insert(at, edge);
    }

    /// Record one edge per applied transmission, snapshotting positions now.
    pub fn record_transmissions(&mut self, store: &AgentStore, applied: &[Transmission], now: Timestamp) {
        for &t in applied {
            self.record(ConnectionEdge::from_transmission(store, t, now));
        }
    }

    /// Drop every edge with `now - created_at >= ttl`.  Returns how many
    /// were removed.
    pub fn evict(&mut self, now: Timestamp) -> usize {
        let before = self.edges.len();
        while self.edges.front().is_some_and(|e| e.is_expired(now, self.ttl_ms)) {
            self.edges.pop_front();
        }
        before - self.edges.len()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Live edges, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionEdge> + '_ {
        self.edges.iter()
    }
}

impl Default for ConnectionLedger {
    fn default() -> Self {
        Self::new()
    }
}
