//! Immutable per-tick output handed to the rendering host.

use ct_agent::HealthState;
use ct_core::{AgentId, Point, Rgb, Timestamp};
use ct_infection::ConnectionEdge;

use crate::{HistoryPoint, SimulationStats};

/// Display-relevant state of one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub position: Point,
    pub state:    HealthState,
    pub color:    Rgb,
}

/// Everything a renderer needs for one frame.  Owned copies: mutating a
/// snapshot never affects the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// The tick time this snapshot reflects.
    pub at:          Timestamp,
    /// Agents in ascending id order.
    pub agents:      Vec<AgentView>,
    /// Live transmission edges, oldest first.
    pub connections: Vec<ConnectionEdge>,
    pub stats:       SimulationStats,
    /// The most recent history point.  The host accumulates the series.
    pub latest:      HistoryPoint,
}

impl Snapshot {
    /// Agents currently infected, counted from the views.
    pub fn infected_now(&self) -> usize {
        self.agents.iter().filter(|a| a.state.is_infected()).count()
    }
}
