//! The agent pool.
//!
//! Random streams live in [`AgentRngs`], apart from the data in
//! [`AgentStore`]: the movement step resamples destinations from one while
//! writing positions into the other, and separate structs let it hold both
//! `&mut` borrows at once.

use ct_core::color::{FRESH_INFECTION, SUSCEPTIBLE};
use ct_core::{AgentId, AgentRng, Point, Rgb, Timestamp};

use crate::HealthState;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to allow
/// simultaneous `&mut AgentRngs` + `&mut AgentStore` borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `run_seed`.
    pub(crate) fn new(count: usize, run_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(run_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Column-per-field (SoA) storage of every agent in the run.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.
///
/// Motion fields are `pub` for direct indexed access from the movement step.
/// Contagion fields are private: [`infect`](Self::infect) is the only way to
/// change them, which keeps `infected_at` set exactly when the state is
/// `Infected` and makes the transition one-way.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.  Never zero.
    pub count: usize,

    // ── Motion ────────────────────────────────────────────────────────────
    /// Current position, always inside the run's `RegionBounds`.
    pub position: Vec<Point>,

    /// Point the agent is currently heading toward.
    pub destination: Vec<Point>,

    /// Journey progress in `[0.0, 1.0)`.  Reaching 1 triggers a new
    /// destination.
    pub progress: Vec<f64>,

    /// Progress gained per 30 ms of elapsed time.  Always positive.
    pub speed: Vec<f64>,

    // ── Display ───────────────────────────────────────────────────────────
    /// Display colour, recomputed from contagion state every tick.
    pub color: Vec<Rgb>,

    // ── Contagion ─────────────────────────────────────────────────────────
    state: Vec<HealthState>,
    infected_at: Vec<Option<Timestamp>>,
    infected_count: usize,
}

impl AgentStore {
    /// `true` if there are no agents.  A store produced by
    /// [`AgentStoreBuilder`](crate::AgentStoreBuilder) is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All ids, ascending.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Contagion access ──────────────────────────────────────────────────

    #[inline]
    pub fn state(&self, agent: AgentId) -> HealthState {
        self.state[agent.index()]
    }

    /// Contagion state of every agent, indexed by `AgentId`.
    #[inline]
    pub fn states(&self) -> &[HealthState] {
        &self.state
    }

    /// When `agent` was infected; `None` while it is still susceptible.
    #[inline]
    pub fn infected_at(&self, agent: AgentId) -> Option<Timestamp> {
        self.infected_at[agent.index()]
    }

    /// Number of agents currently infected.  Maintained incrementally.
    #[inline]
    pub fn infected_count(&self) -> usize {
        self.infected_count
    }

    /// Ids of all infected agents, ascending.
    pub fn infected_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|&a| self.state(a).is_infected())
    }

    /// Ids of all susceptible agents, ascending.
    pub fn susceptible_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|&a| self.state(a).is_susceptible())
    }

    /// Transition `agent` from `Susceptible` to `Infected` at `now`.
    ///
    /// Sets `infected_at` and the fresh-infection colour.  Returns `false`
    /// and changes nothing if the agent was already infected.
    pub fn infect(&mut self, agent: AgentId, now: Timestamp) -> bool {
        let i = agent.index();
        if self.state[i].is_infected() {
            return false;
        }
        self.state[i] = HealthState::Infected;
        self.infected_at[i] = Some(now);
        self.color[i] = FRESH_INFECTION;
        self.infected_count += 1;
        true
    }

    // ── Construction (via AgentStoreBuilder) ─────────────────────────────

    pub(crate) fn new(
        position:    Vec<Point>,
        destination: Vec<Point>,
        speed:       Vec<f64>,
    ) -> Self {
        let count = position.len();
        debug_assert_eq!(destination.len(), count);
        debug_assert_eq!(speed.len(), count);
        Self {
            count,
            position,
            destination,
            progress:       vec![0.0; count],
            speed,
            color:          vec![SUSCEPTIBLE; count],
            state:          vec![HealthState::Susceptible; count],
            infected_at:    vec![None; count],
            infected_count: 0,
        }
    }
}
