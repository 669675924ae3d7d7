//! Per-tick movement step.

use ct_agent::{AgentRngs, AgentStore};
use ct_core::{AgentId, AgentRng, RegionBounds};

/// Milliseconds of elapsed time that advance progress by exactly `speed`.
pub const MOVEMENT_TIME_SCALE_MS: f64 = 30.0;

/// Largest fraction of the remaining distance covered in one tick.
pub const STEP_CAP: f64 = 0.01;

/// What happened to one agent during a movement step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved toward its current destination.
    Moved,
    /// Reached its destination and was given a new one.
    Arrived,
}

/// Advances agents toward their destinations.
///
/// Only touches `position`, `destination`, and `progress`; contagion state
/// is never read or written here.
#[derive(Copy, Clone, Debug)]
pub struct MovementModel {
    bounds: RegionBounds,
}

impl MovementModel {
    pub fn new(bounds: RegionBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> RegionBounds {
        self.bounds
    }

    /// Move every agent by `dt_ms` of elapsed time.
    ///
    /// Returns the agents that arrived (and were re-targeted) this step, in
    /// ascending id order.
    pub fn step_all(&self, store: &mut AgentStore, rngs: &mut AgentRngs, dt_ms: f64) -> Vec<AgentId> {
        let mut arrived = Vec::new();
        for (i, rng) in rngs.inner.iter_mut().enumerate() {
            let agent = AgentId(i as u32);
            if self.step(store, agent, rng, dt_ms) == StepOutcome::Arrived {
                arrived.push(agent);
            }
        }
        arrived
    }

    /// Move one agent by `dt_ms` of elapsed time.
    pub fn step(&self, store: &mut AgentStore, agent: AgentId, rng: &mut AgentRng, dt_ms: f64) -> StepOutcome {
        let i = agent.index();
        let advance = store.speed[i] * (dt_ms.max(0.0) / MOVEMENT_TIME_SCALE_MS);

        let progress = store.progress[i] + advance;
        if progress >= 1.0 {
            store.destination[i] = self.bounds.sample(rng);
            store.progress[i] = 0.0;
            return StepOutcome::Arrived;
        }

        store.progress[i] = progress;
        let fraction = advance.min(STEP_CAP);
        let next = store.position[i].approach(store.destination[i], fraction);
        store.position[i] = self.bounds.clamp(next);
        StepOutcome::Moved
    }
}
