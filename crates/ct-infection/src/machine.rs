//! Susceptible → Infected transitions and the infection colour phase.

use ct_agent::AgentStore;
use ct_core::color::{FRESH_INFECTION, TERMINAL_INFECTION};
use ct_core::{AgentId, Rgb, Timestamp};
use ct_spatial::Transmission;

/// Length of the fresh → terminal colour fade, in milliseconds.
pub const COLOR_PHASE_MS: u64 = 10_000;

/// Display colour for an infection that is `elapsed_ms` old.
///
/// Fades linearly from bright red to deep magenta over [`COLOR_PHASE_MS`],
/// then stays at the terminal hue.
pub fn phase_color(elapsed_ms: u64) -> Rgb {
    if elapsed_ms > COLOR_PHASE_MS {
        return TERMINAL_INFECTION;
    }
    let ratio = elapsed_ms as f64 / COLOR_PHASE_MS as f64;
    FRESH_INFECTION.lerp(TERMINAL_INFECTION, ratio)
}

/// Applies detected transmissions and derives infection colours.
///
/// `Infected` is terminal.  Besides the single seed at reset, the only way
/// in is [`apply`](Self::apply).
pub struct InfectionStateMachine;

impl InfectionStateMachine {
    /// Infect every target in `transmissions` at `now`, all at once.
    ///
    /// `transmissions` must have been computed against the pool before any
    /// of them was applied.  Returns the transmissions that actually changed
    /// state, in input order; a target that is already infected, or repeated
    /// in the input, is skipped.
    pub fn apply(
        store:         &mut AgentStore,
        transmissions: &[Transmission],
        now:           Timestamp,
    ) -> Vec<Transmission> {
        transmissions
            .iter()
            .copied()
            .filter(|t| store.infect(t.target, now))
            .collect()
    }

    /// Recompute the phase colour of every infected agent.
    ///
    /// Runs every tick for all infected agents, including ones infected this
    /// tick (whose colour is the fresh hue, since zero time has elapsed).
    pub fn recolor(store: &mut AgentStore, now: Timestamp) {
        for i in 0..store.count {
            if let Some(at) = store.infected_at(AgentId(i as u32)) {
                store.color[i] = phase_color(now.since(at));
            }
        }
    }
}
