//! Binary contagion state.

/// Contagion state of one agent.
///
/// The only transition is `Susceptible → Infected`; there is no recovery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    #[default]
    Susceptible,
    Infected,
}

impl HealthState {
    #[inline]
    pub fn is_infected(self) -> bool {
        self == HealthState::Infected
    }

    #[inline]
    pub fn is_susceptible(self) -> bool {
        self == HealthState::Susceptible
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Infected    => "infected",
        })
    }
}
