//! Agent identity.

use std::fmt;
use std::num::TryFromIntError;

/// Position of an agent in every SoA vector of the pool.
///
/// Ids are dense, start at zero, and are handed out afresh on every reset, so
/// an id only means something within one run.  The `u32` is public for
/// construction in tests and literals; index with [`index`](Self::index).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub u32);

impl AgentId {
    /// The agent seeded as infected at reset.
    pub const PATIENT_ZERO: AgentId = AgentId(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bare number, so edge ids read `"3-17"`.
impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.index()
    }
}

/// Fails for populations that do not fit in a `u32`.
impl TryFrom<usize> for AgentId {
    type Error = TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}
