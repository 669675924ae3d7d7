//! Simulation time model.
//!
//! # Design
//!
//! The engine owns no clock.  The host passes a [`Timestamp`] into every
//! control call and every `tick`; the engine only ever computes differences
//! between timestamps it was given.  Millisecond resolution as a `u64`
//! matches what frame schedulers report and keeps all TTL and colour-phase
//! arithmetic exact.

use std::fmt;

/// A host-supplied instant, in milliseconds since an arbitrary epoch.
///
/// Only differences between timestamps are meaningful.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero if
    /// `earlier` is actually later.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Seconds elapsed from `earlier` to `self`, as used by history points.
    #[inline]
    pub fn secs_since(self, earlier: Timestamp) -> f64 {
        self.since(earlier) as f64 / 1_000.0
    }
}

/// Saturates at `u64::MAX` instead of overflowing.
impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
