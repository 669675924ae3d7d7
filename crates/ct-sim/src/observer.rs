//! Observer hooks for hosts that want callbacks instead of (or as well as)
//! the returned snapshot.

use std::collections::VecDeque;

use ct_core::Timestamp;
use ct_spatial::Transmission;

use crate::{HistoryPoint, Snapshot};

/// Callbacks invoked by [`Sim::tick_with`][crate::Sim::tick_with] at key
/// points in the tick pipeline.  Never called while paused.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called before movement, with the effective tick time.
    fn on_tick_start(&mut self, _now: Timestamp) {}

    /// Called after infections are applied, with the transitions that
    /// actually happened this tick (in target order).
    fn on_transmissions(&mut self, _now: Timestamp, _applied: &[Transmission]) {}

    /// Called with the finished snapshot at the end of the tick.
    fn on_tick_end(&mut self, _snapshot: &Snapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Host-side accumulator for the infected-count time series.
///
/// The simulation keeps its own full history for the current run; this
/// recorder is for hosts that want a bounded window instead.  With a
/// capacity set, the oldest points are dropped once it is full.
#[derive(Clone, Debug, Default)]
pub struct HistoryRecorder {
    points:   VecDeque<HistoryPoint>,
    capacity: Option<usize>,
}

impl HistoryRecorder {
    /// Unbounded recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that keeps at most `capacity` most recent points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points:   VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn push(&mut self, point: HistoryPoint) {
        if let Some(cap) = self.capacity {
            if cap == 0 {
                return;
            }
            while self.points.len() >= cap {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    /// Points in time order.
    pub fn points(&self) -> impl Iterator<Item = &HistoryPoint> + '_ {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Forget everything, e.g. after the host resets the simulation.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl SimObserver for HistoryRecorder {
    fn on_tick_end(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.latest);
    }
}
