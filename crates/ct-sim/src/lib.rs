//! `ct-sim`: the simulation clock and per-tick orchestrator.
//!
//! # Tick pipeline
//!
//! The host owns the schedule and calls [`Sim::tick`] with the current time,
//! typically once per rendered frame.  Nothing runs between calls.
//!
//! ```text
//! tick(now):
//!   if paused                  → None, nothing changes
//!   dt = clamp(now - last_tick_at)
//!   ① Movement  : every agent steps toward its destination by dt.
//!   ② Detection : infected-at-tick-start × susceptible, strict radius.
//!   ③ Infection : apply all transitions at once; one edge each;
//!                 recolour every infected agent.
//!   ④ Ledger    : evict edges older than the TTL.
//!   ⑤ Statistics: running maxima; append a history point.
//!   → Some(Snapshot)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Brute-force detection runs on Rayon's thread pool.     |
//! | `serde`    | Snapshots and statistics derive `Serialize`.           |
//!
//! # Quick-start
//!
//! ```rust
//! use ct_core::{ContagionConfig, Timestamp};
//! use ct_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(ContagionConfig::default())
//!     .build(Timestamp(0))
//!     .unwrap();
//! sim.start(Timestamp(0));
//! let snapshot = sim.tick(Timestamp(16)).expect("running");
//! assert_eq!(snapshot.stats.total, 200);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{HistoryRecorder, NoopObserver, SimObserver};
pub use sim::{MAX_TICK_DT_MS, Sim};
pub use snapshot::{AgentView, Snapshot};
pub use stats::{HistoryPoint, SimulationStats, StatisticsAggregator};
