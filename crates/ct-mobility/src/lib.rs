//! `ct-mobility`: agent movement toward randomly chosen destinations.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`engine`]  | `MovementModel`, `StepOutcome`, movement constants    |
//!
//! # Movement model (exponential approach)
//!
//! Each agent carries a `destination`, a `speed`, and a `progress ∈ [0, 1)`.
//! Every tick, for elapsed time `dt` milliseconds:
//!
//! 1. `progress += speed * dt / 30`.
//! 2. If `progress ≥ 1` the agent has **arrived**: it gets a fresh
//!    destination sampled uniformly from the region and `progress` resets
//!    to 0.  The position is left where it is; it is not snapped to the old
//!    destination.
//! 3. Otherwise the agent moves a fraction `min(speed * dt / 30, 0.01)` of
//!    the *remaining* distance toward its destination.
//!
//! Step 3 is exponential decay toward the target, not constant velocity:
//! agents slow down smoothly as they close in and never overshoot.  The
//! 0.01 cap bounds the jump after a long frame or a pause.  Because every
//! position is a convex combination of two in-region points, agents can
//! never leave the region.

pub mod engine;


pub use engine::{MOVEMENT_TIME_SCALE_MS, MovementModel, STEP_CAP, StepOutcome};
