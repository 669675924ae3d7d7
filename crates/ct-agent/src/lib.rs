//! `ct-agent`: Structure-of-Arrays agent pool for the contagion engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `HealthState` (Susceptible / Infected)                    |
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`]     | `AgentStoreBuilder` (seeded population generation)        |

pub mod builder;
pub mod state;
pub mod store;


pub use builder::{AgentStoreBuilder, SPEED_RANGE};
pub use state::HealthState;
pub use store::{AgentRngs, AgentStore};
