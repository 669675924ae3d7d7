//! `ct-core`: foundational types for the contagion simulation engine.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no
//! `ct-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geo`]         | `Point`, `RegionBounds`                               |
//! | [`time`]        | `Timestamp` (host-supplied milliseconds)              |
//! | [`color`]       | `Rgb`, the display palette, `lerp`                    |
//! | [`config`]      | `ContagionConfig`                                     |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `CtError`, `CtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod color;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::Rgb;
pub use config::ContagionConfig;
pub use error::{CtError, CtResult};
pub use geo::{Point, RegionBounds};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::Timestamp;
