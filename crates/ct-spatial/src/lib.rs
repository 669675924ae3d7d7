//! `ct-spatial`: finding which clean agents are close enough to catch the
//! contagion this tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`detector`] | `ProximityDetector` trait, `Transmission`, `BruteForceDetector` |
//! | [`index`]    | `RTreeDetector` (rstar-backed)                             |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Brute-force scan runs on Rayon's thread pool.             |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Transmission`.      |
//!
//! # Scaling
//!
//! [`BruteForceDetector`] is O(infected × susceptible) per tick, which is
//! fine for populations in the hundreds.  For an order of magnitude more,
//! switch to [`RTreeDetector`]; both honour the same contract and return
//! identical results.

pub mod detector;
pub mod index;


pub use detector::{BruteForceDetector, ProximityDetector, Transmission};
pub use index::RTreeDetector;
