//! `ct-infection`: applying transmissions and remembering them briefly.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`machine`] | `InfectionStateMachine`, `phase_color`, `COLOR_PHASE_MS`      |
//! | [`ledger`]  | `ConnectionEdge`, `ConnectionLedger`, `EDGE_TTL_MS`           |
//!
//! # Per-tick order
//!
//! ```text
//! transmissions = detector.detect(&store, radius)         // frozen view
//! applied       = InfectionStateMachine::apply(&mut store, &transmissions, now)
//! ledger.record_transmissions(&store, &applied, now)     // one edge each
//! InfectionStateMachine::recolor(&mut store, now)        // every infected agent
//! ledger.evict(now)
//! ```

pub mod ledger;
pub mod machine;


pub use ledger::{ConnectionEdge, ConnectionLedger, EDGE_TTL_MS};
pub use machine::{COLOR_PHASE_MS, InfectionStateMachine, phase_color};
