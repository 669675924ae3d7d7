//! Core error type.
//!
//! Every variant is a configuration error: the engine is pure computation
//! over in-memory state, so once a run is configured, ticking cannot fail.
//! Sub-crates wrap `CtError` as one variant of their own enums.

use thiserror::Error;

use crate::Point;

#[derive(Debug, Error)]
pub enum CtError {
    #[error("population size must be positive, got {0}")]
    InvalidPopulation(usize),

    #[error("infection radius must be a positive finite number, got {0}")]
    InvalidRadius(f64),

    #[error("region bounds x=[{x_min}, {x_max}] y=[{y_min}, {y_max}] have no area")]
    DegenerateBounds {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("point {point} lies outside the region bounds")]
    OutOfBounds { point: Point },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ct-*` crates.
pub type CtResult<T> = Result<T, CtError>;
