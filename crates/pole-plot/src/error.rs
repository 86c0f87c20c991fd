//! Error types for the plot core.

use thiserror::Error;

/// Errors raised by the plot core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// No usable GPU pipeline: shader parse/validation failure or a missing
    /// drawing context. Fatal to the curve renderer only.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// An operation needed a surface (or index) that is not there yet.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    #[error("invalid viewport [{x1_min}, {x1_max}] x [{x2_min}, {x2_max}]: {reason}")]
    InvalidViewport {
        x1_min: f64,
        x1_max: f64,
        x2_min: f64,
        x2_max: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, PlotError>;
