//! Errors for contexts and resources

use std::fmt;

use metron_core::UnitError;
use thiserror::Error;

/// Which end of a resource's range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min => f.write_str("min"),
            Bound::Max => f.write_str("max"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("duplicate context: {0}")]
    DuplicateContext(String),

    #[error("unknown context: {0}")]
    UnknownContext(String),

    #[error("invalid limits: min {min} must be less than max {max}")]
    InvalidLimits { min: String, max: String },

    #[error("new {bound} limit {limit} would leave the balance {balance} out of bounds")]
    LimitCrossesBalance {
        bound: Bound,
        limit: String,
        balance: String,
    },

    #[error("{value} is outside {min} .. {max}")]
    OutOfBounds { value: String, min: String, max: String },

    #[error("percentage {0} not in range 0..100")]
    PercentageOutOfRange(f64),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextError {
    pub fn out_of_bounds(
        value: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        ContextError::OutOfBounds {
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}
