//! Structured unit errors
//!
//! Parsing and definition failures are always returned as values. Only the
//! incompatible-units case has a caller-selectable severity, see the
//! compatibility policy in `metron-units`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_SYMBOL: &str = "UNKNOWN_SYMBOL";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const DUPLICATE_SYMBOL: &str = "DUPLICATE_SYMBOL";
    pub const INCOMPATIBLE: &str = "INCOMPATIBLE";
    pub const UNDEFINED_UNIT: &str = "UNDEFINED_UNIT";
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const EXPONENT_OVERFLOW: &str = "EXPONENT_OVERFLOW";
    pub const INVALID_TEMPLATE: &str = "INVALID_TEMPLATE";
}

/// Error type for unit parsing, definition and conversion
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnitError {
    #[error("unknown symbol [{0}]")]
    UnknownSymbol(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("duplicate symbol [{0}]")]
    DuplicateSymbol(String),

    #[error("units not compatible: {left} <> {right}")]
    Incompatible { left: String, right: String },

    #[error("quantity has an undefined unit")]
    UndefinedUnit,

    #[error("invalid number [{0}]")]
    InvalidNumber(String),

    #[error("exponent out of range: {0}")]
    ExponentOverflow(String),

    #[error("invalid template [{0}]")]
    InvalidTemplate(String),
}

impl UnitError {
    pub fn incompatible(left: impl Into<String>, right: impl Into<String>) -> Self {
        UnitError::Incompatible {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::UnknownSymbol(_) => codes::UNKNOWN_SYMBOL,
            UnitError::InvalidFormat(_) => codes::INVALID_FORMAT,
            UnitError::DuplicateSymbol(_) => codes::DUPLICATE_SYMBOL,
            UnitError::Incompatible { .. } => codes::INCOMPATIBLE,
            UnitError::UndefinedUnit => codes::UNDEFINED_UNIT,
            UnitError::InvalidNumber(_) => codes::INVALID_NUMBER,
            UnitError::ExponentOverflow(_) => codes::EXPONENT_OVERFLOW,
            UnitError::InvalidTemplate(_) => codes::INVALID_TEMPLATE,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            UnitError::UnknownSymbol(_) => {
                Some("Check spelling or register the unit with define()")
            }
            UnitError::InvalidFormat(_) => {
                Some("Use factors joined by '.', at most one '/', e.g. \"kg.m/s2\"")
            }
            UnitError::DuplicateSymbol(_) => Some("Pick a symbol that is not registered yet"),
            UnitError::Incompatible { .. } => Some("Operands must have the same dimensions"),
            UnitError::UndefinedUnit => Some("Check is_valid() before using the quantity"),
            UnitError::InvalidNumber(_) => Some("Use digits, one '.' and ',' as group separator"),
            UnitError::ExponentOverflow(_) => Some("Unit exponents must fit in -128..=127"),
            UnitError::InvalidTemplate(_) => Some("Use verbs %f, %e, %g, %s with optional %[n] and .N"),
        }
    }
}
