//! Metron Core - Fundamental types
//!
//! This crate provides the types shared by the Metron crates:
//! - `UnitError`: Structured errors for parsing, definition and conversion
//! - `Template`: Print templates for value/symbol pairs

mod error;
pub mod format;

pub use error::{UnitError, codes};
pub use format::{Template, DEFAULT_FORMAT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Template, UnitError};
    pub use crate::error::codes;
}
