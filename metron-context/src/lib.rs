//! Metron Context - Presentation and bookkeeping for quantities
//!
//! - `Context`: a usage domain with a preferred unit and print template
//! - `ContextRegistry`: contexts by name
//! - `Resource`: a balance kept between a minimum and a maximum

mod error;
mod context;
mod registry;
mod resource;

pub use error::{Bound, ContextError};
pub use context::Context;
pub use registry::ContextRegistry;
pub use resource::Resource;

/// Re-export the quantity types contexts work with
pub mod prelude {
    pub use crate::{Context, ContextError, ContextRegistry, Resource};
    pub use metron_units::{Quantity, UnitRegistry};
}
