//! What happens when arithmetic meets incompatible units
//!
//! Under `Strict` the operation panics. Under `Lenient` it goes ahead and
//! produces a well-typed but physically meaningless result, logging a warning.
//! Lenient mode exists for compatibility; do not rely on its results.
//!
//! The process-wide policy is read once from `METRON_PANIC_ON_INCOMPATIBLE`
//! ("1" selects `Strict`). Callers that need a specific behavior regardless of
//! the environment use the `Policy` methods directly or the `try_*` functions,
//! which report `UnitError::Incompatible` instead.

use std::sync::LazyLock;

use metron_core::UnitError;
use tracing::warn;

use crate::Quantity;

/// Environment variable selecting the process-wide policy
pub const PANIC_ENV_VAR: &str = "METRON_PANIC_ON_INCOMPATIBLE";

static GLOBAL: LazyLock<Policy> = LazyLock::new(Policy::from_env);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Panic on incompatible operands
    Strict,
    /// Carry on with a meaningless result
    #[default]
    Lenient,
}

impl Policy {
    /// Policy selected by `METRON_PANIC_ON_INCOMPATIBLE`
    pub fn from_env() -> Self {
        match std::env::var(PANIC_ENV_VAR) {
            Ok(v) if v == "1" => Policy::Strict,
            _ => Policy::Lenient,
        }
    }

    /// The process-wide policy, fixed at first use
    pub fn global() -> Self {
        *GLOBAL
    }

    /// Apply the policy to a pair of operands
    pub fn check(self, a: &Quantity, b: &Quantity) {
        if let Err(err) = ensure_compatible(a, b) {
            match self {
                Policy::Strict => panic!("{}", err),
                Policy::Lenient => warn!(error = %err, "combining incompatible quantities"),
            }
        }
    }
}

/// `Err(Incompatible)` unless both quantities have the same dimensions
pub fn ensure_compatible(a: &Quantity, b: &Quantity) -> Result<(), UnitError> {
    if a.is_compatible(b) {
        Ok(())
    } else {
        Err(UnitError::incompatible(a.to_string(), b.to_string()))
    }
}
