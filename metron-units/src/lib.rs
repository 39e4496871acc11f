//! Metron Units - Physical Quantities and Unit Conversion
//!
//! Unit-aware quantities with dimensional analysis over 11 base dimensions:
//! length, mass, temperature, current, luminosity, amount, angle, solid
//! angle, currency, information and time.
//!
//! Units come from a `UnitRegistry` seeded with SI, imperial and customary
//! units. Compound symbols such as "kg.m/s2", "lbf.in-2" or "km/h" are parsed
//! on first use and cached, and metric prefixes apply to any SI unit.
//!
//! ```
//! use metron_units::UnitRegistry;
//!
//! let registry = UnitRegistry::new();
//! let speed = registry.parse_quantity("454.8 kph").unwrap();
//! let knots = speed.convert_to(&registry, "kn").unwrap();
//! assert_eq!(knots.to_string(), "245.5724 kn");
//! ```
//!
//! Categories:
//! - Length (m, ft, in, yd, mi, M)
//! - Mass (kg, g, t, lb, oz, st, short ton)
//! - Time (s, min, h, d)
//! - Temperature (K, degC, degF)
//! - Area (sq in, sq ft, ha, acre)
//! - Volume (L, cu ft, us gal, imp gal)
//! - Velocity (kph, mph, kn)
//! - Force, energy, power, pressure (N, lbf, J, kWh, W, hp, Pa, bar, psi)
//! - Electrical (A, C, V, F, Ω)
//! - Information (bit, byte, KiB, MiB ...)
//! - Angle (rad, deg, cycles, sr)
//! - Currency (¤, $, USD)

mod dimension;
mod unit;
mod units;
mod registry;
mod parse;
mod input;
mod quantity;
mod policy;
pub mod arith;
pub mod temperature;

pub use dimension::{Dimension, BASE_COUNT, BASE_SYMBOLS};
pub use unit::{Unit, UnitRef};
pub use quantity::Quantity;
pub use registry::UnitRegistry;
pub use policy::{ensure_compatible, Policy, PANIC_ENV_VAR};
pub use arith::{
    abs, add, compare, diff, divide, divide_by_scalar, equal, less, more, multiply,
    multiply_by_scalar, negate, power, reciprocal, sort, subtract, sum, try_add, try_compare,
    try_diff, try_equal, try_power, try_subtract, try_sum,
};

pub use metron_core::{Template, UnitError};
