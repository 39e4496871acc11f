//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an 11-element vector of
//! exponents over the base dimensions, in this fixed order:
//! [length, mass, temperature, current, luminosity, amount, angle,
//!  solid angle, currency, information, time]

use std::fmt;
use serde::{Serialize, Deserialize};

/// Number of base dimensions
pub const BASE_COUNT: usize = 11;

/// Dimension indices for the base quantities
pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TEMPERATURE: usize = 2;
pub const CURRENT: usize = 3;
pub const LUMINOSITY: usize = 4;
pub const AMOUNT: usize = 5;
pub const ANGLE: usize = 6;
pub const SOLID_ANGLE: usize = 7;
pub const CURRENCY: usize = 8;
pub const INFORMATION: usize = 9;
pub const TIME: usize = 10;

/// SI symbol of each base dimension, used for canonical unit symbols
pub const BASE_SYMBOLS: [&str; BASE_COUNT] =
    ["m", "kg", "K", "A", "cd", "mol", "rad", "sr", "¤", "byte", "s"];

/// Represents the dimensions of a physical quantity
/// as exponents of the 11 base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i8; BASE_COUNT],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0; BASE_COUNT] };

    pub const LENGTH: Dimension = Dimension::of(&[(LENGTH, 1)]);
    pub const MASS: Dimension = Dimension::of(&[(MASS, 1)]);
    pub const TEMPERATURE: Dimension = Dimension::of(&[(TEMPERATURE, 1)]);
    pub const CURRENT: Dimension = Dimension::of(&[(CURRENT, 1)]);
    pub const LUMINOSITY: Dimension = Dimension::of(&[(LUMINOSITY, 1)]);
    pub const AMOUNT: Dimension = Dimension::of(&[(AMOUNT, 1)]);
    pub const ANGLE: Dimension = Dimension::of(&[(ANGLE, 1)]);
    pub const SOLID_ANGLE: Dimension = Dimension::of(&[(SOLID_ANGLE, 1)]);
    pub const CURRENCY: Dimension = Dimension::of(&[(CURRENCY, 1)]);
    pub const INFORMATION: Dimension = Dimension::of(&[(INFORMATION, 1)]);
    pub const TIME: Dimension = Dimension::of(&[(TIME, 1)]);

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = Dimension::of(&[(LENGTH, 1), (TIME, -1)]);

    /// Acceleration [L T^-2]
    pub const ACCELERATION: Dimension = Dimension::of(&[(LENGTH, 1), (TIME, -2)]);

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension::of(&[(MASS, 1), (LENGTH, 1), (TIME, -2)]);

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension::of(&[(MASS, 1), (LENGTH, 2), (TIME, -2)]);

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension::of(&[(MASS, 1), (LENGTH, 2), (TIME, -3)]);

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension::of(&[(MASS, 1), (LENGTH, -1), (TIME, -2)]);

    pub const AREA: Dimension = Dimension::of(&[(LENGTH, 2)]);
    pub const VOLUME: Dimension = Dimension::of(&[(LENGTH, 3)]);
    pub const FREQUENCY: Dimension = Dimension::of(&[(TIME, -1)]);
    pub const ANGULAR_VELOCITY: Dimension = Dimension::of(&[(ANGLE, 1), (TIME, -1)]);

    /// Electric charge [I T]
    pub const CHARGE: Dimension = Dimension::of(&[(CURRENT, 1), (TIME, 1)]);

    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: Dimension =
        Dimension::of(&[(MASS, 1), (LENGTH, 2), (TIME, -3), (CURRENT, -1)]);

    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: Dimension =
        Dimension::of(&[(MASS, 1), (LENGTH, 2), (TIME, -3), (CURRENT, -2)]);

    /// Capacitance [I^2 T^4 M^-1 L^-2]
    pub const CAPACITANCE: Dimension =
        Dimension::of(&[(CURRENT, 2), (TIME, 4), (MASS, -1), (LENGTH, -2)]);

    pub const LUMINOUS_FLUX: Dimension = Dimension::of(&[(LUMINOSITY, 1), (SOLID_ANGLE, 1)]);
    pub const ILLUMINANCE: Dimension =
        Dimension::of(&[(LUMINOSITY, 1), (SOLID_ANGLE, 1), (LENGTH, -2)]);

    /// Create a new dimension from exponents
    pub fn new(exponents: [i8; BASE_COUNT]) -> Self {
        Dimension { exponents }
    }

    /// Build a dimension from (index, exponent) pairs, all others zero
    pub const fn of(pairs: &[(usize, i8)]) -> Self {
        let mut exponents = [0i8; BASE_COUNT];
        let mut i = 0;
        while i < pairs.len() {
            exponents[pairs[i].0] = pairs[i].1;
            i += 1;
        }
        Dimension { exponents }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, i8::wrapping_add)
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, i8::wrapping_sub)
    }

    /// Raise to integer power (multiply exponents).
    ///
    /// Exponents wrap on i8 overflow; use `checked_power` to detect it.
    pub fn power(&self, exp: i8) -> Dimension {
        Dimension { exponents: self.exponents.map(|e| e.wrapping_mul(exp)) }
    }

    /// Raise to integer power, `None` if any exponent leaves the i8 range
    pub fn checked_power(&self, exp: i8) -> Option<Dimension> {
        let mut result = [0i8; BASE_COUNT];
        for (r, &e) in result.iter_mut().zip(self.exponents.iter()) {
            *r = e.checked_mul(exp)?;
        }
        Some(Dimension { exponents: result })
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimension {
        Dimension { exponents: self.exponents.map(i8::wrapping_neg) }
    }

    fn zip_with(&self, other: &Dimension, op: fn(i8, i8) -> i8) -> Dimension {
        let mut result = [0i8; BASE_COUNT];
        for i in 0..BASE_COUNT {
            result[i] = op(self.exponents[i], other.exponents[i]);
        }
        Dimension { exponents: result }
    }

    /// Canonical unit symbol for this dimension, e.g. "m.kg.s-2".
    ///
    /// Empty for a dimensionless quantity.
    pub fn symbol(&self) -> String {
        let mut symbol = String::new();
        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp == 0 {
                continue;
            }
            if !symbol.is_empty() {
                symbol.push('.');
            }
            symbol.push_str(BASE_SYMBOLS[i]);
            if exp != 1 {
                symbol.push_str(&exp.to_string());
            }
        }
        symbol
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
        assert_eq!(Dimension::DIMENSIONLESS.symbol(), "");
    }

    #[test]
    fn test_multiply() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME);
        assert_eq!(velocity, Dimension::VELOCITY);
    }

    #[test]
    fn test_force() {
        // Force = Mass * Acceleration = M * L * T^-2
        let force = Dimension::MASS.multiply(&Dimension::ACCELERATION);
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn test_power() {
        let area = Dimension::LENGTH.power(2);
        assert_eq!(area, Dimension::AREA);
        assert_eq!(Dimension::VELOCITY.power(-1).symbol(), "m-1.s");
    }

    #[test]
    fn test_checked_power_overflow() {
        let big = Dimension::of(&[(LENGTH, 100)]);
        assert!(big.checked_power(2).is_none());
        assert_eq!(big.checked_power(1), Some(big));
    }

    #[test]
    fn test_canonical_symbols() {
        assert_eq!(Dimension::FORCE.symbol(), "m.kg.s-2");
        assert_eq!(Dimension::PRESSURE.symbol(), "m-1.kg.s-2");
        assert_eq!(Dimension::POWER.symbol(), "m2.kg.s-3");
        assert_eq!(Dimension::ILLUMINANCE.symbol(), "m-2.cd.sr");
        assert_eq!(Dimension::CURRENCY.symbol(), "¤");
        assert_eq!(format!("{}", Dimension::VELOCITY), "m.s-1");
    }

    #[test]
    fn test_invert_roundtrip() {
        assert_eq!(Dimension::FORCE.invert().invert(), Dimension::FORCE);
        assert_eq!(Dimension::FREQUENCY, Dimension::TIME.invert());
    }
}
