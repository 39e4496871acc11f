//! Unit representation with SI conversion factors

use std::fmt;
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use crate::Dimension;

/// Represents a physical unit with its dimension and conversion factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "km/h", "m.kg.s-2")
    pub symbol: String,
    /// Factor to convert to SI (value_si = value * factor)
    pub factor: f64,
    /// The dimensional signature
    pub dimension: Dimension,
}

impl Unit {
    pub fn new(symbol: &str, factor: f64, dimension: Dimension) -> Self {
        Unit {
            symbol: symbol.to_string(),
            factor,
            dimension,
        }
    }

    /// The SI unit for a dimension: factor 1 and the canonical symbol
    pub fn si(dimension: Dimension) -> Self {
        Unit {
            symbol: dimension.symbol(),
            factor: 1.0,
            dimension,
        }
    }

    /// The unit of pure numbers
    pub fn dimensionless() -> Self {
        Unit::si(Dimension::DIMENSIONLESS)
    }

    /// Check if this unit is expressed in SI (factor exactly 1)
    pub fn is_si(&self) -> bool {
        self.factor == 1.0
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Factor to SI and the SI unit with the same dimension.
    ///
    /// The SI unit symbol is derived from the dimension, not from this unit's
    /// spelling: `N` becomes `m.kg.s-2`.
    pub fn to_si(&self) -> (f64, Unit) {
        (self.factor, Unit::si(self.dimension))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A unit as held by a quantity: either a resolved unit or the undefined
/// unit produced by a failed lookup.
///
/// The undefined unit reads as symbol `"?"`, factor `0` and no dimensions,
/// so arithmetic on it stays numerically defined. It is never compatible
/// with any unit, including itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitRef {
    Resolved(Arc<Unit>),
    Undefined,
}

impl UnitRef {
    pub const UNDEFINED_SYMBOL: &'static str = "?";

    pub fn resolved(unit: Unit) -> Self {
        UnitRef::Resolved(Arc::new(unit))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, UnitRef::Resolved(_))
    }

    pub fn get(&self) -> Option<&Unit> {
        match self {
            UnitRef::Resolved(unit) => Some(unit.as_ref()),
            UnitRef::Undefined => None,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            UnitRef::Resolved(unit) => &unit.symbol,
            UnitRef::Undefined => Self::UNDEFINED_SYMBOL,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            UnitRef::Resolved(unit) => unit.factor,
            UnitRef::Undefined => 0.0,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            UnitRef::Resolved(unit) => unit.dimension,
            UnitRef::Undefined => Dimension::DIMENSIONLESS,
        }
    }

    /// Both resolved and with identical dimensions
    pub fn is_compatible(&self, other: &UnitRef) -> bool {
        match (self, other) {
            (UnitRef::Resolved(a), UnitRef::Resolved(b)) => a.is_compatible(b),
            _ => false,
        }
    }

    /// The SI unit for this unit's dimension; undefined stays undefined
    pub fn to_si(&self) -> UnitRef {
        match self {
            UnitRef::Resolved(unit) => UnitRef::resolved(Unit::si(unit.dimension)),
            UnitRef::Undefined => UnitRef::Undefined,
        }
    }
}

impl From<Unit> for UnitRef {
    fn from(unit: Unit) -> Self {
        UnitRef::resolved(unit)
    }
}

impl From<Arc<Unit>> for UnitRef {
    fn from(unit: Arc<Unit>) -> Self {
        UnitRef::Resolved(unit)
    }
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", 1.0, Dimension::LENGTH)
    }

    fn kilometer() -> Unit {
        Unit::new("km", 1000.0, Dimension::LENGTH)
    }

    fn second() -> Unit {
        Unit::new("s", 1.0, Dimension::TIME)
    }

    #[test]
    fn test_si_unit() {
        assert!(meter().is_si());
        assert!(!kilometer().is_si());
    }

    #[test]
    fn test_compatible_units() {
        assert!(meter().is_compatible(&kilometer()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_to_si_recomputes_symbol() {
        let newton = Unit::new("N", 1.0, Dimension::FORCE);
        let (factor, si) = newton.to_si();
        assert_eq!(factor, 1.0);
        assert_eq!(si.symbol, "m.kg.s-2");

        let (factor, si) = kilometer().to_si();
        assert_eq!(factor, 1000.0);
        assert_eq!(si.symbol, "m");
    }

    #[test]
    fn test_undefined_ref() {
        let undefined = UnitRef::Undefined;
        assert_eq!(undefined.symbol(), "?");
        assert_eq!(undefined.factor(), 0.0);
        assert!(!undefined.is_compatible(&UnitRef::Undefined));
        assert!(!undefined.is_compatible(&meter().into()));
        assert!(UnitRef::from(meter()).is_compatible(&kilometer().into()));
    }
}
