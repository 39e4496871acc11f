//! Quantity type - a value with an associated unit

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use metron_core::format::render_default;
use metron_core::{Template, UnitError};
use serde::{Serialize, Deserialize};

use crate::{Dimension, Unit, UnitRef, UnitRegistry};

/// A physical quantity: a numeric value with an associated unit.
///
/// Quantities are values; every operation returns a new one except
/// `normalize`. A quantity whose unit failed to resolve is invalid and
/// stays invalid through arithmetic, see `is_valid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,
    unit: UnitRef,
}

impl Quantity {
    pub fn new(value: f64, unit: UnitRef) -> Self {
        Quantity { value, unit }
    }

    /// A quantity in the SI unit of `dimension`
    pub fn si(value: f64, dimension: Dimension) -> Self {
        Quantity::new(value, UnitRef::resolved(Unit::si(dimension)))
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: f64) -> Self {
        Quantity::si(value, Dimension::DIMENSIONLESS)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &UnitRef {
        &self.unit
    }

    pub fn symbol(&self) -> &str {
        self.unit.symbol()
    }

    /// The value and the unit symbol
    pub fn split(&self) -> (f64, &str) {
        (self.value, self.unit.symbol())
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// A quantity is valid when its unit resolved
    pub fn is_valid(&self) -> bool {
        self.unit.is_resolved()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.is_valid() && self.dimension().is_dimensionless()
    }

    /// Check if two quantities have the same dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Check whether this quantity can be converted to the given unit
    pub fn has_compatible_unit(&self, registry: &UnitRegistry, symbol: &str) -> bool {
        self.unit.is_compatible(&registry.lookup(symbol))
    }

    /// Get the value in SI units
    pub fn si_value(&self) -> f64 {
        self.value * self.unit.factor()
    }

    /// Convert to SI units
    pub fn to_si(&self) -> Quantity {
        Quantity::new(self.si_value(), self.unit.to_si())
    }

    /// Rewrite this quantity in place to SI units
    pub fn normalize(&mut self) {
        self.value = self.si_value();
        self.unit = self.unit.to_si();
    }

    /// Convert to another unit.
    ///
    /// Fails when this quantity is invalid, when the symbol is unknown or when
    /// the target unit has different dimensions. Never panics, whatever the
    /// compatibility policy.
    pub fn convert_to(&self, registry: &UnitRegistry, symbol: &str) -> Result<Quantity, UnitError> {
        let target = registry.resolve(symbol)?;
        self.convert_to_unit(&UnitRef::Resolved(target))
    }

    /// Checked conversion to an already resolved unit
    pub fn convert_to_unit(&self, target: &UnitRef) -> Result<Quantity, UnitError> {
        if !self.is_valid() {
            return Err(UnitError::UndefinedUnit);
        }
        if !self.unit.is_compatible(target) {
            return Err(UnitError::incompatible(self.to_string(), target.symbol()));
        }
        Ok(self.convert(target))
    }

    /// Convert without checking compatibility.
    ///
    /// For call sites that already validated the units; an incompatible target
    /// gives a meaningless value.
    pub fn convert(&self, target: &UnitRef) -> Quantity {
        Quantity::new(self.si_value() / target.factor(), target.clone())
    }

    /// Unchecked conversion to a unit symbol, see `convert`
    pub fn in_unit(&self, registry: &UnitRegistry, symbol: &str) -> Quantity {
        self.convert(&registry.lookup(symbol))
    }

    /// Format with an explicit template
    pub fn format(&self, template: &Template) -> String {
        template.render(self.value, self.symbol())
    }

    /// Value, unit, SI factor and exponents, for debugging
    pub fn inspect(&self) -> String {
        let dimension = self.dimension();
        format!(
            "{:.6} {} -> {:.6} {} {:?}",
            self.value,
            self.symbol(),
            self.unit.factor(),
            dimension.symbol(),
            dimension.exponents
        )
    }

    /// Convert a time quantity to a `Duration`
    pub fn to_duration(&self) -> Result<Duration, UnitError> {
        if !self.is_valid() {
            return Err(UnitError::UndefinedUnit);
        }
        if self.dimension() != Dimension::TIME {
            return Err(UnitError::incompatible(self.to_string(), "s"));
        }
        let seconds = self.si_value();
        Duration::try_from_secs_f64(seconds)
            .map_err(|_| UnitError::InvalidNumber(seconds.to_string()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_default(self.value, self.symbol()))
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare SI values for equality
        self.is_compatible(other) && self.si_value() == other.si_value()
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_compatible(other) {
            return None;
        }
        self.si_value().partial_cmp(&other.si_value())
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::dimensionless(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_creation() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(5.0, "m");
        assert_eq!(q.value(), 5.0);
        assert_eq!(q.symbol(), "m");
        assert!(q.is_valid());
    }

    #[test]
    fn test_dimensionless() {
        let q = Quantity::dimensionless(42.0);
        assert!(q.is_dimensionless());
        assert_eq!(q.symbol(), "");
    }

    #[test]
    fn test_to_si() {
        let registry = UnitRegistry::new();
        let si = registry.quantity(5.0, "km").to_si();
        assert_eq!(si.value(), 5000.0);
        assert_eq!(si.symbol(), "m");
    }

    #[test]
    fn test_normalize() {
        let registry = UnitRegistry::new();
        let mut q = registry.quantity(1.2, "mph");
        assert_eq!(q.split(), (1.2, "mph"));
        q.normalize();
        assert_eq!(format!("{:.4}", q.value()), "0.5364");
        assert_eq!(q.symbol(), "m.s-1");
    }

    #[test]
    fn test_convert_to() {
        let registry = UnitRegistry::new();
        let cases = [
            (454.8, "kph", "245.5724", "kn"),
            (1500.0, "m", "0.9321", "mi"),
            (0.9320568, "mi", "1500.0000", "m"),
            (1.0, "m/s", "3.6000", "kph"),
            (-1.0, "m/s", "-1.0000", "m/s"),
            (1000.0, "$", "1000.0000", "USD"),
            (3.1, "us gal", "11.7348", "L"),
            (7.0, "L/100km", "0.0700", "mm2"),
            (3.0, "N", "3.0000", "kg.m/s2"),
            (1.0, "psi", "0.0689", "bar"),
            (6894.757, "Pa", "1.0000", "lbf.in-2"),
        ];
        for (value, from, expected, to) in cases {
            let converted = registry.quantity(value, from).convert_to(&registry, to).unwrap();
            let (v, s) = converted.split();
            assert_eq!(format!("{:.4}", v), expected, "{} {} -> {}", value, from, to);
            assert_eq!(s, to);
        }
    }

    #[test]
    fn test_convert_to_failures() {
        let registry = UnitRegistry::new();
        assert!(matches!(
            registry.quantity(1.0, "m/s").convert_to(&registry, "m"),
            Err(UnitError::Incompatible { .. })
        ));
        assert!(matches!(
            registry.quantity(34.0, "¤/m").convert_to(&registry, "$"),
            Err(UnitError::Incompatible { .. })
        ));
        assert!(matches!(
            registry.quantity(1.0, "m").convert_to(&registry, "chickens"),
            Err(UnitError::UnknownSymbol(_))
        ));
        assert_eq!(
            registry.quantity(1.0, "bla").convert_to(&registry, "m").unwrap_err(),
            UnitError::UndefinedUnit
        );
    }

    #[test]
    fn test_conversion_round_trip() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(12.75, "lbf");
        let back = q
            .convert_to(&registry, "kN")
            .and_then(|kn| kn.convert_to(&registry, "lbf"))
            .unwrap();
        assert!((back.value() - 12.75).abs() < 1e-9);
    }

    #[test]
    fn test_in_unit_unchecked() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(2.0, "km").in_unit(&registry, "mi");
        assert!((q.value() - 2000.0 / 1609.344).abs() < 1e-12);

        // incompatible target: no failure, just a meaningless number
        let garbage = registry.quantity(2.0, "km").in_unit(&registry, "s");
        assert_eq!(garbage.symbol(), "s");
        assert_eq!(garbage.value(), 2000.0);
    }

    #[test]
    fn test_has_compatible_unit() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(5.0, "W");
        assert!(q.has_compatible_unit(&registry, "J/s"));
        assert!(!q.has_compatible_unit(&registry, "J"));
        assert!(!q.has_compatible_unit(&registry, "bla"));
    }

    #[test]
    fn test_display() {
        let registry = UnitRegistry::new();
        assert_eq!(registry.quantity(12.3456, "kn").to_string(), "12.3456 kn");
        assert_eq!(registry.quantity(0.0, "kn").to_string(), "0.0000 kn");
        assert_eq!(registry.quantity(-14.581699, "mph").to_string(), "-14.5817 mph");
        assert_eq!(registry.quantity(1.0, "bla").to_string(), "1.0000 ?");
    }

    #[test]
    fn test_format_template() {
        let registry = UnitRegistry::new();
        let template = Template::parse("%[2]s %.2[1]f").unwrap();
        assert_eq!(registry.quantity(123.5, "$").format(&template), "$ 123.50");
    }

    #[test]
    fn test_inspect() {
        let registry = UnitRegistry::new();
        let text = registry.quantity(2.0, "km").inspect();
        assert!(text.starts_with("2.000000 km -> 1000.000000 m"));
    }

    #[test]
    fn test_equality() {
        let registry = UnitRegistry::new();
        assert_eq!(registry.quantity(1.0, "km"), registry.quantity(1000.0, "m"));
        assert_ne!(registry.quantity(1.0, "m"), registry.quantity(1.0, "s"));
        assert!(registry.quantity(1.0, "ft") < registry.quantity(1.0, "yd"));
        assert_eq!(
            registry.quantity(1.0, "m").partial_cmp(&registry.quantity(1.0, "s")),
            None
        );
    }

    #[test]
    fn test_to_duration() {
        let registry = UnitRegistry::new();
        let d = registry.quantity(1.5, "d").to_duration().unwrap();
        assert_eq!(d.as_secs(), 36 * 3600);
        assert!(registry.quantity(1.5, "m").to_duration().is_err());
        assert!(registry.quantity(-1.0, "s").to_duration().is_err());
    }

    #[test]
    fn test_serialize() {
        let registry = UnitRegistry::new();
        let json = serde_json::to_value(registry.quantity(2.5, "km")).unwrap();
        assert_eq!(json["value"], 2.5);
        assert_eq!(json["unit"]["Resolved"]["symbol"], "km");
        assert_eq!(json["unit"]["Resolved"]["factor"], 1000.0);
    }
}
