//! Unit expression parsing - expressions like "kg.m/s2", "km/h" or "lbf.in-2"
//!
//! Grammar:
//!
//! ```text
//! expression  := product ["/" product]
//! product     := factor ("." factor)*
//! factor      := symbol [exponent]        symbol has no digits and no '-'
//! exponent    := ["-"] digits
//! ```
//!
//! `*` is accepted in place of `.` and `^` before an exponent is ignored, so
//! "kg*m^2" reads as "kg.m2". A symbol that is not registered may carry a
//! metric prefix ("km", "uA", "daN") when the unprefixed unit is an SI unit.

use std::sync::{Arc, LazyLock};

use metron_core::UnitError;
use regex::Regex;

use crate::arith;
use crate::{Quantity, Unit, UnitRef, UnitRegistry};

static FACTOR_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\d-]+)(-?\d+)?$").expect("factor pattern is valid"));

/// SI metric prefixes; "da" (deca) is the only two-letter one
const PREFIXES: [(char, f64); 19] = [
    ('y', 1e-24),
    ('z', 1e-21),
    ('a', 1e-18),
    ('f', 1e-15),
    ('p', 1e-12),
    ('n', 1e-9),
    ('u', 1e-6),
    ('m', 1e-3),
    ('c', 1e-2),
    ('d', 1e-1),
    ('h', 1e2),
    ('k', 1e3),
    ('M', 1e6),
    ('G', 1e9),
    ('T', 1e12),
    ('P', 1e15),
    ('E', 1e18),
    ('Z', 1e21),
    ('Y', 1e24),
];

const DECA: f64 = 10.0;

impl UnitRegistry {
    /// Parse a unit expression into a quantity of value 1 in that unit.
    ///
    /// The resulting unit keeps the input spelling as its symbol and carries
    /// the factor of the whole expression to SI. Nothing is cached; see
    /// `resolve` for the memoizing entry point.
    pub fn parse_symbol(&self, input: &str) -> Result<Quantity, UnitError> {
        let expr = input.replace('*', ".").replace('^', "");
        if expr.is_empty() {
            return Ok(Quantity::new(1.0, UnitRef::resolved(Unit::new(input, 1.0, Default::default()))));
        }

        let parts: Vec<&str> = expr.split('/').collect();
        if parts.len() > 2 {
            return Err(UnitError::InvalidFormat(format!("more than one '/' in unit [{}]", input)));
        }

        let mut result = Quantity::new(1.0, UnitRef::resolved(Unit::dimensionless()));

        for (i, part) in parts.iter().enumerate() {
            let denominator = i == 1;
            for token in part.split('.') {
                let caps = FACTOR_RX.captures(token).ok_or_else(|| {
                    UnitError::InvalidFormat(format!("cannot parse unit [{}]", input))
                })?;

                let name = &caps[1];
                let (prefix, unit) = self.resolve_factor(name)?;
                let (factor, si) = unit.to_si();
                let mut term = Quantity::new(prefix * factor, UnitRef::resolved(si));

                if let Some(exp) = caps.get(2) {
                    let exp: i8 = exp.as_str().parse().map_err(|_| {
                        UnitError::InvalidFormat(format!("exponent out of range in [{}]", input))
                    })?;
                    if denominator && exp < 0 {
                        return Err(UnitError::InvalidFormat(format!(
                            "negative exponent after the '/' in [{}]",
                            input
                        )));
                    }
                    term = arith::power(&term, exp);
                }

                result = if denominator {
                    arith::divide(&result, &term)
                } else {
                    arith::multiply(&result, &term)
                };
            }
        }

        // value and factor swap places: one of the input unit is `value` in SI
        let unit = Unit::new(input, result.value(), result.dimension());
        Ok(Quantity::new(1.0, UnitRef::resolved(unit)))
    }

    /// Resolve one factor symbol, directly or as prefix + SI unit.
    ///
    /// Returns the prefix multiplier (1 when unprefixed) and the unit.
    fn resolve_factor(&self, name: &str) -> Result<(f64, Arc<Unit>), UnitError> {
        if let Some(unit) = self.get(name) {
            return Ok((1.0, unit));
        }
        self.split_prefix(name)
            .ok_or_else(|| UnitError::UnknownSymbol(name.to_string()))
    }

    fn split_prefix(&self, name: &str) -> Option<(f64, Arc<Unit>)> {
        let mut chars = name.chars();
        let first = chars.next()?;
        if chars.next().is_none() {
            return None;
        }

        let (mut factor, base) = if name.len() > 2 && name.starts_with("da") {
            (DECA, &name[2..])
        } else {
            let (_, factor) = PREFIXES.iter().find(|(p, _)| *p == first)?;
            (*factor, &name[first.len_utf8()..])
        };

        let mut unit = self.get(base)?;
        if unit.symbol == "g" {
            // grams are registered relative to the kilogram
            factor /= 1000.0;
            unit = self.get("kg")?;
        } else if !unit.is_si() || unit.symbol.contains(' ') {
            return None;
        }
        Some((factor, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    fn si_factor(registry: &UnitRegistry, symbol: &str) -> f64 {
        registry.parse_symbol(symbol).unwrap().to_si().value()
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-9;
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_parse_simple_unit() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("m").unwrap();
        assert_eq!(q.value(), 1.0);
        assert_eq!(q.symbol(), "m");
        assert_eq!(q.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn test_keeps_input_spelling() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("kg.m/s2").unwrap();
        assert_eq!(q.symbol(), "kg.m/s2");
        assert_eq!(q.dimension(), Dimension::FORCE);
        assert_eq!(q.unit().factor(), 1.0);
    }

    #[test]
    fn test_parse_quotient() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("km/h").unwrap();
        assert_eq!(q.dimension(), Dimension::VELOCITY);
        assert_close(q.unit().factor(), 1000.0 / 3600.0);
    }

    #[test]
    fn test_negative_exponent_in_numerator() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("lbf.in-2").unwrap();
        assert_eq!(q.dimension(), Dimension::PRESSURE);
        assert_close(q.unit().factor(), 4.4482216152605 / 0.00064516);
    }

    #[test]
    fn test_star_and_caret() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("kg*m^2/s^2").unwrap();
        assert_eq!(q.dimension(), Dimension::ENERGY);
        assert_eq!(q.symbol(), "kg*m^2/s^2");
    }

    #[test]
    fn test_space_in_symbol() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("lb/cu ft").unwrap();
        assert_close(q.unit().factor(), 0.45359237 / 0.028316846592);
    }

    #[test]
    fn test_empty_is_dimensionless() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("").unwrap();
        assert!(q.dimension().is_dimensionless());
        assert_eq!(q.unit().factor(), 1.0);
    }

    #[test]
    fn test_too_many_slashes() {
        let registry = UnitRegistry::new();
        assert!(matches!(registry.parse_symbol("m/s/s"), Err(UnitError::InvalidFormat(_))));
    }

    #[test]
    fn test_negative_exponent_after_slash() {
        let registry = UnitRegistry::new();
        assert!(matches!(registry.parse_symbol("m/s-2"), Err(UnitError::InvalidFormat(_))));
    }

    #[test]
    fn test_unparsable_factor() {
        let registry = UnitRegistry::new();
        assert!(matches!(registry.parse_symbol("m.2"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(registry.parse_symbol("m..s"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(registry.parse_symbol("m-"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(registry.parse_symbol("m300"), Err(UnitError::InvalidFormat(_))));
    }

    #[test]
    fn test_unknown_symbol() {
        let registry = UnitRegistry::new();
        assert_eq!(
            registry.parse_symbol("egg").unwrap_err(),
            UnitError::UnknownSymbol("egg".to_string())
        );
        assert_eq!(
            registry.parse_symbol("dz").unwrap_err(),
            UnitError::UnknownSymbol("dz".to_string())
        );
    }

    #[test]
    fn test_prefixes() {
        let registry = UnitRegistry::new();
        let cases = [
            ("km/s2", 1e3),
            ("$/dam", 0.1),
            ("Gs", 1e9),
            ("nJ/ns", 1.0),
            ("uA", 1e-6),
            ("mg", 1e-6),
            ("dg", 1e-4),
            ("kV", 1e3),
            ("cm", 0.01),
            ("mm-3.kg", 1e9),
            ("mm3", 1e-9),
            ("kHz", 1e3),
            ("ccd", 0.01),
            ("kg/ft2", 10.76391041670972),
            ("um", 1e-6),
            ("km2", 1e6),
            ("daN", 10.0),
            ("hPa", 100.0),
            ("aC", 1e-18),
            ("mbar", 100.0),
            ("Mm", 1e6),
        ];
        for (symbol, expected) in cases {
            assert_close(si_factor(&registry, symbol), expected);
        }
    }

    #[test]
    fn test_prefix_rejected_for_non_si_units() {
        let registry = UnitRegistry::new();
        for symbol in ["uft", "mmi", "kli", "ksq in"] {
            assert!(
                matches!(registry.parse_symbol(symbol), Err(UnitError::UnknownSymbol(_))),
                "{} should not parse",
                symbol
            );
        }
    }

    #[test]
    fn test_prefixed_gram_uses_kilogram() {
        let registry = UnitRegistry::new();
        let q = registry.parse_symbol("kg").unwrap();
        assert_eq!(q.unit().factor(), 1.0);
        let q = registry.parse_symbol("Mg").unwrap();
        assert_close(q.unit().factor(), 1000.0);
        assert_eq!(q.to_si().symbol(), "kg");
    }
}
