//! Base unit table, grouped by kind and alphabetic by kind name
//!
//! Only units whose symbol is not a combination of other symbols belong here;
//! compounds such as "m/s2" or "lb/cu ft" are parsed on demand.

use std::f64::consts::PI;
use crate::{Unit, Dimension};

/// Units every registry is seeded with
pub(crate) fn base_units() -> Vec<Unit> {
    let mut table = Vec::with_capacity(96);
    let mut kind = |dimension: Dimension, rows: &[(&str, f64)]| {
        for &(symbol, factor) in rows {
            table.push(Unit::new(symbol, factor, dimension));
        }
    };

    kind(Dimension::DIMENSIONLESS, &[("", 1.0)]);

    // standard gravity
    kind(Dimension::ACCELERATION, &[("G", 9.80665)]);

    kind(Dimension::ANGLE, &[
        ("rad", 1.0),
        ("deg", PI / 180.0),
        ("cycles", PI * 2.0),
    ]);

    kind(Dimension::ANGULAR_VELOCITY, &[("rpm", PI * 2.0 / 60.0)]);

    kind(Dimension::AREA, &[
        ("sqm", 1.0),
        ("ha", 1e4),
        ("acre", 4046.8564224),
        ("sq mi", 2589988.110336),
        ("sq in", 0.00064516),
        ("sq ft", 0.09290304),
    ]);

    // farad
    kind(Dimension::CAPACITANCE, &[("F", 1.0)]);

    kind(Dimension::TIME, &[
        ("s", 1.0),
        ("min", 60.0),
        ("h", 3600.0),
        ("d", 86400.0),
    ]);

    kind(Dimension::CHARGE, &[("C", 1.0)]);
    kind(Dimension::CURRENT, &[("A", 1.0)]);
    kind(Dimension::RESISTANCE, &[("Ω", 1.0)]);

    kind(Dimension::ENERGY, &[
        ("J", 1.0),
        ("kWh", 3.6e6),
    ]);

    kind(Dimension::FORCE, &[
        ("N", 1.0),
        ("lbf", 4.4482216152605),
    ]);

    kind(Dimension::FREQUENCY, &[("Hz", 1.0)]);

    // 1 L / 100 km = 1e-3 m3 / 1e5 m
    kind(Dimension::AREA, &[("L/100km", 1e-8)]);

    kind(Dimension::ILLUMINANCE, &[("lx", 1.0)]);

    // KiB and friends are binary; KB would be 1000
    kind(Dimension::INFORMATION, &[
        ("bit", 0.125),
        ("byte", 1.0),
        ("KiB", 1024.0),
        ("MiB", 1048576.0),
        ("GiB", 1073741824.0),
        ("TiB", 1099511627776.0),
        ("PiB", 1125899906842624.0),
    ]);

    // M is the nautical mile
    kind(Dimension::LENGTH, &[
        ("m", 1.0),
        ("mi", 1609.344),
        ("in", 0.0254),
        ("ft", 0.3048),
        ("yd", 0.9144),
        ("M", 1852.0),
    ]);

    kind(Dimension::LUMINOUS_FLUX, &[("lm", 1.0)]);
    kind(Dimension::LUMINOSITY, &[("cd", 1.0)]);

    kind(Dimension::MASS, &[
        ("kg", 1.0),
        ("g", 0.001),
        ("t", 1000.0),
        ("lb", 0.45359237),
        ("lbs", 0.45359237),
        ("oz", 0.028349523125),
        ("short ton", 907.18474),
        ("long ton", 1016.0469088),
        ("st", 6.35029318),
    ]);

    kind(Dimension::AMOUNT, &[("mol", 1.0)]);

    // fixed at par; exchange rates are not tracked
    kind(Dimension::CURRENCY, &[
        ("¤", 1.0),
        ("$", 1.0),
        ("USD", 1.0),
    ]);

    kind(Dimension::POWER, &[
        ("W", 1.0),
        ("hp", 745.699872),
    ]);

    // bar is not SI, so its prefixed forms are listed explicitly
    kind(Dimension::PRESSURE, &[
        ("Pa", 1.0),
        ("psi", 6894.75729),
        ("bar", 1e5),
        ("mbar", 100.0),
        ("kbar", 1e8),
        ("mmHg", 133.322387415),
        ("cmHg", 1333.22387415),
    ]);

    kind(Dimension::SOLID_ANGLE, &[("sr", 1.0)]);

    kind(Dimension::VELOCITY, &[
        ("kph", 1000.0 / 3600.0),
        ("mph", 1609.344 / 3600.0),
        ("kn", 1852.0 / 3600.0),
    ]);

    // degC and degF are temperature differences, see `temperature` for scales
    kind(Dimension::TEMPERATURE, &[
        ("K", 1.0),
        ("degC", 1.0),
        ("degF", 5.0 / 9.0),
    ]);

    kind(Dimension::VOLTAGE, &[("V", 1.0)]);

    kind(Dimension::VOLUME, &[
        ("cu ft", 0.028316846592),
        ("L", 1e-3),
        ("us gal", 0.003785411784),
        ("imp gal", 0.00454609),
        ("us fl oz", 0.0000295735295625),
        ("imp fl oz", 0.0000284130625),
    ]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_unique() {
        let table = base_units();
        let symbols: HashSet<&str> = table.iter().map(|u| u.symbol.as_str()).collect();
        assert_eq!(symbols.len(), table.len());
    }

    #[test]
    fn test_base_symbols_are_si() {
        let table = base_units();
        for symbol in crate::dimension::BASE_SYMBOLS {
            let unit = table.iter().find(|u| u.symbol == symbol)
                .unwrap_or_else(|| panic!("missing base unit {}", symbol));
            assert!(unit.is_si(), "{} should have factor 1", symbol);
        }
    }

    #[test]
    fn test_factors_are_positive() {
        assert!(base_units().iter().all(|u| u.factor > 0.0));
    }
}
