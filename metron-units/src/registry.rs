//! Unit registry with memoized lookups
//!
//! The registry owns every named unit. It is seeded from the base unit table
//! and only ever grows: by `define`, and by caching compound symbols the first
//! time they parse successfully. Entries are never changed or removed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::hash_map::Entry;

use metron_core::UnitError;
use tracing::debug;

use crate::units::base_units;
use crate::{Quantity, Unit, UnitRef};

/// Registry of all known units
pub struct UnitRegistry {
    units: RwLock<HashMap<String, Arc<Unit>>>,
}

impl UnitRegistry {
    /// A registry seeded with the base unit table
    pub fn new() -> Self {
        let units = base_units()
            .into_iter()
            .map(|unit| (unit.symbol.clone(), Arc::new(unit)))
            .collect();

        UnitRegistry {
            units: RwLock::new(units),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Unit>>> {
        self.units.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Unit>>> {
        self.units.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a registered (or previously cached) unit by its exact symbol
    pub fn get(&self, symbol: &str) -> Option<Arc<Unit>> {
        self.read().get(symbol).cloned()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.read().contains_key(symbol)
    }

    /// Number of registered and cached units
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All registered and cached symbols, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.read().keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Look up a unit, parsing and caching the symbol on first use
    pub fn resolve(&self, symbol: &str) -> Result<Arc<Unit>, UnitError> {
        if let Some(unit) = self.get(symbol) {
            return Ok(unit);
        }

        let parsed = self.parse_symbol(symbol)?;
        let unit = match parsed.unit() {
            UnitRef::Resolved(unit) => Arc::clone(unit),
            UnitRef::Undefined => return Err(UnitError::UnknownSymbol(symbol.to_string())),
        };

        let cached = self
            .write()
            .entry(unit.symbol.clone())
            .or_insert_with(|| {
                debug!(symbol = %unit.symbol, factor = unit.factor, "caching parsed unit");
                Arc::clone(&unit)
            })
            .clone();
        Ok(cached)
    }

    /// Look up or parse a unit; unresolvable symbols give `UnitRef::Undefined`
    pub fn lookup(&self, symbol: &str) -> UnitRef {
        match self.resolve(symbol) {
            Ok(unit) => UnitRef::Resolved(unit),
            Err(_) => UnitRef::Undefined,
        }
    }

    /// Register a new unit: 1 `symbol` = `factor` * `base`.
    ///
    /// The base is any unit expression, e.g. "kg.m/s2", not necessarily SI.
    /// Returns the factor of the new unit to SI.
    pub fn define(&self, symbol: &str, factor: f64, base: &str) -> Result<f64, UnitError> {
        if self.contains(symbol) {
            return Err(UnitError::DuplicateSymbol(symbol.to_string()));
        }

        let base = self.parse_symbol(base)?;
        let si_factor = factor * base.unit().factor();
        let unit = Unit::new(symbol, si_factor, base.unit().dimension());

        match self.write().entry(symbol.to_string()) {
            Entry::Occupied(_) => Err(UnitError::DuplicateSymbol(symbol.to_string())),
            Entry::Vacant(slot) => {
                debug!(symbol, si_factor, dimension = %unit.dimension, "defined unit");
                slot.insert(Arc::new(unit));
                Ok(si_factor)
            }
        }
    }

    /// A quantity in the given unit; invalid if the symbol does not resolve
    pub fn quantity(&self, value: f64, symbol: &str) -> Quantity {
        Quantity::new(value, self.lookup(symbol))
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    #[test]
    fn test_seeded() {
        let registry = UnitRegistry::new();
        let m = registry.get("m").unwrap();
        assert_eq!(m.factor, 1.0);
        assert_eq!(m.dimension, Dimension::LENGTH);
        assert!(registry.contains("sq in"));
        assert!(registry.get("km").is_none());
    }

    #[test]
    fn test_lookup_caches_parsed_symbol() {
        let registry = UnitRegistry::new();
        let before = registry.len();

        let unit = registry.lookup("km/h");
        assert!(unit.is_resolved());
        assert_eq!(unit.symbol(), "km/h");
        assert_eq!(registry.len(), before + 1);

        let again = registry.get("km/h").unwrap();
        assert!((again.factor - 1000.0 / 3600.0).abs() < 1e-12);

        // second lookup is a cache hit
        registry.lookup("km/h");
        assert_eq!(registry.len(), before + 1);
    }

    #[test]
    fn test_lookup_unknown_is_undefined() {
        let registry = UnitRegistry::new();
        let before = registry.len();
        assert_eq!(registry.lookup("bla"), UnitRef::Undefined);
        assert_eq!(registry.len(), before);
        assert_eq!(
            registry.resolve("bla").unwrap_err(),
            UnitError::UnknownSymbol("bla".to_string())
        );
    }

    #[test]
    fn test_registered_symbol_with_slash() {
        let registry = UnitRegistry::new();
        let unit = registry.resolve("L/100km").unwrap();
        assert_eq!(unit.factor, 1e-8);
        assert_eq!(unit.dimension, Dimension::AREA);
    }

    #[test]
    fn test_define() {
        let registry = UnitRegistry::new();
        let factor = registry.define("furlong", 220.0, "yd").unwrap();
        assert!((factor - 201.168).abs() < 1e-9);

        let furlong = registry.get("furlong").unwrap();
        assert_eq!(furlong.dimension, Dimension::LENGTH);

        let fortnight = registry.define("fortnight", 14.0, "d").unwrap();
        assert_eq!(fortnight, 1209600.0);

        let speed = registry.resolve("furlong/fortnight").unwrap();
        assert!((speed.factor - 201.168 / 1209600.0).abs() < 1e-15);
    }

    #[test]
    fn test_define_compound_base() {
        let registry = UnitRegistry::new();
        let factor = registry.define("kp", 9.80665, "kg.m/s2").unwrap();
        assert_eq!(factor, 9.80665);
        assert_eq!(registry.get("kp").unwrap().dimension, Dimension::FORCE);
    }

    #[test]
    fn test_define_duplicate() {
        let registry = UnitRegistry::new();
        let before = registry.get("m").unwrap();
        assert_eq!(
            registry.define("m", 2.0, "ft"),
            Err(UnitError::DuplicateSymbol("m".to_string()))
        );
        assert_eq!(registry.get("m").unwrap(), before);
    }

    #[test]
    fn test_define_bad_base() {
        let registry = UnitRegistry::new();
        assert!(matches!(
            registry.define("blip", 2.0, "chickens"),
            Err(UnitError::UnknownSymbol(_))
        ));
        assert!(!registry.contains("blip"));
    }

    #[test]
    fn test_quantity_invalid() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(0.0, "bla");
        assert!(!q.is_valid());
        assert_eq!(q.symbol(), "?");
    }
}
