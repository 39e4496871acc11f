//! Temperature scales
//!
//! Quantities only hold absolute temperatures in kelvin; `degC` and `degF`
//! in the unit table are temperature differences. These helpers move between
//! kelvin and the Celsius and Fahrenheit scales.

use metron_core::UnitError;

use crate::{Dimension, Quantity};

/// 0 °C in kelvin
pub const ABSOLUTE_ZERO: f64 = 273.15;

fn kelvin(q: &Quantity) -> Result<f64, UnitError> {
    if !q.is_valid() || q.dimension() != Dimension::TEMPERATURE {
        return Err(UnitError::incompatible(q.to_string(), "K"));
    }
    Ok(q.si_value())
}

/// Degrees Celsius of a temperature quantity
pub fn kelvin_to_celsius(q: &Quantity) -> Result<f64, UnitError> {
    Ok(kelvin(q)? - ABSOLUTE_ZERO)
}

/// Degrees Fahrenheit of a temperature quantity
pub fn kelvin_to_fahrenheit(q: &Quantity) -> Result<f64, UnitError> {
    Ok(celsius_to_fahrenheit(kelvin_to_celsius(q)?))
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) / 1.8
}

/// A temperature quantity in K
pub fn celsius_to_kelvin(celsius: f64) -> Quantity {
    Quantity::si(celsius + ABSOLUTE_ZERO, Dimension::TEMPERATURE)
}

/// A temperature quantity in K
pub fn fahrenheit_to_kelvin(fahrenheit: f64) -> Quantity {
    celsius_to_kelvin(fahrenheit_to_celsius(fahrenheit))
}
