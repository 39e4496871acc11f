//! Quantity arithmetic
//!
//! Results of add, subtract, multiply, divide, reciprocal and power are always
//! expressed in SI units; convert them with `Quantity::convert_to` or
//! `Quantity::in_unit` when another unit is wanted. Scaling by a plain number
//! keeps the unit.
//!
//! Operations that need compatible operands follow the process-wide `Policy`.
//! The `try_*` variants return `UnitError::Incompatible` instead, and the
//! `Policy` methods pin a policy for a single call.
//!
//! An operand with an undefined unit makes the result undefined as well.

use std::cmp::Ordering;
use std::ops;

use metron_core::UnitError;

use crate::policy::{ensure_compatible, Policy};
use crate::{Dimension, Quantity, Unit, UnitRef};

/// SI unit of `a`, undefined if any operand is undefined
fn si_unit_of(a: &Quantity, others: &[&Quantity]) -> UnitRef {
    if others.iter().any(|q| !q.is_valid()) {
        return UnitRef::Undefined;
    }
    a.unit().to_si()
}

/// SI unit for the combined dimensions of two units
fn combine(a: &UnitRef, b: &UnitRef, op: fn(&Dimension, &Dimension) -> Dimension) -> UnitRef {
    match (a.get(), b.get()) {
        (Some(a), Some(b)) => UnitRef::resolved(Unit::si(op(&a.dimension, &b.dimension))),
        _ => UnitRef::Undefined,
    }
}

fn accumulate(a: &Quantity, more: &[Quantity], sign: f64) -> Quantity {
    let value = more.iter().fold(a.si_value(), |acc, b| acc + sign * b.si_value());
    let others: Vec<&Quantity> = more.iter().collect();
    Quantity::new(value, si_unit_of(a, &others))
}

impl Policy {
    /// Add two quantities with compatible units
    pub fn add(self, a: &Quantity, b: &Quantity) -> Quantity {
        self.check(a, b);
        Quantity::new(a.si_value() + b.si_value(), si_unit_of(a, &[b]))
    }

    pub fn subtract(self, a: &Quantity, b: &Quantity) -> Quantity {
        self.add(a, &negate(b))
    }

    /// Add any number of quantities to the first one
    pub fn sum(self, a: &Quantity, more: &[Quantity]) -> Quantity {
        for b in more {
            self.check(a, b);
        }
        accumulate(a, more, 1.0)
    }

    /// Subtract any number of quantities from the first one
    pub fn diff(self, a: &Quantity, more: &[Quantity]) -> Quantity {
        for b in more {
            self.check(a, b);
        }
        accumulate(a, more, -1.0)
    }

    /// `|a - b| < |epsilon|`, compared in SI units
    pub fn equal(self, a: &Quantity, b: &Quantity, epsilon: &Quantity) -> bool {
        self.check(a, b);
        self.check(a, epsilon);
        (a.si_value() - b.si_value()).abs() < epsilon.si_value().abs()
    }

    pub fn more(self, a: &Quantity, b: &Quantity) -> bool {
        self.check(a, b);
        a.si_value() > b.si_value()
    }

    pub fn less(self, a: &Quantity, b: &Quantity) -> bool {
        self.check(a, b);
        a.si_value() < b.si_value()
    }
}

/// Add two quantities. The result is in SI units.
pub fn add(a: &Quantity, b: &Quantity) -> Quantity {
    Policy::global().add(a, b)
}

pub fn try_add(a: &Quantity, b: &Quantity) -> Result<Quantity, UnitError> {
    ensure_compatible(a, b)?;
    Ok(Policy::Lenient.add(a, b))
}

/// Subtract the second quantity from the first. The result is in SI units.
pub fn subtract(a: &Quantity, b: &Quantity) -> Quantity {
    Policy::global().subtract(a, b)
}

pub fn try_subtract(a: &Quantity, b: &Quantity) -> Result<Quantity, UnitError> {
    ensure_compatible(a, b)?;
    Ok(Policy::Lenient.subtract(a, b))
}

pub fn sum(a: &Quantity, more: &[Quantity]) -> Quantity {
    Policy::global().sum(a, more)
}

pub fn try_sum(a: &Quantity, more: &[Quantity]) -> Result<Quantity, UnitError> {
    for b in more {
        ensure_compatible(a, b)?;
    }
    Ok(accumulate(a, more, 1.0))
}

pub fn diff(a: &Quantity, more: &[Quantity]) -> Quantity {
    Policy::global().diff(a, more)
}

pub fn try_diff(a: &Quantity, more: &[Quantity]) -> Result<Quantity, UnitError> {
    for b in more {
        ensure_compatible(a, b)?;
    }
    Ok(accumulate(a, more, -1.0))
}

/// Flip the sign of the value; the unit does not change
pub fn negate(a: &Quantity) -> Quantity {
    Quantity::new(-a.value(), a.unit().clone())
}

/// The absolute value; the unit does not change
pub fn abs(a: &Quantity) -> Quantity {
    if a.value() < 0.0 {
        negate(a)
    } else {
        a.clone()
    }
}

/// Multiply two quantities. A new unit is derived, expressed in SI.
pub fn multiply(a: &Quantity, b: &Quantity) -> Quantity {
    Quantity::new(a.si_value() * b.si_value(), combine(a.unit(), b.unit(), Dimension::multiply))
}

/// Divide the first quantity by the second. A new unit is derived, expressed in SI.
pub fn divide(a: &Quantity, b: &Quantity) -> Quantity {
    Quantity::new(a.si_value() / b.si_value(), combine(a.unit(), b.unit(), Dimension::divide))
}

/// 1 divided by the quantity, in SI units
pub fn reciprocal(a: &Quantity) -> Quantity {
    let unit = match a.unit().get() {
        Some(unit) => UnitRef::resolved(Unit::si(unit.dimension.invert())),
        None => UnitRef::Undefined,
    };
    Quantity::new(1.0 / a.si_value(), unit)
}

/// Raise to an integer power, in SI units.
///
/// Unit exponents must stay within the i8 range; use `try_power` when that
/// is not known in advance.
pub fn power(a: &Quantity, n: i8) -> Quantity {
    let unit = match a.unit().get() {
        Some(unit) => UnitRef::resolved(Unit::si(unit.dimension.power(n))),
        None => UnitRef::Undefined,
    };
    Quantity::new(a.si_value().powi(i32::from(n)), unit)
}

pub fn try_power(a: &Quantity, n: i8) -> Result<Quantity, UnitError> {
    if let Some(unit) = a.unit().get() {
        if unit.dimension.checked_power(n).is_none() {
            return Err(UnitError::ExponentOverflow(format!("({})^{}", a.symbol(), n)));
        }
    }
    Ok(power(a, n))
}

/// Scale the value; the unit does not change
pub fn multiply_by_scalar(a: &Quantity, factor: f64) -> Quantity {
    Quantity::new(a.value() * factor, a.unit().clone())
}

/// Scale the value down; the unit does not change
pub fn divide_by_scalar(a: &Quantity, divisor: f64) -> Quantity {
    Quantity::new(a.value() / divisor, a.unit().clone())
}

/// Equal within a tolerance. Epsilon should be much smaller than the operands.
pub fn equal(a: &Quantity, b: &Quantity, epsilon: &Quantity) -> bool {
    Policy::global().equal(a, b, epsilon)
}

pub fn try_equal(a: &Quantity, b: &Quantity, epsilon: &Quantity) -> Result<bool, UnitError> {
    ensure_compatible(a, b)?;
    ensure_compatible(a, epsilon)?;
    Ok(Policy::Lenient.equal(a, b, epsilon))
}

pub fn more(a: &Quantity, b: &Quantity) -> bool {
    Policy::global().more(a, b)
}

pub fn less(a: &Quantity, b: &Quantity) -> bool {
    Policy::global().less(a, b)
}

/// Total order on SI values. Compatibility is not checked.
pub fn compare(a: &Quantity, b: &Quantity) -> Ordering {
    a.si_value().total_cmp(&b.si_value())
}

pub fn try_compare(a: &Quantity, b: &Quantity) -> Result<Ordering, UnitError> {
    ensure_compatible(a, b)?;
    Ok(compare(a, b))
}

/// Sort ascending by physical size, whatever the display units.
///
/// All quantities should be compatible; the order is meaningless otherwise.
pub fn sort(quantities: &mut [Quantity]) {
    quantities.sort_by(compare);
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $func:path) => {
        impl ops::$trait<&Quantity> for &Quantity {
            type Output = Quantity;

            fn $method(self, rhs: &Quantity) -> Quantity {
                $func(self, rhs)
            }
        }

        impl ops::$trait for Quantity {
            type Output = Quantity;

            fn $method(self, rhs: Quantity) -> Quantity {
                $func(&self, &rhs)
            }
        }
    };
}

binary_op!(Add, add, self::add);
binary_op!(Sub, sub, self::subtract);
binary_op!(Mul, mul, self::multiply);
binary_op!(Div, div, self::divide);

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $func:path) => {
        impl ops::$trait<f64> for &Quantity {
            type Output = Quantity;

            fn $method(self, rhs: f64) -> Quantity {
                $func(self, rhs)
            }
        }

        impl ops::$trait<f64> for Quantity {
            type Output = Quantity;

            fn $method(self, rhs: f64) -> Quantity {
                $func(&self, rhs)
            }
        }
    };
}

scalar_op!(Mul, mul, self::multiply_by_scalar);
scalar_op!(Div, div, self::divide_by_scalar);

impl ops::Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        negate(self)
    }
}

impl ops::Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        negate(&self)
    }
}
