use std::fmt;

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    units::Unit,
};

/// A computed quantity: a magnitude in the canonical SI unit of its
/// dimension.
///
/// The constructor folds any unit multiplier into the magnitude, so the unit
/// of a `Value` is always an SI unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    number: Number,
    unit:   Unit,
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Self::new(number, &Unit::dimensionless())
    }
}

impl Value {
    /// Creates a value of `number` times `unit`, converted to SI.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{
    ///     interpreter::value::{core::Value, number::Number},
    ///     units::Unit,
    /// };
    ///
    /// let (mul, m) = Unit::parse("km").unwrap();
    /// let km = Unit::new(m.dimension(), mul);
    /// let v = Value::new(Number::from(5), &km);
    /// assert_eq!(v.number(), &Number::from(5000));
    /// assert!(v.unit().is_si());
    /// ```
    #[must_use]
    pub fn new(number: Number, unit: &Unit) -> Self {
        let (multiplier, unit) = unit.to_si();
        let number = if multiplier.is_one() { number } else { &number * &multiplier };
        Self { number, unit }
    }

    /// The magnitude in SI units.
    #[must_use]
    pub const fn number(&self) -> &Number {
        &self.number
    }

    /// The SI unit.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The quantity measured by this value, e.g. `force`, if known.
    #[must_use]
    pub fn quantity(&self) -> Option<&'static str> {
        self.unit.quantity()
    }

    fn check_same_unit(&self, other: &Self, operation: &'static str) -> EvalResult<()> {
        if self.unit == other.unit {
            return Ok(());
        }
        Err(EvalError::UnitMismatch { operation,
                                      left: self.unit.to_string(),
                                      right: other.unit.to_string() })
    }

    /// Adds two values of the same unit.
    ///
    /// # Errors
    /// Returns `EvalError::UnitMismatch` if the units differ.
    pub fn add(&self, other: &Self) -> EvalResult<Self> {
        self.check_same_unit(other, "add")?;
        Ok(Self { number: &self.number + &other.number,
                  unit:   self.unit.clone(), })
    }

    /// Subtracts two values of the same unit.
    ///
    /// # Errors
    /// Returns `EvalError::UnitMismatch` if the units differ.
    pub fn subtract(&self, other: &Self) -> EvalResult<Self> {
        self.check_same_unit(other, "subtract")?;
        Ok(Self { number: &self.number - &other.number,
                  unit:   self.unit.clone(), })
    }

    /// Multiplies two values, composing their units.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` if a dimension exponent overflows.
    pub fn multiply(&self, other: &Self) -> EvalResult<Self> {
        Ok(Self::new(&self.number * &other.number, &self.unit.multiply(&other.unit)?))
    }

    /// Divides two values, composing their units.
    ///
    /// # Errors
    /// - `EvalError::DivisionByZero` if `other` is zero.
    /// - `EvalError::Overflow` if a dimension exponent overflows.
    pub fn divide(&self, other: &Self) -> EvalResult<Self> {
        Ok(Self::new(self.number.checked_div(&other.number)?, &self.unit.divide(&other.unit)?))
    }

    /// Raises the value to a dimensionless power.
    ///
    /// # Errors
    /// - `EvalError::DimensionedExponent` if `exponent` has a unit.
    /// - Any error from [`Number::pow`] or [`Unit::power`].
    pub fn power(&self, exponent: &Self) -> EvalResult<Self> {
        if !exponent.unit.is_dimensionless() {
            return Err(EvalError::DimensionedExponent { unit: exponent.unit.to_string() });
        }
        let unit = self.unit.power(&exponent.number)?;
        Ok(Self::new(self.number.pow(&exponent.number)?, &unit))
    }

    /// The value with its magnitude negated.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self { number: -&self.number,
               unit:   self.unit.clone(), }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
