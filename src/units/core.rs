use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::EvalResult,
        value::number::{MultiplierKey, Number},
    },
    units::{
        catalog::catalog,
        dimension::{BaseDimension, Dimension},
        naming::name_of,
    },
    util::num::bigint_to_i32_checked,
};

/// A physical unit: a dimension together with a conversion multiplier to
/// the canonical SI unit of that dimension.
///
/// `km` is `{Length: 1}` with multiplier `1000`; `m` is the same dimension
/// with multiplier `1`. Units are plain values. Two units are equal when both
/// their dimension and multiplier agree.
#[derive(Debug, Clone)]
pub struct Unit {
    dimension:  Dimension,
    multiplier: Number,
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.multiplier.key() == other.multiplier.key()
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// The identity of a unit in the catalog's interning table.
pub type UnitKey = (Dimension, MultiplierKey);

impl Unit {
    /// Creates a unit from a dimension and a multiplier.
    #[must_use]
    pub const fn new(dimension: Dimension, multiplier: Number) -> Self {
        Self { dimension,
               multiplier }
    }

    /// The canonical SI unit of `dimension`.
    #[must_use]
    pub fn si(dimension: Dimension) -> Self {
        Self::new(dimension, Number::one())
    }

    /// The unit of pure numbers.
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::si(Dimension::NONE)
    }

    /// The SI base unit of `base`, e.g. `m` for length.
    #[must_use]
    pub fn base(base: BaseDimension) -> Self {
        Self::si(Dimension::base(base))
    }

    /// The dimension of the unit.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The factor converting a magnitude in this unit to SI.
    #[must_use]
    pub const fn multiplier(&self) -> &Number {
        &self.multiplier
    }

    /// The interning key of the unit.
    #[must_use]
    pub fn key(&self) -> UnitKey {
        (self.dimension, self.multiplier.key())
    }

    /// Returns `true` if this is the plain unit of numbers.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_none() && self.multiplier.is_one()
    }

    /// Returns `true` if this unit is the canonical SI unit of its dimension.
    #[must_use]
    pub fn is_si(&self) -> bool {
        self.multiplier.is_one()
    }

    /// Returns `true` if both units measure the same dimension.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }

    /// Splits the unit into its multiplier and the SI unit of its dimension.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{interpreter::value::number::Number, units::Unit};
    ///
    /// let (mul, unit) = Unit::parse("km").unwrap();
    /// assert_eq!(mul, Number::from(1000));
    /// assert!(unit.is_si());
    /// ```
    #[must_use]
    pub fn to_si(&self) -> (Number, Self) {
        (self.multiplier.clone(), Self::si(self.dimension))
    }

    /// The product of two units.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` if a dimension exponent overflows.
    pub fn multiply(&self, other: &Self) -> EvalResult<Self> {
        let dimension = self.dimension
                            .multiply(other.dimension)
                            .ok_or(EvalError::Overflow)?;
        Ok(Self::new(dimension, &self.multiplier * &other.multiplier))
    }

    /// The quotient of two units.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` if a dimension exponent overflows.
    pub fn divide(&self, other: &Self) -> EvalResult<Self> {
        let dimension = self.dimension
                            .divide(other.dimension)
                            .ok_or(EvalError::Overflow)?;
        Ok(Self::new(dimension, self.multiplier.checked_div(&other.multiplier)?))
    }

    /// Raises the unit to a rational power.
    ///
    /// A zero exponent, or a unit without dimension and multiplier, gives the
    /// dimensionless unit. For `p/q`, every dimension exponent must be
    /// divisible by `q`.
    ///
    /// # Errors
    /// - `EvalError::NonRationalPower` if the exponent is a non-integral
    ///   real.
    /// - `EvalError::IndivisiblePower` if a dimension is not divisible by the
    ///   exponent's denominator.
    /// - `EvalError::Overflow` for exponents that do not fit.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{interpreter::value::number::Number, units::Unit};
    ///
    /// let (_, m) = Unit::parse("m").unwrap();
    /// let area = m.power(&Number::from(2)).unwrap();
    /// assert_eq!(area.power(&Number::ratio(1, 2)).unwrap(), m);
    /// assert!(m.power(&Number::ratio(1, 2)).is_err());
    /// ```
    pub fn power(&self, exponent: &Number) -> EvalResult<Self> {
        if exponent.is_zero() || self.is_dimensionless() {
            return Ok(Self::dimensionless());
        }
        let Some(rational) = exponent.as_rational() else {
            return Err(EvalError::NonRationalPower { unit:  self.to_string(),
                                                     power: exponent.to_string(), });
        };
        let numer = bigint_to_i32_checked(rational.numer(), EvalError::Overflow)?;
        let denom = bigint_to_i32_checked(rational.denom(), EvalError::Overflow)?;

        let root = self.dimension
                       .root(denom)
                       .ok_or_else(|| EvalError::IndivisiblePower { unit:  self.to_string(),
                                                                    power: exponent.to_string(), })?;
        let dimension = root.powi(numer).ok_or(EvalError::Overflow)?;
        Ok(Self::new(dimension, self.multiplier.pow(exponent)?))
    }

    /// The quantity this unit measures, such as `force`, if it is registered.
    #[must_use]
    pub fn quantity(&self) -> Option<&'static str> {
        catalog().entry(self).and_then(|entry| entry.quantity)
    }

    /// The display name of the unit.
    ///
    /// Registered units use their own name; SI units without one get a
    /// synthesized name. Other multiplied units are shown as the multiplier
    /// followed by the SI name.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(name) = catalog().entry(self).and_then(|entry| entry.name) {
            return name.to_string();
        }
        let si_name = name_of(self.dimension).text;
        if self.is_si() {
            si_name
        } else if si_name.is_empty() {
            self.multiplier.to_string()
        } else {
            format!("{} {si_name}", self.multiplier)
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
