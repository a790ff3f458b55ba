use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use ordered_float::OrderedFloat;

use crate::{
    error::EvalError,
    interpreter::evaluator::core::EvalResult,
    util::num::is_safe_integral,
};

/// Largest integer exponent for which exact powers are computed exactly.
///
/// Larger exponents fall back to floating point.
const MAX_EXACT_EXPONENT: i32 = 4096;

/// The magnitude of a quantity.
///
/// Integers and integer ratios are kept exact; decimal literals and anything
/// derived from them (or from transcendental constants) are reals.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An exact rational number. Integers have a denominator of one.
    Exact(BigRational),
    /// A double precision real.
    Real(f64),
}

/// Hashable identity of a unit multiplier.
///
/// Integral reals are keyed as exact integers so that multipliers computed
/// through floating point still intern to the same unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MultiplierKey {
    /// Exact multiplier.
    Exact(BigRational),
    /// Non-integral real multiplier.
    Real(OrderedFloat<f64>),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Exact(BigRational::from_integer(BigInt::from(value)))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<BigRational> for Number {
    fn from(value: BigRational) -> Self {
        Self::Exact(value)
    }
}

impl Number {
    /// The exact number zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::Exact(BigRational::zero())
    }

    /// The exact number one.
    #[must_use]
    pub fn one() -> Self {
        Self::Exact(BigRational::one())
    }

    /// Builds the exact ratio `numer / denom`.
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    #[must_use]
    pub fn ratio(numer: i64, denom: i64) -> Self {
        Self::Exact(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Builds the exact number `mantissa · 10^exponent`.
    ///
    /// ## Example
    /// ```
    /// use physcalc::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::scaled(254, -4), Number::ratio(127, 5000));
    /// assert_eq!(Number::scaled(37, 9), Number::from(37_000_000_000));
    /// ```
    #[must_use]
    pub fn scaled(mantissa: i64, exponent: i32) -> Self {
        let power = BigInt::from(10).pow(exponent.unsigned_abs());
        let mantissa = BigInt::from(mantissa);
        if exponent >= 0 {
            Self::Exact(BigRational::from_integer(mantissa * power))
        } else {
            Self::Exact(BigRational::new(mantissa, power))
        }
    }

    /// Exact `10^exponent`.
    #[must_use]
    pub fn power_of_ten(exponent: i32) -> Self {
        Self::scaled(1, exponent)
    }

    /// Reads a numeric literal.
    ///
    /// Integers (`12`) and ratios (`1/3`) are exact, decimals (`1.5`, `.5`,
    /// `2.`) are reals.
    ///
    /// ## Example
    /// ```
    /// use physcalc::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::parse_literal("1/3"), Some(Number::ratio(1, 3)));
    /// assert_eq!(Number::parse_literal("42"), Some(Number::from(42)));
    /// assert_eq!(Number::parse_literal("2.5"), Some(Number::Real(2.5)));
    /// assert_eq!(Number::parse_literal("1/0"), None);
    /// ```
    #[must_use]
    pub fn parse_literal(text: &str) -> Option<Self> {
        if let Some((numer, denom)) = text.split_once('/') {
            let numer: BigInt = numer.trim().parse().ok()?;
            let denom: BigInt = denom.trim().parse().ok()?;
            if denom.is_zero() {
                return None;
            }
            return Some(Self::Exact(BigRational::new(numer, denom)));
        }
        if text.contains('.') {
            let normalized = if text.ends_with('.') { format!("{text}0") } else { text.to_string() };
            return normalized.parse::<f64>().ok().map(Self::Real);
        }
        text.parse::<BigInt>()
            .ok()
            .map(|n| Self::Exact(BigRational::from_integer(n)))
    }

    /// Returns `true` if the number is exact.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }

    /// Returns `true` for an exact or real zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_zero(),
            Self::Real(f) => *f == 0.0,
        }
    }

    /// Returns `true` for an exact or real one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_one(),
            Self::Real(f) => (*f - 1.0).abs() < f64::EPSILON,
        }
    }

    /// Returns `true` if the number is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_negative(),
            Self::Real(f) => *f < 0.0,
        }
    }

    /// Converts to `f64`, possibly losing precision.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Exact(r) => r.to_f64().unwrap_or(f64::NAN),
            Self::Real(f) => *f,
        }
    }

    /// Returns the number as an exact rational, if it has one.
    ///
    /// Integral reals count as rational; other reals do not.
    #[must_use]
    pub fn as_rational(&self) -> Option<BigRational> {
        match self {
            Self::Exact(r) => Some(r.clone()),
            Self::Real(f) if is_safe_integral(*f) => {
                BigInt::from_f64(*f).map(BigRational::from_integer)
            },
            Self::Real(_) => None,
        }
    }

    /// Returns the number as an integer, if it is one.
    #[must_use]
    pub fn as_integer(&self) -> Option<BigInt> {
        self.as_rational()
            .filter(|r| r.is_integer())
            .map(|r| r.to_integer())
    }

    /// Returns the interning key of this number.
    #[must_use]
    pub fn key(&self) -> MultiplierKey {
        match self.as_rational() {
            Some(r) => MultiplierKey::Exact(r),
            None => MultiplierKey::Real(OrderedFloat(self.to_f64())),
        }
    }

    /// Divides `self` by `other`.
    ///
    /// Exact division stays exact.
    ///
    /// # Errors
    /// Returns `EvalError::DivisionByZero` if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a / b),
            _ => Self::Real(self.to_f64() / other.to_f64()),
        })
    }

    /// Raises `self` to the power `exponent`.
    ///
    /// Exact bases with small integer exponents give exact results; every
    /// other combination is computed with `f64::powf`.
    ///
    /// # Errors
    /// - `EvalError::DivisionByZero` for zero raised to a negative power.
    /// - `EvalError::ComplexResult` for a negative base and a fractional
    ///   exponent.
    /// - `EvalError::Overflow` if the result is not finite.
    ///
    /// ## Example
    /// ```
    /// use physcalc::interpreter::value::number::Number;
    ///
    /// let r = Number::ratio(2, 3).pow(&Number::from(2)).unwrap();
    /// assert_eq!(r, Number::ratio(4, 9));
    ///
    /// let r = Number::from(4).pow(&Number::ratio(1, 2)).unwrap();
    /// assert_eq!(r, Number::Real(2.0));
    ///
    /// assert!(Number::from(-8).pow(&Number::ratio(1, 3)).is_err());
    /// ```
    pub fn pow(&self, exponent: &Self) -> EvalResult<Self> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        if self.is_zero() && exponent.is_negative() {
            return Err(EvalError::DivisionByZero);
        }
        if let Self::Exact(base) = self
           && let Self::Exact(e) = exponent
           && e.is_integer()
           && let Some(e) = e.to_integer().to_i32()
           && e.abs() <= MAX_EXACT_EXPONENT
        {
            return Ok(Self::Exact(base.pow(e)));
        }

        let integral = exponent.as_integer().is_some();
        if self.is_negative() && !integral {
            return Err(EvalError::ComplexResult { base:  self.to_string(),
                                                  power: exponent.to_string(), });
        }
        let result = self.to_f64().powf(exponent.to_f64());
        if result.is_finite() { Ok(Self::Real(result)) } else { Err(EvalError::Overflow) }
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Exact(r) => Number::Exact(-r),
            Number::Real(f) => Number::Real(-f),
        }
    }
}

macro_rules! impl_exact_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for &Number {
            type Output = Number;

            fn $method(self, other: &Number) -> Number {
                match (self, other) {
                    (Number::Exact(a), Number::Exact(b)) => Number::Exact(a $op b),
                    _ => Number::Real(self.to_f64() $op other.to_f64()),
                }
            }
        }
    };
}

impl_exact_op!(Add, add, +);
impl_exact_op!(Sub, sub, -);
impl_exact_op!(Mul, mul, *);

impl fmt::Display for Number {
    /// Formats the number in decimal or scientific form; see
    /// [`crate::interpreter::value::format::format_number`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::interpreter::value::format::format_number(self, false))
    }
}
