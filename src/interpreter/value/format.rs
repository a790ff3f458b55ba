use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use ordered_float::OrderedFloat;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, number::Number},
    },
    units::{
        BaseDimension, Dimension, UnitCast,
        naming::{UnitName, name_of},
        prefix::{NO_PREFIX, Prefix, display_prefixes},
    },
    util::{num::f64_to_i32_checked, superscript::superscript_power},
};

/// Significant digits kept when printing reals.
const SIGNIFICANT_DIGITS: usize = 12;

impl Value {
    /// Formats the value for display.
    ///
    /// With a cast, the magnitude is converted to the requested unit and shown
    /// with the unit as written. Otherwise the unit and SI prefix are chosen
    /// automatically, see [`Value::render`].
    ///
    /// # Errors
    /// - `EvalError::IncompatibleCast` if the cast unit measures a different
    ///   dimension.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{
    ///     interpreter::{evaluator::core::Context, parser::core::parse_input},
    ///     units::UnitCast,
    /// };
    ///
    /// let context = Context::new();
    /// let parsed = parse_input("90 km/h", &context).unwrap();
    /// let value = parsed.expression.evaluate(&context).unwrap();
    /// let value = value.as_value().unwrap();
    ///
    /// assert_eq!(value.stringify(&context, None).unwrap(), "25 m / s");
    /// let cast = UnitCast::parse("km/h").unwrap();
    /// assert_eq!(value.stringify(&context, Some(&cast)).unwrap(), "90 km/h");
    /// assert!(value.stringify(&context, Some(&UnitCast::parse("s").unwrap())).is_err());
    /// ```
    pub fn stringify(&self, context: &Context, cast: Option<&UnitCast>) -> EvalResult<String> {
        let frac = context.features.frac;
        let Some(cast) = cast else {
            return Ok(self.render(frac));
        };
        if !cast.unit.is_compatible(self.unit()) {
            return Err(EvalError::IncompatibleCast { from: self.unit().to_string(),
                                                     to:   cast.text.clone(), });
        }
        let number = self.number().checked_div(&cast.multiplier)?;
        Ok(join(&format_number(&number, frac), &cast.text))
    }

    /// Formats the value with an automatically chosen unit name and prefix.
    ///
    /// Kilograms are shown through grams so that the prefix search can pick
    /// `kg`, `g` or `mg` as appropriate.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{
    ///     interpreter::value::{core::Value, number::Number},
    ///     units::Unit,
    /// };
    ///
    /// let (mul, kg) = Unit::parse("kg").unwrap();
    /// assert_eq!(Value::new(mul, &kg).render(false), "1 kg");
    ///
    /// let (mul, m) = Unit::parse("mm").unwrap();
    /// let mm = Unit::new(m.dimension(), mul);
    /// assert_eq!(Value::new(Number::from(1500), &mm).render(false), "1.5 m");
    /// ```
    #[must_use]
    pub fn render(&self, frac: bool) -> String {
        let dimension = self.unit().dimension();
        if dimension.is_none() {
            return format_number(self.number(), frac);
        }

        let (number, name) = if dimension == Dimension::base(BaseDimension::Mass) {
            let gram = UnitName { text:            "g".to_string(),
                                  prefix_exponent: 1,
                                  disallowed:      &[], };
            (self.number() * &Number::from(1000), gram)
        } else {
            (self.number().clone(), name_of(dimension))
        };

        let prefix = choose_prefix(&number, &name);
        let shift = prefix.exponent.saturating_mul(name.prefix_exponent);
        let number = if shift == 0 { number } else { &number * &Number::power_of_ten(-shift) };
        join(&format_number(&number, frac), &format!("{}{}", prefix.symbol, name.text))
    }
}

fn join(number: &str, unit: &str) -> String {
    if unit.is_empty() { number.to_string() } else { format!("{number} {unit}") }
}

/// Picks the prefix that brings the magnitude closest to 1.
///
/// The cost of a scaled magnitude `x` is `log10(x)` above one and
/// `-3·log10(x)` below one, plus one for small inexact values. Ties keep the
/// earlier prefix, so no prefix wins over any other.
fn choose_prefix(number: &Number, name: &UnitName) -> Prefix {
    let Some(log) = log10_magnitude(number) else {
        return NO_PREFIX;
    };
    let exact = number.is_exact();

    display_prefixes().filter(|p| p.symbol.is_empty() || name.allows_prefix(p.symbol))
                      .min_by_key(|p| {
                          let shift = p.exponent.saturating_mul(name.prefix_exponent);
                          let l = log - f64::from(shift);
                          let mut cost = if l >= 0.0 { l } else { -3.0 * l };
                          if !exact && l < 0.0 {
                              cost += 1.0;
                          }
                          OrderedFloat(cost)
                      })
                      .unwrap_or(NO_PREFIX)
}

/// `log10(|x|)`, or `None` for zero and non-finite reals.
fn log10_magnitude(number: &Number) -> Option<f64> {
    match number {
        Number::Real(x) if *x == 0.0 || !x.is_finite() => None,
        Number::Real(x) => Some(x.abs().log10()),
        Number::Exact(r) if r.is_zero() => None,
        Number::Exact(r) => match r.to_f64() {
            Some(x) if x.is_normal() => Some(x.abs().log10()),
            _ => {
                let exponent = decimal_exponent(r)?;
                let mantissa = (r.abs() / ten_to(exponent)).to_f64()?;
                Some(f64::from(exponent) + mantissa.log10())
            },
        },
    }
}

/// Formats a magnitude.
///
/// In fraction mode exact numbers are shown as `n/d`, or as a bare integer.
/// Otherwise exact numbers within the range of `f64` and all reals go
/// through [`scientific`]; larger or smaller exact numbers are scaled into
/// `[1, 10)` exactly before rounding.
///
/// ## Example
/// ```
/// use physcalc::interpreter::value::{format::format_number, number::Number};
///
/// assert_eq!(format_number(&Number::ratio(2, 3), true), "2/3");
/// assert_eq!(format_number(&Number::ratio(2, 3), false), "0.666666666667");
/// assert_eq!(format_number(&Number::power_of_ten(400), false), "1·10⁴⁰⁰");
/// assert_eq!(format_number(&Number::scaled(-25, -401), false), "-2.5·10⁻⁴⁰⁰");
/// ```
#[must_use]
pub fn format_number(number: &Number, frac: bool) -> String {
    match number {
        Number::Exact(r) if frac => r.to_string(),
        Number::Exact(r) => exact_scientific(r),
        Number::Real(x) => scientific(*x),
    }
}

/// Exponents that `f64` represents without loss of range or precision.
const F64_EXPONENTS: std::ops::Range<i32> = -300..300;

fn exact_scientific(r: &BigRational) -> String {
    if r.is_zero() {
        return "0".to_string();
    }
    let Some(exponent) = decimal_exponent(r).filter(|e| !F64_EXPONENTS.contains(e)) else {
        return scientific(r.to_f64().unwrap_or(f64::NAN));
    };
    let Some(scaled) = (r / ten_to(exponent)).to_f64() else {
        return scientific(f64::NAN);
    };
    let (mut mantissa, mut exponent) = (round_significant(scaled), exponent);
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    format!("{mantissa}·10{}", superscript_power(exponent))
}

/// `floor(log10(|r|))` of a non-zero rational, from the digit counts of
/// its numerator and denominator.
fn decimal_exponent(r: &BigRational) -> Option<i32> {
    let digits = |n: &BigInt| i32::try_from(n.magnitude().to_string().len()).ok();
    let mut exponent = digits(r.numer())?.checked_sub(digits(r.denom())?)?;
    if r.abs() < ten_to(exponent) {
        exponent -= 1;
    }
    Some(exponent)
}

fn ten_to(exponent: i32) -> BigRational {
    let power = BigInt::from(10).pow(exponent.unsigned_abs());
    if exponent >= 0 {
        BigRational::from_integer(power)
    } else {
        BigRational::new(BigInt::from(1), power)
    }
}

fn round_significant(x: f64) -> f64 {
    format!("{x:.prec$e}", prec = SIGNIFICANT_DIGITS - 1).parse()
                                                         .unwrap_or(x)
}

/// Formats a real in plain decimal for magnitudes in `[0.1, 1e6)` and as
/// `m·10ⁿ` otherwise, rounded to 12 significant digits.
///
/// ## Example
/// ```
/// use physcalc::interpreter::value::format::scientific;
///
/// assert_eq!(scientific(0.1 + 0.2), "0.3");
/// assert_eq!(scientific(5.0), "5");
/// assert_eq!(scientific(1.5e-7), "1.5·10⁻⁷");
/// assert_eq!(scientific(-2.5e9), "-2.5·10⁹");
/// assert_eq!(scientific(0.0), "0");
/// ```
#[must_use]
pub fn scientific(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return format!("{x}");
    }
    let magnitude = x.abs();
    if (0.1..1e6).contains(&magnitude) {
        return format!("{}", round_significant(x));
    }
    let Ok(mut exponent) = f64_to_i32_checked(magnitude.log10().floor(), ()) else {
        return format!("{x}");
    };
    let mut mantissa = round_significant(x / 10_f64.powi(exponent));
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    format!("{mantissa}·10{}", superscript_power(exponent))
}
