use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_F64_INT: f64 = 9_007_199_254_740_991.0;

/// Safely converts an `f64` to `i32` if the value is finite, integral and
/// within range.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, fractional or out-of-range values.
///
/// ## Example
/// ```
/// use physcalc::util::num::f64_to_i32_checked;
///
/// assert_eq!(f64_to_i32_checked(3.0, "bad"), Ok(3));
/// assert_eq!(f64_to_i32_checked(0.5, "bad"), Err("bad"));
/// assert_eq!(f64_to_i32_checked(f64::NAN, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked<E>(value: f64, error: E) -> Result<i32, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(error);
    }
    Ok(value as i32)
}

/// Safely converts a `BigInt` to `i32`.
///
/// ## Errors
/// Returns `Err(error)` if the value does not fit.
pub fn bigint_to_i32_checked<E>(value: &BigInt, error: E) -> Result<i32, E> {
    value.to_i32().ok_or(error)
}

/// Returns `true` if `value` is an integral `f64` small enough to be
/// represented exactly by an integer.
#[must_use]
pub fn is_safe_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_F64_INT
}
