use crate::{
    error::ParseError,
    interpreter::{parser::core::ParseResult, value::number::Number},
    units::{catalog::catalog, core::Unit, dimension::Dimension, prefix::PREFIXES},
    util::superscript::split_power,
};

impl Unit {
    /// Parses a unit specification into a multiplier and an SI unit.
    ///
    /// The text is `<terms>[/<terms>]`, where terms are separated by
    /// whitespace and each term is an optionally prefixed unit name with an
    /// optional integer power written as `^n` or in superscript digits. A
    /// half consisting of just `1` stands for no unit.
    ///
    /// # Errors
    /// - `ParseError::UnknownUnit` if a term is not a known unit, with or
    ///   without a prefix.
    /// - `ParseError::InvalidPower` if a power is not an integer.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{interpreter::value::number::Number, units::Unit};
    ///
    /// let (mul, unit) = Unit::parse("km/h").unwrap();
    /// assert_eq!(mul, Number::ratio(5, 18));
    /// assert_eq!(unit.to_string(), "m / s");
    ///
    /// let (mul, unit) = Unit::parse("1/ms").unwrap();
    /// assert_eq!(mul, Number::from(1000));
    /// assert_eq!(unit.to_string(), "Hz");
    ///
    /// assert!(Unit::parse("m^1.5").is_err());
    /// assert!(Unit::parse("furlong").is_err());
    /// ```
    pub fn parse(text: &str) -> ParseResult<(Number, Self)> {
        let (numerator, denominator) = text.split_once('/').unwrap_or((text, ""));
        let (num_mul, num_dim) = parse_half(numerator)?;
        let (den_mul, den_dim) = parse_half(denominator)?;

        let invalid = || ParseError::InvalidPower { power: text.trim().to_string() };
        let dimension = num_dim.divide(den_dim).ok_or_else(invalid)?;
        let multiplier = num_mul.checked_div(&den_mul).map_err(|_| invalid())?;
        Ok((multiplier, Self::si(dimension)))
    }
}

fn parse_half(text: &str) -> ParseResult<(Number, Dimension)> {
    let terms: Vec<&str> = text.split_whitespace().collect();
    let mut multiplier = Number::one();
    let mut dimension = Dimension::NONE;
    if terms == ["1"] {
        return Ok((multiplier, dimension));
    }

    for term in terms {
        let (name, power_text) = split_power(term);
        let power = match power_text {
            Some(p) => p.parse::<i32>()
                        .map_err(|_| ParseError::InvalidPower { power: p.clone() })?,
            None => 1,
        };
        let invalid = || ParseError::InvalidPower { power: power.to_string() };

        let (factor, base) = lookup_term(name)?;
        let powered = base.powi(power).ok_or_else(invalid)?;
        dimension = dimension.multiply(powered).ok_or_else(invalid)?;
        multiplier = &multiplier * &factor.pow(&Number::from(i64::from(power)))
                                          .map_err(|_| invalid())?;
    }
    Ok((multiplier, dimension))
}

/// Resolves one unit name, trying the name as written before any prefix.
fn lookup_term(name: &str) -> ParseResult<(Number, Dimension)> {
    let catalog = catalog();
    if let Some(entry) = catalog.lookup(name) {
        return Ok((entry.unit.multiplier().clone(), entry.unit.dimension()));
    }
    for prefix in PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix.symbol)
           && let Some(entry) = catalog.lookup(rest)
           && entry.allows_prefix(prefix.symbol)
        {
            return Ok((&prefix.factor() * entry.unit.multiplier(), entry.unit.dimension()));
        }
    }
    Err(ParseError::UnknownUnit { name: name.to_string() })
}

/// A request to display a result in a specific unit, written after `->`,
/// `→` or `as`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCast {
    /// The unit as written; used as the displayed unit name.
    pub text:       String,
    /// Factor from the requested unit to SI.
    pub multiplier: Number,
    /// SI unit of the requested unit's dimension.
    pub unit:       Unit,
}

impl UnitCast {
    /// Parses the unit specification of a cast.
    ///
    /// # Errors
    /// Any error from [`Unit::parse`].
    ///
    /// ## Example
    /// ```
    /// use physcalc::units::UnitCast;
    ///
    /// let cast = UnitCast::parse(" km/h ").unwrap();
    /// assert_eq!(cast.text, "km/h");
    /// ```
    pub fn parse(text: &str) -> ParseResult<Self> {
        let text = text.trim();
        let (multiplier, unit) = Unit::parse(text)?;
        Ok(Self { text: text.to_string(),
                  multiplier,
                  unit })
    }
}
