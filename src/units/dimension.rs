use std::fmt;

use crate::util::superscript::superscript_power;

/// One of the seven independent physical dimensions.
///
/// The declaration order is the canonical order of terms in generated unit
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseDimension {
    /// Mass, in kilograms.
    Mass,
    /// Length, in meters.
    Length,
    /// Time, in seconds.
    Time,
    /// Electric current, in amperes.
    Current,
    /// Thermodynamic temperature, in kelvin.
    Temperature,
    /// Amount of substance, in moles.
    Amount,
    /// Luminous intensity, in candelas.
    Luminous,
}

impl BaseDimension {
    /// Every base dimension, in canonical order.
    pub const ALL: [Self; 7] = [Self::Mass,
                                Self::Length,
                                Self::Time,
                                Self::Current,
                                Self::Temperature,
                                Self::Amount,
                                Self::Luminous];

    /// The symbol of the SI base unit for this dimension.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Mass => "kg",
            Self::Length => "m",
            Self::Time => "s",
            Self::Current => "A",
            Self::Temperature => "K",
            Self::Amount => "mol",
            Self::Luminous => "cd",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Exponents of the base dimensions of a unit.
///
/// `kg m / s²` is `{Mass: 1, Length: 1, Time: -2}`. Numerator and denominator
/// are never stored separately, so a dimension is always fully cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    exponents: [i32; 7],
}

impl Dimension {
    /// The dimension of pure numbers.
    pub const NONE: Self = Self { exponents: [0; 7] };

    /// The dimension of a single base unit.
    #[must_use]
    pub const fn base(base: BaseDimension) -> Self {
        let mut exponents = [0; 7];
        exponents[base.index()] = 1;
        Self { exponents }
    }

    /// Builds a dimension from numerator and denominator lists, cancelling
    /// shared elements.
    ///
    /// ## Example
    /// ```
    /// use physcalc::units::{BaseDimension::*, Dimension};
    ///
    /// let d = Dimension::from_parts(&[Mass, Length, Time], &[Time, Time, Time]);
    /// assert_eq!(d.exponent(Time), -2);
    /// assert_eq!(d.exponent(Length), 1);
    /// ```
    #[must_use]
    pub fn from_parts(numerator: &[BaseDimension], denominator: &[BaseDimension]) -> Self {
        let mut exponents = [0; 7];
        for base in numerator {
            exponents[base.index()] += 1;
        }
        for base in denominator {
            exponents[base.index()] -= 1;
        }
        Self { exponents }
    }

    /// The exponent of `base` in this dimension.
    #[must_use]
    pub const fn exponent(&self, base: BaseDimension) -> i32 {
        self.exponents[base.index()]
    }

    /// Returns `true` for the dimension of pure numbers.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Non-zero terms in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (BaseDimension, i32)> + '_ {
        BaseDimension::ALL.into_iter()
                          .map(|b| (b, self.exponent(b)))
                          .filter(|&(_, e)| e != 0)
    }

    /// The largest absolute exponent.
    #[must_use]
    pub fn max_power(&self) -> i32 {
        self.exponents.iter().map(|e| e.abs()).max().unwrap_or(0)
    }

    fn zip_with<F>(self, other: Self, f: F) -> Option<Self>
        where F: Fn(i32, i32) -> Option<i32>
    {
        let mut exponents = [0; 7];
        for (i, slot) in exponents.iter_mut().enumerate() {
            *slot = f(self.exponents[i], other.exponents[i])?;
        }
        Some(Self { exponents })
    }

    /// Dimension of a product. `None` on exponent overflow.
    #[must_use]
    pub fn multiply(self, other: Self) -> Option<Self> {
        self.zip_with(other, i32::checked_add)
    }

    /// Dimension of a quotient. `None` on exponent overflow.
    #[must_use]
    pub fn divide(self, other: Self) -> Option<Self> {
        self.zip_with(other, i32::checked_sub)
    }

    /// Raises every exponent to an integer power. `None` on overflow.
    #[must_use]
    pub fn powi(self, power: i32) -> Option<Self> {
        self.zip_with(Self::NONE, |e, _| e.checked_mul(power))
    }

    /// Takes the `q`-th root, or `None` if some exponent is not divisible by
    /// `q`.
    ///
    /// ## Example
    /// ```
    /// use physcalc::units::{BaseDimension::Length, Dimension};
    ///
    /// let area = Dimension::base(Length).powi(2).unwrap();
    /// assert_eq!(area.root(2), Some(Dimension::base(Length)));
    /// assert_eq!(Dimension::base(Length).root(2), None);
    /// ```
    #[must_use]
    pub fn root(self, q: i32) -> Option<Self> {
        if q == 0 {
            return None;
        }
        self.zip_with(Self::NONE, |e, _| (e % q == 0).then(|| e / q))
    }

    /// Renders the dimension from base unit symbols, e.g. `kg m² / s²`.
    ///
    /// A dimension with only negative exponents renders as `1 / s`; the
    /// dimension of pure numbers renders as the empty string.
    #[must_use]
    pub fn base_name(&self) -> String {
        let numerator = self.half_name(1);
        let denominator = self.half_name(-1);
        match (numerator.is_empty(), denominator.is_empty()) {
            (true, true) => String::new(),
            (false, true) => numerator,
            (true, false) => format!("1 / {denominator}"),
            (false, false) => format!("{numerator} / {denominator}"),
        }
    }

    fn half_name(&self, sign: i32) -> String {
        self.terms()
            .filter(|&(_, e)| e.signum() == sign)
            .map(|(b, e)| format!("{}{}", b.symbol(), superscript_power(e.abs())))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_name())
    }
}
