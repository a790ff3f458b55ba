use crate::interpreter::value::number::Number;

/// A decimal SI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    /// The prefix as written before a unit name.
    pub symbol:   &'static str,
    /// The power of ten the prefix stands for.
    pub exponent: i32,
}

impl Prefix {
    const fn new(symbol: &'static str, exponent: i32) -> Self {
        Self { symbol, exponent }
    }

    /// The exact factor of this prefix.
    #[must_use]
    pub fn factor(&self) -> Number {
        Number::power_of_ten(self.exponent)
    }

    /// Returns `true` for prefixes that step by a power of 1000 and are used
    /// when choosing a prefix for display.
    #[must_use]
    pub const fn is_display(&self) -> bool {
        self.exponent % 3 == 0 && !matches!(self.symbol.as_bytes(), b"u")
    }
}

/// The empty prefix.
pub const NO_PREFIX: Prefix = Prefix::new("", 0);

/// Every prefix accepted in unit names, in the order they are tried.
///
/// `da` comes first so that it is not read as `d` followed by a unit starting
/// with `a`. `u` is an ASCII spelling of `μ`.
pub const PREFIXES: [Prefix; 21] = [Prefix::new("da", 1),
                                    Prefix::new("h", 2),
                                    Prefix::new("k", 3),
                                    Prefix::new("M", 6),
                                    Prefix::new("G", 9),
                                    Prefix::new("T", 12),
                                    Prefix::new("P", 15),
                                    Prefix::new("E", 18),
                                    Prefix::new("Z", 21),
                                    Prefix::new("Y", 24),
                                    Prefix::new("d", -1),
                                    Prefix::new("c", -2),
                                    Prefix::new("m", -3),
                                    Prefix::new("u", -6),
                                    Prefix::new("μ", -6),
                                    Prefix::new("n", -9),
                                    Prefix::new("p", -12),
                                    Prefix::new("f", -15),
                                    Prefix::new("a", -18),
                                    Prefix::new("z", -21),
                                    Prefix::new("y", -24)];

/// Symbols of every prefix, for units that accept none of them.
pub const ALL_SYMBOLS: &[&str] = &["da", "h", "k", "M", "G", "T", "P", "E", "Z", "Y", "d", "c",
                                   "m", "u", "μ", "n", "p", "f", "a", "z", "y"];

/// The candidates for automatic display: no prefix first, then the powers of
/// 1000.
pub fn display_prefixes() -> impl Iterator<Item = Prefix> {
    std::iter::once(NO_PREFIX).chain(PREFIXES.into_iter().filter(Prefix::is_display))
}
