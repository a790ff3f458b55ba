use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation and display.
pub enum EvalError {
    /// Tried to add or subtract values of different units.
    #[error("unit mismatch: cannot {operation} {left} and {right}")]
    UnitMismatch {
        /// `add` or `subtract`.
        operation: &'static str,
        /// Unit of the left operand.
        left:      String,
        /// Unit of the right operand.
        right:     String,
    },
    /// The exponent of a power carries a unit.
    #[error("cannot raise to power with unit {unit}")]
    DimensionedExponent {
        /// Unit of the exponent.
        unit: String,
    },
    /// A unit was raised to an irrational or otherwise non-rational power.
    #[error("cannot raise {unit} to non-rational power {power}")]
    NonRationalPower {
        /// The unit being raised.
        unit:  String,
        /// The exponent as displayed.
        power: String,
    },
    /// A unit was raised to a fractional power that does not divide every
    /// dimension.
    #[error("cannot raise {unit} to power {power}: dimensions not divisible")]
    IndivisiblePower {
        /// The unit being raised.
        unit:  String,
        /// The exponent as displayed.
        power: String,
    },
    /// A display cast names a unit of a different dimension.
    #[error("cannot display {from} as {to}")]
    IncompatibleCast {
        /// Unit of the value.
        from: String,
        /// The requested unit.
        to:   String,
    },
    /// Attempted division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A negative base was raised to a fractional power.
    #[error("raising {base} to power {power} has no real result")]
    ComplexResult {
        /// The base as displayed.
        base:  String,
        /// The exponent as displayed.
        power: String,
    },
    /// A dimension exponent or numeric result overflowed.
    #[error("numeric overflow")]
    Overflow,
}
