/// Entry point of the parser.
///
/// Splits off assignment targets and the display cast, handles continuation
/// of the previous result and starts the tier recursion.
pub mod core;

/// Prefix minus and atomic operands.
///
/// Handles values, variables, output references and parenthesized
/// subexpressions.
pub mod unary;

/// Operator chains.
///
/// Parses chains of same-tier operators by descending from addition through
/// multiplication to powers.
pub mod binary;
