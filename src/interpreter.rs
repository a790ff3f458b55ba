/// The evaluator module folds expression trees into values.
///
/// The evaluator traverses an expression, resolves variables and previous
/// results through the context and computes whatever can be computed. Parts
/// that depend on unbound variables are returned as a residual expression.
///
/// # Responsibilities
/// - Folds operator chains and power towers over values.
/// - Resolves variables without looping on self-references.
/// - Reports errors such as unit mismatches or invalid powers.
pub mod evaluator;
/// The lexer module tokenizes input lines.
///
/// The lexer expands Greek escapes, then reads numbers with their units,
/// variables, operators, output references and display casts.
///
/// # Responsibilities
/// - Converts an input line into tokens.
/// - Resolves literal units and cast units while lexing.
/// - Reports invalid input and unknown units.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// The parser descends through the operator tiers and builds flattened
/// chains, leaving assignment targets and a display cast aside.
///
/// # Responsibilities
/// - Converts tokens into expressions.
/// - Validates parentheses, operands and assignment targets.
pub mod parser;
/// The value module defines computed quantities.
///
/// A value is an exact or real magnitude together with an SI unit. This
/// module implements arithmetic on values and their formatting.
///
/// # Responsibilities
/// - Defines `Number` and `Value`.
/// - Implements arithmetic with unit checks.
/// - Chooses unit names and prefixes for display.
pub mod value;
