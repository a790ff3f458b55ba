//! # physcalc
//!
//! physcalc is a calculator for physical quantities written in Rust.
//! It parses arithmetic over numbers with SI and customary units, checks and
//! cancels dimensions, keeps exact arithmetic exact, leaves unbound variables
//! symbolic and names results with the shortest fitting unit.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Context, parser::core::parse_input},
};

/// Defines the expression tree.
///
/// This module declares the operators, their tiers and the `Expression` enum
/// built by the parser and folded by the evaluator. Chains of same-tier
/// operators are kept flat and negation is normalized as trees are built.
///
/// # Responsibilities
/// - Defines operators with their inverse and positive forms.
/// - Flattens chains and distributes signs when combining expressions.
/// - Renders expressions with the parentheses they need.
pub mod ast;
/// Interactive driver around the core.
///
/// Owns the session context, dispatches `!` commands, runs scripts and
/// formats results as the REPL prints them.
pub mod console;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while reading or
/// evaluating an input line. Both kinds are recoverable: the console reports
/// them and keeps the session as it was.
///
/// # Responsibilities
/// - Defines `ParseError` and `EvalError` with descriptive messages.
/// - Wraps both in `Error` for callers that handle whole lines.
pub mod error;
/// Orchestrates reading and computing input lines.
///
/// This module ties together lexing, parsing, evaluation and value
/// representation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for parsing and evaluating a line.
pub mod interpreter;
/// Physical units.
///
/// Dimensions as exponent vectors, the built-in unit catalog, the unit
/// specification language and the search for readable unit names.
///
/// # Responsibilities
/// - Composes, cancels and raises dimensions.
/// - Looks up unit names with SI prefixes.
/// - Chooses display names for units that have none.
pub mod units;
/// General utilities for numeric conversion and superscripts.
///
/// # Responsibilities
/// - Safely convert between `f64`, `BigInt` and `i32`.
/// - Read and write superscript powers.
pub mod util;

/// Evaluates a single line in a fresh context and formats the result.
///
/// Unbound variables stay symbolic; a trailing cast such as `as km/h` selects
/// the display unit.
///
/// # Errors
/// Returns an error if the line cannot be parsed or evaluated.
///
/// # Examples
/// ```
/// use physcalc::calculate;
///
/// assert_eq!(calculate("3 m + 2 m").unwrap(), "5 m");
/// assert_eq!(calculate("1 kg m^2 / s^2").unwrap(), "1 J");
/// assert_eq!(calculate("1/3 + 1/3").unwrap(), "0.666666666667");
/// assert_eq!(calculate("90 km/h as m/s").unwrap(), "25 m/s");
///
/// assert!(calculate("3 m + 2 s").is_err());
/// ```
pub fn calculate(line: &str) -> Result<String, Error> {
    let context = Context::new();
    let parsed = parse_input(line, &context)?;
    let result = parsed.expression.evaluate(&context)?;
    match result.as_value() {
        Some(value) => Ok(value.stringify(&context, parsed.cast.as_ref())?),
        None => Ok(result.to_string()),
    }
}
