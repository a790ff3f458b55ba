/// Parsing errors.
///
/// Defines all error types that can occur while expanding escapes, lexing and
/// parsing an input line, including unit specifications embedded in
/// literals and casts. Parse errors are detected before any evaluation.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while computing a value:
/// unit mismatches, invalid powers, division by zero and display casts to
/// incompatible units.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
use thiserror::Error;

/// Any error that can be reported for a single input line.
///
/// The console catches this per line and reports it without touching the
/// session state.
#[derive(Debug, Error)]
pub enum Error {
    /// The line could not be parsed.
    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),
    /// The line parsed but could not be evaluated.
    #[error("Error: {0}")]
    Eval(#[from] EvalError),
}
