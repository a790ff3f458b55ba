use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// No token matches the input at this position.
    #[error("invalid syntax at '{text}'")]
    UnknownToken {
        /// The start of the unmatched input.
        text: String,
    },
    /// A `\x` escape names a letter with no Greek counterpart.
    #[error("unknown escape \\{escape}")]
    UnknownEscape {
        /// The escaped character.
        escape: char,
    },
    /// A unit name is not in the catalog, with or without a prefix.
    #[error("unknown unit {name}")]
    UnknownUnit {
        /// The unit term as written.
        name: String,
    },
    /// A unit power is not an integer.
    #[error("invalid power {power}")]
    InvalidPower {
        /// The power text as written.
        power: String,
    },
    /// A numeric literal could not be read.
    #[error("invalid number {text}")]
    InvalidNumber {
        /// The literal text.
        text: String,
    },
    /// A `)` appeared without a matching `(`.
    #[error("unmatched parenthesis")]
    UnmatchedParen,
    /// A `(` was never closed.
    #[error("missing closing parenthesis")]
    MissingClosingParen,
    /// The target of `:=` is not a variable.
    #[error("cannot assign to {target}")]
    InvalidAssignment {
        /// Description of the offending token.
        target: String,
    },
    /// The line ended where a value was required.
    #[error("missing value at end of line")]
    MissingValueAtEnd,
    /// The line starts with a binary operator and no previous result can be
    /// continued.
    #[error("missing value before {token}")]
    MissingValue {
        /// Description of the leading operator.
        token: String,
    },
    /// A token other than a value appeared where a value was required.
    #[error("found {found} when expecting a value")]
    ExpectedValue {
        /// Description of the token found.
        found: String,
    },
    /// A token other than an operator appeared between two values.
    #[error("found {found} when expecting an operator")]
    ExpectedOperator {
        /// Description of the token found.
        found: String,
    },
    /// An output reference points past the history.
    #[error("no such result [{index}]")]
    NoSuchOutput {
        /// The 1-based index as written.
        index: usize,
    },
    /// A unit cast was followed by more input.
    #[error("found {found} after unit cast")]
    TrailingAfterCast {
        /// Description of the token following the cast.
        found: String,
    },
    /// A cast marker was not followed by a unit.
    #[error("missing unit after {marker}")]
    MissingCastUnit {
        /// The cast marker as written.
        marker: String,
    },
}

/// The lexer reports unmatched input through the default error; the
/// offending text is filled in by the tokenizer.
impl Default for ParseError {
    fn default() -> Self {
        Self::UnknownToken { text: String::new() }
    }
}
