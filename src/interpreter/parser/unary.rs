use std::iter::Peekable;

use crate::{
    ast::{Expression, Tier},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_tier, core::ParseResult},
    },
};

/// Parses a primary expression.
///
/// Primary expressions are:
/// - values (numbers with optional units)
/// - variables
/// - output references
/// - parenthesized expressions
/// - a prefix `-` applied to another primary
///
/// Prefix minus binds tighter than `^`, so `-2^2` is `(-2)^2`. Negation is
/// normalized right away, see [`Expression::negate`].
///
/// Grammar:
/// ```text
///     primary := "-" primary | value | variable | output | "(" add ")"
/// ```
///
/// # Errors
/// - `ParseError::MissingValueAtEnd` if the input ends.
/// - `ParseError::ExpectedValue` for any other token.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                                   leading: &mut Option<Expression>)
                                   -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(expression) = leading.take() {
        return Ok(expression);
    }
    let Some(token) = tokens.next() else {
        return Err(ParseError::MissingValueAtEnd);
    };
    match token {
        Token::Operator(op) if op.is_unary_prefix() => Ok(parse_primary(tokens, leading)?.negate()),
        Token::LParen => parse_tier(tokens, leading, Tier::Add, true, true),
        Token::Value(value) => Ok(Expression::Value(value.clone())),
        Token::Variable(name) => Ok(Expression::Variable(name.clone())),
        Token::Output(index) => Ok(Expression::Output(*index)),
        other => Err(ParseError::ExpectedValue { found: other.describe() }),
    }
}
