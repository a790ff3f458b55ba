use std::iter::Peekable;

use crate::{
    ast::{Expression, Tier},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_primary},
    },
};

/// Parses a chain of operators of one tier.
///
/// Operands are parsed at the next tighter tier, so `a + b * c` yields an add
/// chain whose second operand is a multiply chain. A looser operator ends the
/// chain and is left for the caller.
///
/// Grammar: `tier := next_tier (operator_of_tier next_tier)*`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `leading`: Substitute for the first primary, used to continue the
///   previous result.
/// - `tier`: The tier of this chain.
/// - `allow_paren`: Whether a `)` may end the chain, i.e. whether we are
///   inside parentheses.
/// - `consume_paren`: Whether this level owns the `(` and must consume the
///   matching `)`.
///
/// # Returns
/// A chain or power tower, or the single operand if there are no operators.
///
/// # Errors
/// - `ParseError::UnmatchedParen` for a `)` outside parentheses.
/// - `ParseError::MissingClosingParen` if the input ends inside
///   parentheses.
/// - `ParseError::ExpectedOperator` if two operands are adjacent.
pub fn parse_tier<'a, I>(tokens: &mut Peekable<I>,
                         leading: &mut Option<Expression>,
                         tier: Tier,
                         allow_paren: bool,
                         consume_paren: bool)
                         -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut operands = vec![parse_operand(tokens, leading, tier, allow_paren)?];
    let mut operators = Vec::new();
    let mut closed = false;

    while let Some(token) = tokens.peek() {
        match token {
            Token::RParen => {
                if !allow_paren {
                    return Err(ParseError::UnmatchedParen);
                }
                if consume_paren {
                    tokens.next();
                }
                closed = true;
                break;
            },
            Token::Operator(op) => {
                if op.tier() < tier {
                    break;
                }
                operators.push(*op);
                tokens.next();
                operands.push(parse_operand(tokens, leading, tier, allow_paren)?);
            },
            other => return Err(ParseError::ExpectedOperator { found: other.describe() }),
        }
    }
    if consume_paren && !closed {
        return Err(ParseError::MissingClosingParen);
    }

    Ok(match tier {
        Tier::Power => Expression::power(operands),
        Tier::Add | Tier::Multiply => Expression::chain(operands, operators),
    })
}

fn parse_operand<'a, I>(tokens: &mut Peekable<I>,
                        leading: &mut Option<Expression>,
                        tier: Tier,
                        allow_paren: bool)
                        -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tier.next() {
        Some(next) => parse_tier(tokens, leading, next, allow_paren, false),
        None => parse_primary(tokens, leading),
    }
}
