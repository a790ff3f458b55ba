use std::iter::Peekable;

use crate::{
    ast::{Expression, Tier},
    error::ParseError,
    interpreter::{
        evaluator::core::Context,
        lexer::{Token, tokenize},
        parser::binary::parse_tier,
    },
    units::UnitCast,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    /// Variables to bind to the result, in the order written.
    pub assignments: Vec<String>,
    /// The expression to evaluate.
    pub expression:  Expression,
    /// The unit requested for display, if any.
    pub cast:        Option<UnitCast>,
}

/// Parses an input line into assignment targets, an expression and an
/// optional display cast.
///
/// Grammar:
/// ```text
///     line       := (variable ":=")* expression cast?
///     expression := add
///     add        := multiply (("+" | "-") multiply)*
///     multiply   := power (("*" | "/") power)*
///     power      := primary ("^" primary)*
///     primary    := "-" primary | value | variable | output | "(" add ")"
/// ```
///
/// A line starting with a binary operator continues the previous result when
/// the `cont` feature is on, so `* 2` after a result means `[n] * 2`.
///
/// # Parameters
/// - `text`: The input line.
/// - `context`: Session context, consulted for output references and
///   features.
///
/// # Returns
/// The parsed line.
///
/// # Errors
/// Any `ParseError`, see its variants.
///
/// ## Example
/// ```
/// use physcalc::interpreter::{evaluator::core::Context, parser::core::parse_input};
///
/// let context = Context::new();
/// let parsed = parse_input("v := 5 - (2 + x) as km", &context).unwrap();
/// assert_eq!(parsed.assignments, vec!["v".to_string()]);
/// assert_eq!(parsed.expression.to_string(), "5 - 2 - x");
/// assert_eq!(parsed.cast.unwrap().text, "km");
///
/// assert!(parse_input("2 := x", &context).is_err());
/// assert!(parse_input("(1 + 2", &context).is_err());
/// assert!(parse_input("* 2", &context).is_err());
/// ```
pub fn parse_input(text: &str, context: &Context) -> ParseResult<ParsedInput> {
    let mut tokens = tokenize(text, context)?;

    let cast = match tokens.iter().position(|t| matches!(t, Token::Cast(_))) {
        Some(index) if index + 1 < tokens.len() => {
            return Err(ParseError::TrailingAfterCast { found: tokens[index + 1].describe() });
        },
        Some(_) => match tokens.pop() {
            Some(Token::Cast(cast)) => Some(cast),
            _ => None,
        },
        None => None,
    };

    let mut tokens = tokens.iter().peekable();
    let assignments = parse_assignments(&mut tokens)?;

    let mut leading = match tokens.peek() {
        Some(Token::Operator(op)) if !op.is_unary_prefix() => {
            if !context.features.cont || context.outputs.is_empty() {
                return Err(ParseError::MissingValue { token: format!("operator {op}") });
            }
            Some(Expression::Output(context.outputs.len()))
        },
        _ => None,
    };

    let expression = parse_tier(&mut tokens, &mut leading, Tier::Add, false, false)?;
    Ok(ParsedInput { assignments,
                     expression,
                     cast })
}

/// Collects leading `name :=` pairs.
///
/// # Errors
/// - `ParseError::InvalidAssignment` if a target is not a variable.
fn parse_assignments<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut assignments = Vec::new();
    loop {
        let mut lookahead = tokens.clone();
        let (Some(target), Some(Token::Assign)) = (lookahead.next(), lookahead.next()) else {
            return Ok(assignments);
        };
        match target {
            Token::Variable(name) => assignments.push(name.clone()),
            other => return Err(ParseError::InvalidAssignment { target: other.describe() }),
        }
        tokens.next();
        tokens.next();
    }
}
