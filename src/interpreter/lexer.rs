use logos::{Lexer, Logos};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    ast::Operator,
    error::ParseError,
    interpreter::{
        evaluator::core::Context,
        parser::core::ParseResult,
        value::{core::Value, number::Number},
    },
    units::{Unit, UnitCast},
};

const LATIN_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Greek letters by position in [`LATIN_ALPHABET`]; `-` marks letters without
/// a counterpart.
pub const GREEK_ALPHABET: &str = "αβγδεφγχιηκλμνωπψρστυθ-ξ-ζΑΒΓΔΕΦΓΧΙΗΚΛΜΝΩΠΨΡΣΤΥΘ-Ξ-Ζ";

/// One unit name with an optional power, e.g. `m^2`, `s⁻¹` or `kg`.
const UNIT_POWER: &str = r"[A-Za-z\x{0370}-\x{03FF}]+(?:\^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)|\x{207B}?[\x{00B2}\x{00B3}\x{00B9}\x{2070}\x{2074}-\x{2079}]+)?";

/// A unit specification at the start of the remaining input, including the
/// whitespace before it.
static UNIT_SPEC: Lazy<Regex> = Lazy::new(|| {
    let powers = format!(r"{UNIT_POWER}(?:\s+{UNIT_POWER})*");
    Regex::new(&format!(r"^\s*(?:{powers})(?:\s*/\s*(?:{powers}))?")).expect("unit spec pattern")
});

static UNIT_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z\x{0370}-\x{03FF}]+").expect("unit term pattern"));

/// Represents a lexical token of an input line.
///
/// Literals, output references and casts are resolved while lexing, so a
/// token already carries the value, index or unit it denotes.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = ParseError)]
#[logos(skip r"\s+")]
pub enum Token {
    /// A display cast such as `-> km/h`, `→ J` or `as eV`.
    #[token("->", cast)]
    #[token("→", cast)]
    #[token("as", cast)]
    Cast(UnitCast),
    /// A reference to a previous result, such as `[2]`.
    #[regex(r"\[[0-9]+\]", |lex| {
        let text = lex.slice();
        text[1..text.len() - 1].parse::<usize>().ok()
    })]
    Output(usize),
    /// A binary operator. `-` doubles as the prefix minus.
    #[token("**", |_| Operator::Power)]
    #[token("^", |_| Operator::Power)]
    #[token("+", |_| Operator::Add)]
    #[token("-", |_| Operator::Subtract)]
    #[token("*", |_| Operator::Multiply)]
    #[token("·", |_| Operator::Multiply)]
    #[token("×", |_| Operator::Multiply)]
    #[token("/", |_| Operator::Divide)]
    #[token("÷", |_| Operator::Divide)]
    Operator(Operator),
    /// A variable name with an optional subscript, such as `x` or `m_e`.
    #[regex(r"[A-Za-z\x{0370}-\x{03FF}]+(_[A-Za-z0-9\x{0370}-\x{03FF}]+)?",
            |lex| lex.slice().to_string())]
    Variable(String),
    /// A number with an optional unit, such as `5`, `1/3`, `2.5 km/h`.
    #[regex(r"[0-9]+(/[0-9]+|\.[0-9]*)?|\.[0-9]+", literal)]
    Value(Value),
    /// `:=`
    #[token(":=")]
    Assign,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
}

impl Token {
    /// Describes the token for error messages, e.g. `operator +`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Cast(cast) => format!("unit cast {}", cast.text),
            Self::Output(index) => format!("output ref [{index}]"),
            Self::Operator(op) => format!("operator {op}"),
            Self::Variable(name) => format!("variable {name}"),
            Self::Value(value) => format!("value {value}"),
            Self::Assign => "assignment".to_string(),
            Self::Equals => "equals".to_string(),
            Self::LParen => "left paren".to_string(),
            Self::RParen => "right paren".to_string(),
        }
    }
}

/// Reads the unit suffix of a literal, if any, and advances past it.
///
/// A term `as` ends the suffix, so `5 m as km` lexes as a value followed by a
/// cast.
fn unit_suffix(lex: &mut Lexer<Token>) -> Option<String> {
    let found = UNIT_SPEC.find(lex.remainder())?;
    let mut text = found.as_str();
    if let Some(cut) = UNIT_TERM.find_iter(text).find(|term| term.as_str() == "as") {
        text = text[..cut.start()].trim_end();
        text = text.strip_suffix('/').map_or(text, str::trim_end);
    }
    if text.trim().is_empty() {
        return None;
    }
    lex.bump(text.len());
    Some(text.trim().to_string())
}

fn literal(lex: &mut Lexer<Token>) -> Result<Value, ParseError> {
    let number_text = lex.slice().to_string();
    let number = Number::parse_literal(&number_text)
                 .ok_or(ParseError::InvalidNumber { text: number_text })?;
    match unit_suffix(lex) {
        Some(spec) => {
            let (multiplier, unit) = Unit::parse(&spec)?;
            Ok(Value::new(&number * &multiplier, &unit))
        },
        None => Ok(Value::from(number)),
    }
}

fn cast(lex: &mut Lexer<Token>) -> Result<UnitCast, ParseError> {
    let marker = lex.slice().to_string();
    let Some(found) = UNIT_SPEC.find(lex.remainder()) else {
        return Err(ParseError::MissingCastUnit { marker });
    };
    let text = found.as_str().to_string();
    lex.bump(text.len());
    UnitCast::parse(&text)
}

/// Expands `\x` Greek escapes and normalizes the micro sign to Greek mu.
///
/// # Errors
/// - `ParseError::UnknownEscape` if the escaped letter has no Greek
///   counterpart.
///
/// ## Example
/// ```
/// use physcalc::interpreter::lexer::expand_escapes;
///
/// assert_eq!(expand_escapes(r"\p r^2").unwrap(), "π r^2");
/// assert_eq!(expand_escapes("5 µs").unwrap(), "5 μs");
/// assert!(expand_escapes(r"\w").is_err());
/// ```
pub fn expand_escapes(text: &str) -> ParseResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\u{00B5}' => out.push('μ'),
            '\\' => {
                let Some(escape) = chars.next() else {
                    return Err(ParseError::UnknownToken { text: "\\".to_string() });
                };
                out.push(greek_letter(escape)?);
            },
            other => out.push(other),
        }
    }
    Ok(out)
}

fn greek_letter(latin: char) -> ParseResult<char> {
    LATIN_ALPHABET.chars()
                  .position(|c| c == latin)
                  .and_then(|index| GREEK_ALPHABET.chars().nth(index))
                  .filter(|&greek| greek != '-')
                  .ok_or(ParseError::UnknownEscape { escape: latin })
}

/// Tokenizes an input line.
///
/// Escapes are expanded first. Output references are checked against the
/// results stored in `context`.
///
/// # Errors
/// - `ParseError::UnknownToken` if no token matches, naming the input from
///   that point.
/// - `ParseError::NoSuchOutput` for a reference past the stored results.
/// - Any error from escapes, numeric literals or unit specifications.
///
/// ## Example
/// ```
/// use physcalc::interpreter::{evaluator::core::Context, lexer::{Token, tokenize}};
///
/// let context = Context::new();
/// let tokens = tokenize("x_1 := 2 km", &context).unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0], Token::Variable("x_1".into()));
/// assert_eq!(tokens[1], Token::Assign);
///
/// assert!(tokenize("[1]", &context).is_err());
/// assert!(tokenize("2 $", &context).is_err());
/// ```
pub fn tokenize(text: &str, context: &Context) -> ParseResult<Vec<Token>> {
    let text = expand_escapes(text)?;
    let mut lexer = Token::lexer(&text);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Output(index)) if index == 0 || index > context.outputs.len() => {
                return Err(ParseError::NoSuchOutput { index });
            },
            Ok(token) => tokens.push(token),
            Err(ParseError::UnknownToken { text: found }) if found.is_empty() => {
                let rest: String = text[lexer.span().start..].chars().take(10).collect();
                return Err(ParseError::UnknownToken { text: rest });
            },
            Err(e) => return Err(e),
        }
    }
    Ok(tokens)
}
