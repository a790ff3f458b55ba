use physcalc::{
    ast::{Expression, Operator, Tier},
    error::ParseError,
    interpreter::{
        evaluator::core::Context,
        lexer::{Token, tokenize},
        parser::core::{ParsedInput, parse_input},
    },
};
use pretty_assertions::assert_eq;

fn parse(text: &str) -> ParsedInput {
    parse_input(text, &Context::new()).unwrap_or_else(|e| panic!("cannot parse '{text}': {e}"))
}

fn parse_error(text: &str) -> ParseError {
    match parse_input(text, &Context::new()) {
        Ok(parsed) => panic!("'{text}' parsed as {}", parsed.expression),
        Err(e) => e,
    }
}

fn describe(text: &str, context: &Context) -> Vec<String> {
    tokenize(text, context).unwrap()
                           .iter()
                           .map(Token::describe)
                           .collect()
}

fn variable(name: &str) -> Expression {
    Expression::Variable(name.to_string())
}

#[test]
fn tokens() {
    let context = Context::new();
    assert_eq!(describe("2 m * x_1 -> km", &context),
               vec!["value 2 m", "operator *", "variable x_1", "unit cast km"]);
    assert_eq!(describe("v := (a ÷ b) ** 2", &context),
               vec!["variable v",
                    "assignment",
                    "left paren",
                    "variable a",
                    "operator /",
                    "variable b",
                    "right paren",
                    "operator ^",
                    "value 2"]);
    assert_eq!(describe("3.5 kg·m", &context),
               vec!["value 3.5 kg", "operator *", "variable m"]);
}

#[test]
fn literals_take_units() {
    let context = Context::new();
    assert_eq!(describe("90 km/h", &context), vec!["value 25 m / s"]);
    assert_eq!(describe("1 h as min", &context), vec!["value 3.6 ks", "unit cast min"]);
    assert_eq!(describe("2 s⁻¹ + .5", &context),
               vec!["value 2 Hz", "operator +", "value 0.5"]);
}

#[test]
fn output_references() {
    let mut context = Context::new();
    assert_eq!(tokenize("[1]", &context), Err(ParseError::NoSuchOutput { index: 1 }));

    context.outputs.push(variable("x"));
    assert_eq!(tokenize("[1]", &context).unwrap(), vec![Token::Output(1)]);
    assert_eq!(tokenize("[0]", &context), Err(ParseError::NoSuchOutput { index: 0 }));
}

#[test]
fn precedence() {
    let Expression::Chain(sum) = parse("1 + 2 * 3").expression else {
        panic!("expected a chain");
    };
    assert_eq!(sum.tier, Tier::Add);
    assert_eq!(sum.operators, vec![Operator::Add]);
    assert!(matches!(&sum.operands[1], Expression::Chain(product) if product.tier == Tier::Multiply));

    let Expression::Power(tower) = parse("2 ^ 3 ^ 2").expression else {
        panic!("expected a power");
    };
    assert_eq!(tower.len(), 3);
}

#[test]
fn chains_are_flat() {
    let Expression::Chain(chain) = parse("a - b + c - d").expression else {
        panic!("expected a chain");
    };
    assert_eq!(chain.operands, vec![variable("a"), variable("b"), variable("c"), variable("d")]);
    assert_eq!(chain.operators,
               vec![Operator::Subtract, Operator::Add, Operator::Subtract]);

    let Expression::Chain(chain) = parse("a - (b - c)").expression else {
        panic!("expected a chain");
    };
    assert_eq!(chain.operands, vec![variable("a"), variable("b"), variable("c")]);
    assert_eq!(chain.operators, vec![Operator::Subtract, Operator::Add]);

    let Expression::Chain(chain) = parse("(a / b) / (c * d)").expression else {
        panic!("expected a chain");
    };
    assert_eq!(chain.operators,
               vec![Operator::Divide, Operator::Divide, Operator::Divide]);
}

#[test]
fn negation_is_normalized() {
    assert_eq!(parse("-x").expression,
               Expression::Negate(Box::new(variable("x"))));
    assert_eq!(parse("--x").expression, variable("x"));
    assert_eq!(parse("-3").expression.to_string(), "-3");
    assert!(matches!(parse("-3").expression, Expression::Value(_)));
}

#[test]
fn rendering() {
    for (input, rendered) in [("1 + 2 * 3", "1 + 2 * 3"),
                              ("(1 + 2) * 3", "(1 + 2) * 3"),
                              ("(a + b) + c", "a + b + c"),
                              ("2 ^ 3 ^ 2", "2 ^ 3 ^ 2"),
                              ("(2 ^ 3) ^ 2", "(2 ^ 3) ^ 2"),
                              ("(a * b) ^ 2", "(a * b) ^ 2"),
                              ("-(a + b)", "-a - b"),
                              ("-(a * b)", "-a * b"),
                              ("-(a ^ 2)", "-(a ^ 2)"),
                              ("a / (b * c)", "a / b / c"),
                              ("a * -b", "-a * b"),
                              ("a - -b", "a + b"),
                              ("1 + 2 m", "1 + 2 m"),
                              ("[1]", "[1]")]
    {
        let mut context = Context::new();
        context.outputs.push(variable("x"));
        let parsed = parse_input(input, &context).unwrap();
        assert_eq!(parsed.expression.to_string(), rendered, "rendering '{input}'");
    }
}

#[test]
fn fractions_render_on_request() {
    let parsed = parse("1/3 m + x");
    assert_eq!(parsed.expression.render(false), "0.333333333333 m + x");
    assert_eq!(parsed.expression.render(true), "1/3 m + x");
}

#[test]
fn assignments_and_casts() {
    let parsed = parse("a := b := 3 km as m");
    assert_eq!(parsed.assignments, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(parsed.cast.map(|c| c.text), Some("m".to_string()));

    let parsed = parse("x");
    assert!(parsed.assignments.is_empty());
    assert!(parsed.cast.is_none());
}

#[test]
fn errors() {
    assert_eq!(parse_error("(1 + 2"), ParseError::MissingClosingParen);
    assert_eq!(parse_error("1 + 2)"), ParseError::UnmatchedParen);
    assert_eq!(parse_error("()"),
               ParseError::ExpectedValue { found: "right paren".to_string() });
    assert_eq!(parse_error("2 +"), ParseError::MissingValueAtEnd);
    assert_eq!(parse_error(""), ParseError::MissingValueAtEnd);
    assert_eq!(parse_error("2 (3)"),
               ParseError::ExpectedOperator { found: "left paren".to_string() });
    assert_eq!(parse_error("/ 2"),
               ParseError::MissingValue { token: "operator /".to_string() });
    assert_eq!(parse_error("x := "), ParseError::MissingValueAtEnd);
    assert_eq!(parse_error("(x) := 2"),
               ParseError::ExpectedOperator { found: "assignment".to_string() });
    assert_eq!(parse_error("2 m -> km -> m"),
               ParseError::TrailingAfterCast { found: "unit cast m".to_string() });
    assert_eq!(parse_error("2 m ->"),
               ParseError::MissingCastUnit { marker: "->".to_string() });
    assert_eq!(parse_error("2 @"), ParseError::UnknownToken { text: "@".to_string() });
}
