use std::collections::{HashMap, HashSet};

use crate::{ast::Expression, error::EvalError};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Session switches read by the parser, evaluator and console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Print each parsed expression before evaluating it.
    pub debug: bool,
    /// Show exact results as fractions.
    pub frac:  bool,
    /// Let a line starting with an operator continue the previous result.
    pub cont:  bool,
}

impl Default for Features {
    fn default() -> Self {
        Self { debug: false,
               frac:  false,
               cont:  true, }
    }
}

/// Stores the session state the core reads from.
///
/// The evaluator never modifies the context. The console appends results to
/// `outputs` and binds `variables` after a line has been evaluated
/// successfully.
///
/// ## Usage
///
/// `Context` is created once per session and passed by reference to
/// [`parse_input`](crate::interpreter::parser::core::parse_input) and
/// [`Expression::evaluate`].
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Results of previous lines, referred to as `[1]`, `[2]`, ...
    pub outputs:   Vec<Expression>,
    /// Variable bindings. Values may still be symbolic.
    pub variables: HashMap<String, Expression>,
    /// Session switches.
    pub features:  Features,
}

impl Context {
    /// Creates an empty context with default features.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates an expression as far as the bound variables allow.
    ///
    /// The evaluator dispatches on the expression variant. Values evaluate to
    /// themselves; chains, powers and negations are folded; variables and
    /// output references are resolved through the context.
    ///
    /// # Parameters
    /// - `expression`: Expression to evaluate.
    /// - `active`: Names of the variables currently being resolved. A
    ///   variable in this set is left symbolic, which stops self-referential
    ///   definitions.
    ///
    /// # Returns
    /// A value, or a residual expression if some variables are unbound.
    pub fn eval(&self, expression: &Expression, active: &mut HashSet<String>) -> EvalResult<Expression> {
        match expression {
            Expression::Value(_) => Ok(expression.clone()),
            Expression::Variable(name) => self.eval_variable(name, active),
            Expression::Output(index) => self.eval_output(*index, active),
            Expression::Chain(chain) => self.eval_chain(chain, active),
            Expression::Power(operands) => self.eval_power(expression, operands, active),
            Expression::Negate(inner) => self.eval_negate(inner, active),
        }
    }

    fn eval_variable(&self, name: &str, active: &mut HashSet<String>) -> EvalResult<Expression> {
        let unresolved = || Expression::Variable(name.to_string());
        if active.contains(name) {
            return Ok(unresolved());
        }
        let Some(bound) = self.variables.get(name) else {
            return Ok(unresolved());
        };
        active.insert(name.to_string());
        let result = self.eval(bound, active);
        active.remove(name);
        result
    }

    fn eval_output(&self, index: usize, active: &mut HashSet<String>) -> EvalResult<Expression> {
        match index.checked_sub(1).and_then(|i| self.outputs.get(i)) {
            Some(stored) => self.eval(stored, active),
            None => Ok(Expression::Output(index)),
        }
    }
}

impl Expression {
    /// Evaluates the expression in `context`.
    ///
    /// ## Example
    /// ```
    /// use physcalc::interpreter::{evaluator::core::Context, parser::core::parse_input};
    ///
    /// let context = Context::new();
    /// let parsed = parse_input("x + 3 m + 2 m", &context).unwrap();
    /// let result = parsed.expression.evaluate(&context).unwrap();
    /// assert!(result.as_value().is_none());
    /// assert_eq!(result.to_string(), "5 m + x");
    /// ```
    pub fn evaluate(&self, context: &Context) -> EvalResult<Self> {
        let result = context.eval(self, &mut HashSet::new())?;
        if result.as_value().is_none() {
            tracing::trace!(residual = %result, "expression left partially evaluated");
        }
        Ok(result)
    }
}
