use std::collections::HashSet;

use crate::{
    ast::{Expression, Operator, OperatorChain},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates an operator chain, folding every operand that resolves.
    ///
    /// Resolved operands are folded left to right into one accumulator,
    /// seeded with the identity of the first operator that applies. The
    /// leading operand takes the chain's positive operator. Unresolved
    /// operands keep their operators and their relative order.
    ///
    /// # Returns
    /// - The folded value if every operand resolves.
    /// - The unresolved operands alone if none do.
    /// - Otherwise a chain led by the folded value, followed by the
    ///   unresolved operands.
    ///
    /// # Example
    /// ```
    /// use physcalc::interpreter::{evaluator::core::Context, parser::core::parse_input};
    ///
    /// let context = Context::new();
    /// let eval = |text| {
    ///     let parsed = parse_input(text, &context).unwrap();
    ///     parsed.expression.evaluate(&context).unwrap().to_string()
    /// };
    /// assert_eq!(eval("5 - (2 + 3)"), "0");
    /// assert_eq!(eval("2 * x * 3 / y"), "6 * x / y");
    /// assert_eq!(eval("a - b"), "a - b");
    /// ```
    pub(crate) fn eval_chain(&self,
                             chain: &OperatorChain,
                             active: &mut HashSet<String>)
                             -> EvalResult<Expression> {
        let leading = chain.operators.first().map_or(Operator::Add, |op| op.positive());
        let operators = std::iter::once(leading).chain(chain.operators.iter().copied());

        let mut accumulator: Option<Value> = None;
        let mut residual: Vec<(Operator, Expression)> = Vec::new();
        for (op, operand) in operators.zip(&chain.operands) {
            match self.eval(operand, active)? {
                Expression::Value(value) => {
                    let seed = accumulator.take().unwrap_or_else(|| op.identity(&value));
                    accumulator = Some(op.apply(&seed, &value)?);
                },
                other => residual.push((op, other)),
            }
        }

        match accumulator {
            Some(value) if residual.is_empty() => Ok(Expression::Value(value)),
            Some(value) => {
                let (operators, operands): (Vec<_>, Vec<_>) = residual.into_iter().unzip();
                let operands = std::iter::once(Expression::Value(value)).chain(operands).collect();
                Ok(Expression::chain(operands, operators))
            },
            None => {
                let (operators, operands): (Vec<_>, Vec<_>) = residual.into_iter().unzip();
                Ok(Expression::chain(operands, operators[1..].to_vec()))
            },
        }
    }
}
