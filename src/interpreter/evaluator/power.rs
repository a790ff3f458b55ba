use std::collections::HashSet;

use crate::{
    ast::Expression,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Evaluates a power tower from the right.
    ///
    /// `a ^ b ^ c` is `a ^ (b ^ c)`. If any operand stays symbolic the whole
    /// tower is returned as written; powers are never partially folded.
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
    /// assert_eq!(eval("2 ^ 3 ^ 2"), "512");
    /// assert_eq!(eval("x ^ (1 + 1)"), "x ^ (1 + 1)");
    /// ```
    pub(crate) fn eval_power(&self,
                             expression: &Expression,
                             operands: &[Expression],
                             active: &mut HashSet<String>)
                             -> EvalResult<Expression> {
        let mut operands = operands.iter().rev();
        let Some(last) = operands.next() else {
            return Ok(expression.clone());
        };
        let Expression::Value(mut exponent) = self.eval(last, active)? else {
            return Ok(expression.clone());
        };
        for operand in operands {
            let Expression::Value(base) = self.eval(operand, active)? else {
                return Ok(expression.clone());
            };
            exponent = base.power(&exponent)?;
        }
        Ok(Expression::Value(exponent))
    }
}
