use std::collections::HashSet;

use crate::{
    ast::Expression,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Evaluates a negation.
    ///
    /// A resolved operand is negated directly. A symbolic result goes through
    /// [`Expression::negate`], so `-(-x)` comes back as `x` and `-(a + b)` as
    /// `-a - b` instead of gaining another wrapper.
    pub(crate) fn eval_negate(&self,
                              operand: &Expression,
                              active: &mut HashSet<String>)
                              -> EvalResult<Expression> {
        Ok(self.eval(operand, active)?.negate())
    }
}
