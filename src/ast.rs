use std::fmt;

use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{core::Value, number::Number},
};

/// Binding strength of an operator. Higher tiers bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// `+` and `-`.
    Add,
    /// `*` and `/`.
    Multiply,
    /// `^`.
    Power,
}

impl Tier {
    /// The next tighter tier, or `None` after `Power`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Add => Some(Self::Multiply),
            Self::Multiply => Some(Self::Power),
            Self::Power => None,
        }
    }
}

/// A binary operator.
///
/// Operators of the same tier come in pairs: each has an inverse (`+`/`-`,
/// `*`/`/`) and a positive form, which is the non-inverting member of its
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`, `·`, `×`)
    Multiply,
    /// Division (`/`, `÷`)
    Divide,
    /// Exponentiation (`^`, `**`)
    Power,
}

impl Operator {
    /// The canonical symbol, used when printing expressions.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }

    /// The tier of the operator.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::Add | Self::Subtract => Tier::Add,
            Self::Multiply | Self::Divide => Tier::Multiply,
            Self::Power => Tier::Power,
        }
    }

    /// The other member of the operator's pair. `^` is its own inverse.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Add => Self::Subtract,
            Self::Subtract => Self::Add,
            Self::Multiply => Self::Divide,
            Self::Divide => Self::Multiply,
            Self::Power => Self::Power,
        }
    }

    /// The non-inverting member of the operator's pair.
    #[must_use]
    pub const fn positive(self) -> Self {
        match self {
            Self::Add | Self::Subtract => Self::Add,
            Self::Multiply | Self::Divide => Self::Multiply,
            Self::Power => Self::Power,
        }
    }

    /// The operator that results from applying `self` to a parenthesized
    /// group joined by `other`.
    ///
    /// `a - (b - c)` is `a - b + c`, so `Subtract.distribute(Subtract)` is
    /// `Add`.
    ///
    /// ## Example
    /// ```
    /// use physcalc::ast::Operator;
    ///
    /// assert_eq!(Operator::Subtract.distribute(Operator::Add), Operator::Subtract);
    /// assert_eq!(Operator::Subtract.distribute(Operator::Subtract), Operator::Add);
    /// assert_eq!(Operator::Multiply.distribute(Operator::Divide), Operator::Divide);
    /// assert_eq!(Operator::Divide.distribute(Operator::Divide), Operator::Multiply);
    /// ```
    #[must_use]
    pub fn distribute(self, other: Self) -> Self {
        if self == other { self.positive() } else { self.positive().inverse() }
    }

    /// Returns `true` if the operator may also appear as a prefix.
    #[must_use]
    pub const fn is_unary_prefix(self) -> bool {
        matches!(self, Self::Subtract)
    }

    /// The neutral seed for folding a chain whose first resolved operand is
    /// `first`: zero of the same unit for sums, dimensionless one for
    /// products.
    #[must_use]
    pub fn identity(self, first: &Value) -> Value {
        match self.tier() {
            Tier::Add => Value::new(Number::zero(), first.unit()),
            Tier::Multiply | Tier::Power => Value::from(Number::one()),
        }
    }

    /// Applies the operator to two values.
    ///
    /// # Errors
    /// Any error of the underlying value operation.
    pub fn apply(self, left: &Value, right: &Value) -> EvalResult<Value> {
        match self {
            Self::Add => left.add(right),
            Self::Subtract => left.subtract(right),
            Self::Multiply => left.multiply(right),
            Self::Divide => left.divide(right),
            Self::Power => left.power(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A flat chain of operands joined by operators of one tier.
///
/// `a - b + c` is one chain with operands `[a, b, c]` and operators
/// `[-, +]`. There is always exactly one more operand than operators.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorChain {
    /// The shared tier of all operators.
    pub tier:      Tier,
    /// The operands, in order.
    pub operands:  Vec<Expression>,
    /// The operators between consecutive operands.
    pub operators: Vec<Operator>,
}

/// An expression tree.
///
/// Trees are immutable; evaluation builds new trees.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal or fully computed value.
    Value(Value),
    /// A reference to a variable by name.
    Variable(String),
    /// A reference to a previous result, by 1-based index.
    Output(usize),
    /// A chain of additions or multiplications.
    Chain(OperatorChain),
    /// A power tower, evaluated from the right.
    Power(Vec<Self>),
    /// Negation of an operand that could not be folded into it.
    Negate(Box<Self>),
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Expression {
    /// Builds a chain of same-tier operators, flattening as it goes.
    ///
    /// - A leading operand that is itself a chain of the same tier is
    ///   extended rather than nested.
    /// - A later same-tier chain (from parentheses) is spliced in, with its
    ///   operators distributed over the joining operator.
    /// - A negated operand in a sum flips the joining operator; in a product
    ///   the negation moves to the leading operand.
    ///
    /// A single operand is returned unchanged.
    ///
    /// # Panics
    /// Panics if `operators` does not have exactly one element fewer than
    /// `operands`, or if the operators are not all of the same tier.
    ///
    /// ## Example
    /// ```
    /// use physcalc::ast::{Expression, Operator};
    ///
    /// let x = || Expression::Variable("x".into());
    /// let y = || Expression::Variable("y".into());
    /// let z = || Expression::Variable("z".into());
    ///
    /// let inner = Expression::chain(vec![y(), z()], vec![Operator::Add]);
    /// let outer = Expression::chain(vec![x(), inner], vec![Operator::Subtract]);
    /// assert_eq!(outer.to_string(), "x - y - z");
    ///
    /// let negated = Expression::Variable("y".into()).negate();
    /// let sum = Expression::chain(vec![x(), negated], vec![Operator::Add]);
    /// assert_eq!(sum.to_string(), "x - y");
    /// ```
    #[must_use]
    pub fn chain(operands: Vec<Self>, operators: Vec<Operator>) -> Self {
        assert_eq!(operands.len(), operators.len() + 1, "chain arity");
        let mut operands = operands.into_iter();
        let Some(first) = operands.next() else {
            unreachable!("a chain has at least one operand");
        };
        let Some(tier) = operators.first().map(|op| op.tier()) else {
            return first;
        };
        assert!(operators.iter().all(|op| op.tier() == tier), "mixed tiers");

        let mut chain = match first {
            Self::Chain(inner) if inner.tier == tier => inner,
            other => OperatorChain { tier,
                                     operands: vec![other],
                                     operators: Vec::new() },
        };
        for (operand, op) in operands.zip(operators) {
            chain.append(op, operand);
        }
        Self::Chain(chain)
    }

    /// Builds a power tower. A single operand is returned unchanged.
    #[must_use]
    pub fn power(mut operands: Vec<Self>) -> Self {
        if operands.len() == 1 {
            return operands.remove(0);
        }
        Self::Power(operands)
    }

    /// Negates the expression, normalizing instead of wrapping where
    /// possible.
    ///
    /// Double negation cancels, values are negated directly, sums distribute
    /// the sign over every term and products negate their leading factor.
    ///
    /// ## Example
    /// ```
    /// use physcalc::ast::{Expression, Operator};
    ///
    /// let a = Expression::Variable("a".into());
    /// let b = Expression::Variable("b".into());
    /// let sum = Expression::chain(vec![a, b], vec![Operator::Add]);
    /// assert_eq!(sum.negate().to_string(), "-a - b");
    ///
    /// let x = Expression::Variable("x".into());
    /// assert_eq!(x.clone().negate().negate(), x);
    /// ```
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Negate(inner) => *inner,
            Self::Value(value) => Self::Value(value.negate()),
            Self::Chain(mut chain) if chain.tier == Tier::Add => {
                chain.negate_head();
                chain.operators = chain.operators
                                       .into_iter()
                                       .map(|op| Operator::Subtract.distribute(op))
                                       .collect();
                Self::Chain(chain)
            },
            Self::Chain(mut chain) => {
                chain.negate_head();
                Self::Chain(chain)
            },
            other => Self::Negate(Box::new(other)),
        }
    }

    /// The value, if the expression is fully computed.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Describes the expression for error messages, e.g. `variable x`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Value(value) => format!("value {value}"),
            Self::Variable(name) => format!("variable {name}"),
            Self::Output(index) => format!("output ref [{index}]"),
            _ => format!("expression {self}"),
        }
    }

    /// Renders the expression, showing exact numbers as fractions when `frac`
    /// is set.
    #[must_use]
    pub fn render(&self, frac: bool) -> String {
        match self {
            Self::Value(value) => value.render(frac),
            Self::Variable(name) => name.clone(),
            Self::Output(index) => format!("[{index}]"),
            Self::Chain(chain) => {
                let mut out = chain.operands[0].render_operand(chain.tier, frac);
                for (op, operand) in chain.operators.iter().zip(&chain.operands[1..]) {
                    out.push_str(&format!(" {op} {}", operand.render_operand(chain.tier, frac)));
                }
                out
            },
            Self::Power(operands) => operands.iter()
                                             .map(|e| e.render_operand(Tier::Power, frac))
                                             .collect::<Vec<_>>()
                                             .join(" ^ "),
            Self::Negate(inner) => format!("-{}", inner.render_operand(Tier::Power, frac)),
        }
    }

    /// Renders as an operand of an operator of `tier`, parenthesizing chains
    /// and powers that would otherwise bind differently.
    fn render_operand(&self, tier: Tier, frac: bool) -> String {
        let needs_parens = match self {
            Self::Chain(chain) => chain.tier <= tier,
            Self::Power(_) => tier == Tier::Power,
            _ => false,
        };
        if needs_parens { format!("({})", self.render(frac)) } else { self.render(frac) }
    }
}

impl OperatorChain {
    fn append(&mut self, op: Operator, operand: Expression) {
        match operand {
            Expression::Chain(inner) if inner.tier == self.tier => {
                self.operators.push(op);
                self.operators
                    .extend(inner.operators.into_iter().map(|inner_op| op.distribute(inner_op)));
                self.operands.extend(inner.operands);
            },
            Expression::Negate(inner) if self.tier == Tier::Add => {
                self.append(op.inverse(), *inner);
            },
            Expression::Negate(inner) => {
                self.negate_head();
                self.operators.push(op);
                self.operands.push(*inner);
            },
            other => {
                self.operators.push(op);
                self.operands.push(other);
            },
        }
    }

    fn negate_head(&mut self) {
        let head = std::mem::replace(&mut self.operands[0], Expression::Output(0));
        self.operands[0] = head.negate();
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
