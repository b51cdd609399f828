//! The symbolic expression tree built from formula markup.
//!
//! An [`Expression`] is a faithful structural record of the formula it was
//! read from. No constructor or method here folds constants, collapses
//! nested sums, or cancels factors; `(800 - 550)` stays a two-term sum even
//! though both terms are numbers. The rendering modules depend on this: a
//! division is recoverable as a vertical fraction only because the inverse
//! factor survives as written.

mod flat;
mod latex;

pub use flat::flat_string;
pub use latex::display_string;

use crate::number::Number;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Expression {
    /// A numeric literal.
    Number(Number),
    /// A named symbol, such as a band reference.
    Variable(String),
    /// Unary negation of a subexpression.
    Negate(Box<Expression>),
    /// An n-ary sum. Subtraction appears as a `Negate` term.
    Sum(Vec<Expression>),
    /// An n-ary product. Division appears as a factor raised to -1.
    Product(Vec<Expression>),
    /// A base raised to an exponent.
    Power(Box<Expression>, Box<Expression>),
    /// Absolute value.
    Abs(Box<Expression>),
    /// Natural logarithm.
    Ln(Box<Expression>),
    /// An application of a named function to arguments.
    Call(String, Vec<Expression>),
}

impl Expression {
    /// Wraps this expression in a negation.
    ///
    /// The wrapping is purely structural: negating a number keeps the
    /// literal intact under a `Negate` node, and double negation stays
    /// doubly negated.
    pub fn negate(self) -> Expression {
        Expression::Negate(Box::new(self))
    }

    /// Returns this expression raised to the power -1.
    ///
    /// This is the only representation of division in the tree: `a / b`
    /// becomes `Product([a, b.reciprocal()])`.
    pub fn reciprocal(self) -> Expression {
        Expression::Power(
            Box::new(self),
            Box::new(Expression::Number(Number::Int(-1))),
        )
    }

    /// If this expression has the shape produced by [`reciprocal`], returns
    /// the base. The renderers use this to reassemble a product's inverse
    /// factors into the denominator of a fraction.
    ///
    /// [`reciprocal`]: Expression::reciprocal
    pub fn as_inverse_factor(&self) -> Option<&Expression> {
        match self {
            Expression::Power(base, exp) => match **exp {
                Expression::Number(n) if n.is_negative_one() => Some(base),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether this is a number strictly less than zero.
    pub fn is_negative_number(&self) -> bool {
        matches!(self, Expression::Number(n) if n.is_negative())
    }
}
