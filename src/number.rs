use core::{fmt, ops::Neg, str::FromStr};

use num_traits::Zero;
use rust_decimal::Decimal;

/// A numeric literal as it appeared in a source formula.
///
/// Numbers are carriers of text-level information, not values to compute
/// with: a `Decimal` keeps its written scale (`0.50` stays `0.50`), and a
/// `Rational` keeps its numerator and denominator unreduced. Nothing in this
/// crate performs arithmetic on these beyond negation.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Number {
    Int(i64),
    Decimal(Decimal),
    Rational(i64, i64),
}

impl Number {
    /// Parses the text of a numeric literal.
    ///
    ///   - Text containing a `.` parses as a `Decimal`, preserving its scale.
    ///   - Other text parses as an `Int`.
    ///   - Unparseable text yields decimal zero rather than an error, so a
    ///     malformed literal degrades a formula instead of aborting it.
    pub fn from_literal_text(text: &str) -> Number {
        let text = text.trim();
        if text.contains('.') {
            match Decimal::from_str(text) {
                Ok(d) => Number::Decimal(d),
                Err(_) => Number::Decimal(Decimal::zero()),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => Number::Int(i),
                Err(_) => match Decimal::from_str(text) {
                    Ok(d) => Number::Decimal(d),
                    Err(_) => Number::Decimal(Decimal::zero()),
                },
            }
        }
    }

    /// Whether this number is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Int(i) => *i < 0,
            Number::Decimal(d) => d.is_sign_negative() && !d.is_zero(),
            Number::Rational(n, d) => (*n < 0) != (*d < 0),
        }
    }

    /// Whether this number is exactly the integer -1.
    pub fn is_negative_one(&self) -> bool {
        matches!(self, Number::Int(-1))
    }

    /// If this is an integer literal, returns it. Otherwise returns None.
    ///
    /// Unlike a general whole-number test, this never inspects the value of a
    /// `Decimal` or `Rational`: `2.0` and `4/2` are not integer literals.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(i) => Self::Int(-i),
            Self::Decimal(d) => Self::Decimal(-d),
            Self::Rational(n, d) => Self::Rational(-n, d),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Decimal(d) => write!(f, "{}", d),
            Number::Rational(n, d) => write!(f, "{}/{}", n, d),
        }
    }
}
