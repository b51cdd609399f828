use std::str::FromStr;

use num_traits::Zero;
use rust_decimal::Decimal;

use crate::Number;

#[test]
fn test_literal_parsing() {
    assert_eq!(Number::from_literal_text("800"), Number::Int(800));
    assert_eq!(Number::from_literal_text("-3"), Number::Int(-3));
    assert_eq!(Number::from_literal_text(" 42 "), Number::Int(42));

    assert_eq!(Number::from_literal_text("12.5"), dec!(12.5));

    // A literal with a point keeps its written scale.
    assert_eq!(Number::from_literal_text("0.50").to_string(), "0.50");

    // An integer too large for i64 still parses, as a decimal.
    assert!(matches!(
        Number::from_literal_text("99999999999999999999"),
        Number::Decimal(_)
    ));
}

#[test]
fn test_malformed_literals_degrade_to_zero() {
    assert_eq!(
        Number::from_literal_text("12.3.4"),
        Number::Decimal(Decimal::zero())
    );
    assert_eq!(
        Number::from_literal_text("abc"),
        Number::Decimal(Decimal::zero())
    );
    assert_eq!(
        Number::from_literal_text(""),
        Number::Decimal(Decimal::zero())
    );
}

#[test]
fn test_is_negative() {
    assert!(Number::Int(-1).is_negative());
    assert!(!Number::Int(0).is_negative());
    assert!(!Number::Int(7).is_negative());

    assert!(dec!(-0.5).is_negative());
    assert!(!dec!(0.5).is_negative());

    assert!(Number::Rational(-1, 2).is_negative());
    assert!(Number::Rational(1, -2).is_negative());
    assert!(!Number::Rational(1, 2).is_negative());
    assert!(!Number::Rational(-1, -2).is_negative());
}

#[test]
fn test_is_negative_one() {
    assert!(Number::Int(-1).is_negative_one());
    assert!(!Number::Int(1).is_negative_one());
    assert!(!Number::Rational(-1, 1).is_negative_one());
    assert!(!Number::Decimal(Decimal::from_str("-1").unwrap()).is_negative_one());
}

#[test]
fn test_to_integer() {
    assert_eq!(Number::Int(2).to_integer(), Some(2));

    // Whole-valued decimals and rationals are not integer literals.
    assert_eq!(dec!(2.0).to_integer(), None);
    assert_eq!(Number::Rational(4, 2).to_integer(), None);
}

#[test]
fn test_negation() {
    assert_eq!(-Number::Int(3), Number::Int(-3));
    assert_eq!(-dec!(1.5), dec!(-1.5));
    assert_eq!(-Number::Rational(1, 2), Number::Rational(-1, 2));
}

#[test]
fn test_display() {
    assert_eq!(Number::Int(-7).to_string(), "-7");
    assert_eq!(rat!(1, 2).to_string(), "1/2");
    assert_eq!(dec!(3.25).to_string(), "3.25");
}
