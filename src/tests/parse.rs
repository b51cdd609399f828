use num_traits::Zero;
use rust_decimal::Decimal;

use crate::{Expression, FormulaNode, Number, Translator};

fn parse(node: &FormulaNode) -> Expression {
    Translator::parse_expression(Some(node)).unwrap()
}

#[test]
fn test_division_stays_structural() {
    let node = mml!(apply "divide", mml!(cn, "6"), mml!(cn, "3"));
    assert_eq!(
        parse(&node),
        product![int!(6), int!(3).reciprocal()],
    );
}

#[test]
fn test_identical_names_share_a_symbol() {
    let node = mml!(apply "plus", mml!(ci, "NDVI"), mml!(ci, "NDVI"));
    match parse(&node) {
        Expression::Sum(terms) => {
            assert_eq!(terms.len(), 2);
            assert_eq!(terms[0], var!("NDVI"));
            assert_eq!(terms[0], terms[1]);
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_unary_minus() {
    let node = mml!(apply "minus", mml!(ci, "a"));
    assert_eq!(parse(&node), var!("a").negate());
}

#[test]
fn test_nary_minus() {
    let node = mml!(apply "minus", mml!(ci, "a"), mml!(ci, "b"), mml!(ci, "c"));
    assert_eq!(
        parse(&node),
        sum![var!("a"), var!("b").negate(), var!("c").negate()],
    );
}

#[test]
fn test_times_and_plus() {
    let node = mml!(apply "times", mml!(cn, "2"), mml!(ci, "x"));
    assert_eq!(parse(&node), product![int!(2), var!("x")]);

    let node = mml!(apply "plus", mml!(cn, "800"), mml!(cn, "550"));
    assert_eq!(parse(&node), sum![int!(800), int!(550)]);
}

#[test]
fn test_power() {
    let node = mml!(apply "power", mml!(ci, "x"), mml!(cn, "2"));
    assert_eq!(parse(&node), power!(var!("x"), int!(2)));

    // A power needs exactly two operands.
    let node = mml!(apply "power", mml!(ci, "x"));
    assert_eq!(Translator::parse_expression(Some(&node)), None);
}

#[test]
fn test_root_degrees() {
    let node = mml!(apply "root", mml!(ci, "x"));
    assert_eq!(
        parse(&node),
        power!(var!("x"), Expression::Number(rat!(1, 2))),
    );

    let node = mml!(apply "root", mml!(ci, "x"), mml!(cn, "3"));
    assert_eq!(
        parse(&node),
        power!(var!("x"), Expression::Number(rat!(1, 3))),
    );

    // A non-literal degree becomes a reciprocal exponent.
    let node = mml!(apply "root", mml!(ci, "x"), mml!(ci, "n"));
    assert_eq!(parse(&node), power!(var!("x"), var!("n").reciprocal()));
}

#[test]
fn test_abs_and_ln() {
    let node = mml!(apply "abs", mml!(ci, "x"));
    assert_eq!(parse(&node), Expression::Abs(Box::new(var!("x"))));

    let node = mml!(apply "ln", mml!(ci, "x"));
    assert_eq!(parse(&node), Expression::Ln(Box::new(var!("x"))));
}

#[test]
fn test_csymbol_call() {
    let node = mml!(apply csymbol "min", mml!(ci, "a"), mml!(ci, "b"));
    assert_eq!(
        parse(&node),
        Expression::Call("min".to_owned(), vec![var!("a"), var!("b")]),
    );

    // A csymbol without a name has nothing to call.
    let node = mml!(apply csymbol "", mml!(ci, "a"));
    assert_eq!(Translator::parse_expression(Some(&node)), None);
}

#[test]
fn test_unknown_operator() {
    let node = mml!(apply "sin", mml!(ci, "x"));
    assert_eq!(Translator::parse_expression(Some(&node)), None);
    assert_eq!(Translator::flat_string(Some(&node)), "");
    assert_eq!(Translator::display_string(Some(&node)), "");
}

#[test]
fn test_malformed_literal_becomes_zero() {
    let node = mml!(apply "plus", mml!(cn, "12.3.4"), mml!(cn, "5"));
    assert_eq!(
        parse(&node),
        sum![Expression::Number(Number::Decimal(Decimal::zero())), int!(5)],
    );
}

#[test]
fn test_untranslatable_operands_dropped() {
    let node = mml!(apply "plus", mml!(ci, ""), mml!(cn, "5"));
    assert_eq!(parse(&node), sum![int!(5)]);

    let node = mml!(apply "plus", mml!(ci, ""));
    assert_eq!(Translator::parse_expression(Some(&node)), None);
}

#[test]
fn test_apply_without_operands() {
    let node = mml!(apply "plus");
    assert_eq!(Translator::parse_expression(Some(&node)), None);
}

#[test]
fn test_wrappers_are_transparent() {
    let node = mml!(math, mml!(cn, "7"));
    assert_eq!(parse(&node), int!(7));

    let node = mml!("MathML", mml!(math, mml!(ci, "G")));
    assert_eq!(parse(&node), var!("G"));
}

#[test]
fn test_absent_subtree() {
    assert_eq!(Translator::parse_expression(None), None);
    assert_eq!(Translator::flat_string(None), "");
    assert_eq!(Translator::display_string(None), "");
}

#[test]
fn test_presentation_aliases() {
    let node = mml!(apply "plus", mml!("mi", mml!(cn, "0")));
    // mi with a child but no text is not a name; the operand drops.
    assert_eq!(Translator::parse_expression(Some(&node)), None);

    let mut mi = FormulaNode::new("mi");
    mi.text.push_str("R700");
    let mut mn = FormulaNode::new("mn");
    mn.text.push_str("1.5");
    let mut apply = FormulaNode::new("apply");
    apply.children.push(FormulaNode::new("times"));
    apply.children.push(mi);
    apply.children.push(mn);
    assert_eq!(
        parse(&apply),
        product![var!("R700"), Expression::Number(dec!(1.5))],
    );
}
