use crate::expr::display_string;
use crate::Expression;

#[test]
fn test_fraction_reassembly() {
    let expr = product![
        sum![int!(800), int!(550).negate()],
        sum![int!(800), int!(550)].reciprocal(),
    ];
    assert_eq!(display_string(&expr), "\\frac{800 - 550}{800 + 550}");
}

#[test]
fn test_reciprocal_alone() {
    let expr = product![var!("x").reciprocal()];
    assert_eq!(display_string(&expr), "\\frac{1}{x}");
}

#[test]
fn test_fraction_with_factor_run() {
    let expr = product![
        sum![var!("a"), var!("b")],
        var!("c"),
        var!("d").reciprocal(),
    ];
    assert_eq!(
        display_string(&expr),
        "\\frac{\\left(a + b\\right)\\, c}{d}"
    );
}

#[test]
fn test_sqrt() {
    let expr = power!(var!("NDVI"), Expression::Number(rat!(1, 2)));
    assert_eq!(display_string(&expr), "\\sqrt{NDVI}");

    let expr = power!(var!("x"), Expression::Number(rat!(1, 3)));
    assert_eq!(display_string(&expr), "\\sqrt[3]{x}");
}

#[test]
fn test_superscripts() {
    assert_eq!(display_string(&power!(var!("a"), int!(2))), "a^{2}");
    assert_eq!(
        display_string(&power!(sum![var!("a"), var!("b")], int!(2))),
        "\\left(a + b\\right)^{2}"
    );
}

#[test]
fn test_factor_separators() {
    // Adjacent numeric literals need an explicit dot.
    let expr = product![int!(6), int!(3)];
    assert_eq!(display_string(&expr), "6 \\cdot 3");

    let expr = product![int!(2), var!("x")];
    assert_eq!(display_string(&expr), "2\\, x");
}

#[test]
fn test_functions() {
    assert_eq!(
        display_string(&Expression::Abs(Box::new(var!("x")))),
        "\\left|x\\right|"
    );
    assert_eq!(
        display_string(&Expression::Ln(Box::new(var!("x")))),
        "\\ln\\left(x\\right)"
    );

    let expr = Expression::Call("min".to_owned(), vec![var!("x"), var!("y")]);
    assert_eq!(display_string(&expr), "\\operatorname{min}\\left(x, y\\right)");
}

#[test]
fn test_rational_number() {
    let expr = Expression::Number(rat!(2, 3));
    assert_eq!(display_string(&expr), "\\frac{2}{3}");
}

#[test]
fn test_colon_names_wrapped_in_text() {
    assert_eq!(display_string(&var!("R:800")), "\\text{R:800}");

    let expr = sum![var!("R:800"), var!("R:550").negate()];
    assert_eq!(display_string(&expr), "\\text{R:800} - \\text{R:550}");
}

#[test]
fn test_dash_names_restored() {
    assert_eq!(display_string(&var!("NIR-edge")), "NIR-edge");
}

#[test]
fn test_prefix_names_do_not_collide() {
    let expr = sum![var!("R:80"), var!("R:8").negate()];
    assert_eq!(display_string(&expr), "\\text{R:80} - \\text{R:8}");
}

#[test]
fn test_signs() {
    assert_eq!(display_string(&var!("a").negate()), "-a");

    let expr = sum![var!("a"), var!("b").negate(), int!(-2)];
    assert_eq!(display_string(&expr), "a - b - 2");
}
