//! The display-formula rendering of an expression.
//!
//! Output is LaTeX-like markup intended for human-facing typesetting:
//! inverse factors of a product are reassembled into `\frac`, root-shaped
//! powers into `\sqrt`. Variable names pass through a sanitize/fixup cycle
//! so that names containing `:` or `-` survive intact: rendering emits a
//! placeholder token for each, and a final pass restores the original name,
//! wrapped in `\text{..}` when it contains a colon.

use super::Expression;
use crate::number::Number;

/// Renders an expression as a display-formula string.
pub fn display_string(expr: &Expression) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    fixup_names(out, expr)
}

/// Replaces `:` and `-` in a variable name with placeholder tokens that are
/// valid inside math markup.
fn sanitize_name(name: &str) -> String {
    name.replace(':', "_colon_").replace('-', "_dash_")
}

/// Restores original variable names over their placeholder tokens.
///
/// Longer placeholders are replaced first so that a name which is a prefix
/// of another cannot corrupt it.
fn fixup_names(rendered: String, expr: &Expression) -> String {
    let mut names = Vec::new();
    collect_variables(expr, &mut names);
    names.sort_by(|a, b| sanitize_name(b).len().cmp(&sanitize_name(a).len()));

    let mut out = rendered;
    for name in names {
        let placeholder = sanitize_name(name);
        if placeholder == *name {
            continue;
        }
        let restored = if name.contains(':') {
            format!("\\text{{{}}}", name)
        } else {
            name.clone()
        };
        out = out.replace(&placeholder, &restored);
    }
    out
}

fn collect_variables<'a>(expr: &'a Expression, names: &mut Vec<&'a String>) {
    match expr {
        Expression::Number(_) => {}
        Expression::Variable(name) => {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Expression::Negate(inner) | Expression::Abs(inner) | Expression::Ln(inner) => {
            collect_variables(inner, names)
        }
        Expression::Sum(items) | Expression::Product(items) => {
            for item in items {
                collect_variables(item, names);
            }
        }
        Expression::Power(base, exp) => {
            collect_variables(base, names);
            collect_variables(exp, names);
        }
        Expression::Call(_, args) => {
            for arg in args {
                collect_variables(arg, names);
            }
        }
    }
}

fn write_expr(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Sum(terms) => {
            for (i, term) in terms.iter().enumerate() {
                if i == 0 {
                    write_term(out, term);
                    continue;
                }
                match term {
                    Expression::Negate(inner) => {
                        out.push_str(" - ");
                        write_term(out, inner);
                    }
                    Expression::Number(n) if n.is_negative() => {
                        out.push_str(" - ");
                        write_term(out, &Expression::Number(-*n));
                    }
                    _ => {
                        out.push_str(" + ");
                        write_term(out, term);
                    }
                }
            }
        }
        other => write_term(out, other),
    }
}

fn write_term(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Negate(inner) => {
            out.push('-');
            write_grouped(out, inner);
        }
        Expression::Product(factors) => write_product(out, factors),
        other => write_grouped(out, other),
    }
}

/// Writes a product, reconstructing the vertical fraction a division was
/// translated into: factors raised to -1 form the denominator.
fn write_product(out: &mut String, factors: &[Expression]) {
    let mut numerator: Vec<&Expression> = Vec::new();
    let mut denominator: Vec<&Expression> = Vec::new();
    for factor in factors {
        match factor.as_inverse_factor() {
            Some(base) => denominator.push(base),
            None => numerator.push(factor),
        }
    }

    if denominator.is_empty() {
        write_factor_run(out, &numerator);
        return;
    }

    out.push_str("\\frac{");
    if numerator.is_empty() {
        out.push('1');
    } else {
        write_factor_run(out, &numerator);
    }
    out.push_str("}{");
    write_factor_run(out, &denominator);
    out.push('}');
}

/// Writes juxtaposed factors. A `\cdot` separates two adjacent numeric
/// factors, which juxtaposition alone would merge into one literal. A lone
/// factor takes no grouping parentheses; its run is a whole numerator or
/// denominator.
fn write_factor_run(out: &mut String, factors: &[&Expression]) {
    let grouping = factors.len() > 1;
    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            if matches!(factors[i - 1], Expression::Number(_))
                && matches!(factor, Expression::Number(_))
            {
                out.push_str(" \\cdot ");
            } else {
                out.push_str("\\, ");
            }
        }
        match factor {
            Expression::Sum(_) | Expression::Negate(_) if grouping => {
                write_parenthesized(out, factor)
            }
            Expression::Number(n) if grouping && n.is_negative() => {
                write_parenthesized(out, factor)
            }
            other => write_grouped(out, other),
        }
    }
}

fn write_grouped(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Number(n) => write_number(out, n),
        Expression::Variable(name) => out.push_str(&sanitize_name(name)),
        Expression::Sum(_) => write_expr(out, expr),
        Expression::Negate(_) => write_term(out, expr),
        Expression::Product(factors) => write_product(out, factors),
        Expression::Power(base, exp) => write_power(out, base, exp),
        Expression::Abs(inner) => {
            out.push_str("\\left|");
            write_expr(out, inner);
            out.push_str("\\right|");
        }
        Expression::Ln(inner) => {
            out.push_str("\\ln\\left(");
            write_expr(out, inner);
            out.push_str("\\right)");
        }
        Expression::Call(name, args) => {
            out.push_str("\\operatorname{");
            out.push_str(&sanitize_name(name));
            out.push_str("}\\left(");
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg);
            }
            out.push_str("\\right)");
        }
    }
}

fn write_power(out: &mut String, base: &Expression, exp: &Expression) {
    if let Expression::Number(Number::Rational(1, degree)) = exp {
        if *degree == 2 {
            out.push_str("\\sqrt{");
        } else {
            out.push_str(&format!("\\sqrt[{}]{{", degree));
        }
        write_expr(out, base);
        out.push('}');
        return;
    }

    match base {
        Expression::Sum(_) | Expression::Negate(_) | Expression::Product(_)
        | Expression::Power(_, _) => write_parenthesized(out, base),
        Expression::Number(n) if n.is_negative() => write_parenthesized(out, base),
        other => write_grouped(out, other),
    }
    out.push_str("^{");
    write_expr(out, exp);
    out.push('}');
}

fn write_number(out: &mut String, n: &Number) {
    match n {
        Number::Rational(numer, denom) => {
            out.push_str(&format!("\\frac{{{}}}{{{}}}", numer, denom));
        }
        other => out.push_str(&other.to_string()),
    }
}

fn write_parenthesized(out: &mut String, expr: &Expression) {
    out.push_str("\\left(");
    write_expr(out, expr);
    out.push_str("\\right)");
}
