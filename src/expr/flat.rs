//! The flat single-line rendering of an expression.
//!
//! This form is for tabular output and machine consumption: `**` for powers,
//! `*` between factors, and no reconstruction of fractions, so a division
//! prints as `a*b**-1`. Variable names print verbatim, including any `:` or
//! `-` they carry.

use super::Expression;
use crate::number::Number;

/// Renders an expression as a flat algebraic string.
pub fn flat_string(expr: &Expression) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Sum(terms) => {
            for (i, term) in terms.iter().enumerate() {
                if i == 0 {
                    write_addend(out, term);
                    continue;
                }
                match term {
                    Expression::Negate(inner) => {
                        out.push_str(" - ");
                        write_addend(out, inner);
                    }
                    Expression::Number(n) if n.is_negative() => {
                        out.push_str(" - ");
                        write_addend(out, &Expression::Number(-*n));
                    }
                    _ => {
                        out.push_str(" + ");
                        write_addend(out, term);
                    }
                }
            }
        }
        other => write_addend(out, other),
    }
}

fn write_addend(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Negate(inner) => {
            out.push('-');
            write_factor(out, inner);
        }
        Expression::Number(n) if n.is_negative() => {
            out.push('-');
            write_atom(out, &Expression::Number(-*n));
        }
        Expression::Product(factors) => {
            for (i, factor) in factors.iter().enumerate() {
                if i > 0 {
                    out.push('*');
                }
                write_factor(out, factor);
            }
        }
        other => write_factor(out, other),
    }
}

fn write_factor(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Power(base, exp) => {
            write_base(out, base);
            out.push_str("**");
            write_exponent(out, exp);
        }
        Expression::Sum(_) | Expression::Negate(_) | Expression::Product(_) => {
            parenthesized(out, expr);
        }
        Expression::Number(n) if n.is_negative() => {
            parenthesized(out, expr);
        }
        other => write_atom(out, other),
    }
}

fn write_base(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Sum(_)
        | Expression::Negate(_)
        | Expression::Product(_)
        | Expression::Power(_, _) => parenthesized(out, expr),
        Expression::Number(n) if n.is_negative() => parenthesized(out, expr),
        other => write_atom(out, other),
    }
}

fn write_exponent(out: &mut String, expr: &Expression) {
    match expr {
        // Integer exponents print bare, so a reciprocal reads `b**-1`.
        Expression::Number(Number::Int(i)) => {
            out.push_str(&i.to_string());
        }
        Expression::Number(Number::Rational(n, d)) => {
            out.push_str(&format!("({}/{})", n, d));
        }
        Expression::Number(Number::Decimal(d)) => {
            out.push_str(&d.to_string());
        }
        Expression::Variable(_) | Expression::Abs(_) | Expression::Ln(_) | Expression::Call(_, _) => {
            write_atom(out, expr);
        }
        other => parenthesized(out, other),
    }
}

fn write_atom(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Number(n) => out.push_str(&n.to_string()),
        Expression::Variable(name) => out.push_str(name),
        Expression::Abs(inner) => {
            out.push_str("Abs(");
            write_expr(out, inner);
            out.push(')');
        }
        Expression::Ln(inner) => {
            out.push_str("log(");
            write_expr(out, inner);
            out.push(')');
        }
        Expression::Call(name, args) => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg);
            }
            out.push(')');
        }
        compound => parenthesized(out, compound),
    }
}

fn parenthesized(out: &mut String, expr: &Expression) {
    out.push('(');
    write_expr(out, expr);
    out.push(')');
}
