//! MathML content markup and its translation into [`Expression`] trees.
//!
//! [`FormulaNode`] is the element tree the XML loader produces; the
//! [`Translator`] walks it with one recursive descent pass per formula.
//! Translation is total: anything it cannot understand collapses to `None`
//! (and an empty rendered string), never a panic or an error value.

use std::collections::BTreeMap;

use crate::expr::{display_string, flat_string, Expression};
use crate::number::Number;

/// An element of a parsed definition document.
///
/// The tag is stored with any namespace prefix stripped, so `mml:math` and
/// `math` dispatch identically. Text from multiple text events is
/// concatenated in document order.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FormulaNode {
    pub tag: String,
    pub text: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<FormulaNode>,
}

impl FormulaNode {
    pub fn new(tag: impl Into<String>) -> Self {
        FormulaNode {
            tag: tag.into(),
            text: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The element's text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// The first direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&FormulaNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Follows a path of direct-child tags from this element.
    pub fn path(&self, tags: &[&str]) -> Option<&FormulaNode> {
        let mut node = self;
        for tag in tags {
            node = node.child(tag)?;
        }
        Some(node)
    }

    /// Depth-first search for the first descendant with the given tag.
    pub fn descendant(&self, tag: &str) -> Option<&FormulaNode> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    /// The value of an attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All direct children with the given tag, in document order.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a FormulaNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

/// Maps variable-name text to the `Variable` created for it, so repeated
/// occurrences of one name resolve to an identical expression. Built fresh
/// for every conversion call; symbols never leak between formulas.
#[derive(Default)]
struct SymbolTable {
    symbols: BTreeMap<String, Expression>,
}

impl SymbolTable {
    fn intern(&mut self, name: &str) -> Expression {
        self.symbols
            .entry(name.to_owned())
            .or_insert_with(|| Expression::Variable(name.to_owned()))
            .clone()
    }
}

/// Translates MathML content markup into expression trees and strings.
///
/// The public operations are associated functions so that each call gets its
/// own symbol table.
pub struct Translator {
    symbols: SymbolTable,
}

impl Translator {
    /// Renders a formula subtree as a display-formula string.
    ///
    /// An absent or untranslatable subtree yields the empty string.
    pub fn display_string(node: Option<&FormulaNode>) -> String {
        match Self::parse_expression(node) {
            Some(expr) => display_string(&expr),
            None => String::new(),
        }
    }

    /// Renders a formula subtree as a flat algebraic string.
    ///
    /// An absent or untranslatable subtree yields the empty string.
    pub fn flat_string(node: Option<&FormulaNode>) -> String {
        match Self::parse_expression(node) {
            Some(expr) => flat_string(&expr),
            None => String::new(),
        }
    }

    /// Translates a formula subtree into an expression, or `None` when the
    /// subtree is absent or has no translatable content.
    pub fn parse_expression(node: Option<&FormulaNode>) -> Option<Expression> {
        let mut translator = Translator {
            symbols: SymbolTable::default(),
        };
        translator.parse_node(node?)
    }

    fn parse_node(&mut self, node: &FormulaNode) -> Option<Expression> {
        match node.tag.as_str() {
            "math" => node.children.first().and_then(|child| self.parse_node(child)),
            "apply" => self.parse_apply(node),
            "ci" | "mi" => {
                let name = node.trimmed_text();
                if name.is_empty() {
                    None
                } else {
                    Some(self.symbols.intern(name))
                }
            }
            "cn" | "mn" => Some(Expression::Number(Number::from_literal_text(
                node.trimmed_text(),
            ))),
            // A wrapper element around a single child is transparent; this
            // covers outer elements like a `MathML` container.
            _ if node.children.len() == 1 => self.parse_node(&node.children[0]),
            _ => None,
        }
    }

    fn parse_apply(&mut self, node: &FormulaNode) -> Option<Expression> {
        let (operator, operand_nodes) = node.children.split_first()?;
        if operand_nodes.is_empty() {
            return None;
        }

        let mut operands = Vec::with_capacity(operand_nodes.len());
        for operand in operand_nodes {
            match self.parse_node(operand) {
                Some(expr) => operands.push(expr),
                None => log::warn!(
                    "dropping untranslatable <{}> operand of <{}>",
                    operand.tag,
                    operator.tag
                ),
            }
        }
        if operands.is_empty() {
            return None;
        }

        self.apply_operator(operator, operands)
    }

    fn apply_operator(
        &mut self,
        operator: &FormulaNode,
        mut operands: Vec<Expression>,
    ) -> Option<Expression> {
        match operator.tag.as_str() {
            "divide" => {
                if operands.len() != 2 {
                    return None;
                }
                let divisor = operands.pop()?;
                let dividend = operands.pop()?;
                Some(Expression::Product(vec![dividend, divisor.reciprocal()]))
            }

            "times" => Some(Expression::Product(operands)),

            "plus" => Some(Expression::Sum(operands)),

            "minus" => {
                if operands.len() == 1 {
                    operands.pop().map(Expression::negate)
                } else {
                    let terms = operands
                        .into_iter()
                        .enumerate()
                        .map(|(i, operand)| if i == 0 { operand } else { operand.negate() })
                        .collect();
                    Some(Expression::Sum(terms))
                }
            }

            "power" => {
                if operands.len() != 2 {
                    return None;
                }
                let exponent = operands.pop()?;
                let base = operands.pop()?;
                Some(Expression::Power(Box::new(base), Box::new(exponent)))
            }

            "root" => match operands.len() {
                1 => {
                    let radicand = operands.pop()?;
                    Some(Expression::Power(
                        Box::new(radicand),
                        Box::new(Expression::Number(Number::Rational(1, 2))),
                    ))
                }
                2 => {
                    let degree = operands.pop()?;
                    let radicand = operands.pop()?;
                    let exponent = match &degree {
                        Expression::Number(n) => match n.to_integer() {
                            Some(i) => Expression::Number(Number::Rational(1, i)),
                            None => degree.reciprocal(),
                        },
                        _ => degree.reciprocal(),
                    };
                    Some(Expression::Power(Box::new(radicand), Box::new(exponent)))
                }
                _ => None,
            },

            "abs" => {
                if operands.len() != 1 {
                    return None;
                }
                operands.pop().map(|a| Expression::Abs(Box::new(a)))
            }

            "ln" => {
                if operands.len() != 1 {
                    return None;
                }
                operands.pop().map(|a| Expression::Ln(Box::new(a)))
            }

            "csymbol" => {
                let name = operator.trimmed_text();
                if name.is_empty() {
                    None
                } else {
                    Some(Expression::Call(name.to_owned(), operands))
                }
            }

            unknown => {
                log::warn!("unsupported operator <{}>", unknown);
                None
            }
        }
    }
}
