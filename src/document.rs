//! Loading spectral-index definition files.
//!
//! A definition file is a small XML document carrying a name, alternative
//! names, metadata, wavelength bands, and (usually) a MathML formula. The
//! loader builds a generic element tree with `quick-xml` and extracts the
//! typed fields from it; the formula stays an untyped [`FormulaNode`]
//! subtree for the translator to walk.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::SpecidxError;
use crate::mathml::FormulaNode;

/// One wavelength band of a definition. `min`/`max` stay as written in the
/// source; only the tabular summary parses them numerically.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Band {
    pub name: String,
    pub min: String,
    pub max: String,
    pub unit: String,
}

impl Band {
    /// The band as it appears in an image legend: `name: min unit` for a
    /// single wavelength, `name: min-max unit` for a range, `name: unit`
    /// when the bounds are missing.
    pub fn legend_entry(&self) -> String {
        if !self.min.is_empty() && !self.max.is_empty() {
            if self.min == self.max {
                format!("{}: {} {}", self.name, self.min, self.unit)
            } else {
                format!("{}: {}-{} {}", self.name, self.min, self.max, self.unit)
            }
        } else {
            format!("{}: {}", self.name, self.unit)
        }
    }
}

/// A parsed definition file.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct IndexDefinition {
    pub name: String,
    pub alternative_names: Vec<String>,
    pub description: String,
    pub application_group: String,
    pub application_molecular_target: String,
    pub application_subtarget: String,
    pub species: String,
    pub reference: String,
    pub additional_information: String,
    pub bands: Vec<Band>,
    pub formula: Option<FormulaNode>,
}

impl IndexDefinition {
    /// Reads and parses a definition file.
    pub fn load(path: &Path) -> Result<IndexDefinition, SpecidxError> {
        let source = fs::read_to_string(path).map_err(|source| SpecidxError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_xml(&source)
    }

    /// Parses a definition from XML text.
    pub fn from_xml(source: &str) -> Result<IndexDefinition, SpecidxError> {
        let root = parse_element_tree(source)?;

        let name = text_or(root.child("Name"), "Unknown");

        let alternative_names = root
            .children_tagged("AlternativeName")
            .map(|n| n.trimmed_text())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();

        let metadata = |field: &str| text_or(root.path(&["Metadata", field]), "");

        let bands = root
            .child("Wavelengths")
            .map(|wavelengths| {
                wavelengths
                    .children_tagged("Band")
                    .map(|band| Band {
                        name: band.attribute("name").unwrap_or("Unknown").to_owned(),
                        min: band.attribute("min").unwrap_or("").to_owned(),
                        max: band.attribute("max").unwrap_or("").to_owned(),
                        unit: band.attribute("unit").unwrap_or("nm").to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let formula = find_formula(&root).cloned();

        Ok(IndexDefinition {
            name,
            alternative_names,
            description: metadata("Description"),
            application_group: metadata("ApplicationGroup"),
            application_molecular_target: metadata("ApplicationMolecularTarget"),
            application_subtarget: metadata("ApplicationSubtarget"),
            species: metadata("Species"),
            reference: metadata("Reference"),
            additional_information: metadata("AdditionalInformation"),
            bands,
            formula,
        })
    }

    /// The alternative names joined for tabular output.
    pub fn alternative_names_joined(&self) -> String {
        self.alternative_names.join(", ")
    }

    /// Summarizes the band wavelengths for tabular output: single
    /// wavelengths sorted ascending, then ranges sorted by their minimum,
    /// each range as `min:max`, integral values without a trailing `.0`.
    /// Bands without numeric bounds are skipped.
    pub fn wavelengths_summary(&self) -> String {
        let mut singles: Vec<f64> = Vec::new();
        let mut ranges: Vec<(f64, f64)> = Vec::new();

        for band in &self.bands {
            let (min, max) = match (band.min.parse::<f64>(), band.max.parse::<f64>()) {
                (Ok(min), Ok(max)) => (min, max),
                _ => continue,
            };
            if min == max {
                singles.push(min);
            } else {
                ranges.push((min, max));
            }
        }

        singles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        ranges.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut parts: Vec<String> = singles.iter().map(|wl| format_wavelength(*wl)).collect();
        parts.extend(
            ranges
                .iter()
                .map(|(min, max)| format!("{}:{}", format_wavelength(*min), format_wavelength(*max))),
        );

        parts.join(", ")
    }
}

fn format_wavelength(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn text_or(node: Option<&FormulaNode>, default: &str) -> String {
    match node {
        Some(node) if !node.trimmed_text().is_empty() => node.trimmed_text().to_owned(),
        _ => default.to_owned(),
    }
}

/// Locates the formula subtree: `MathML/math`, then a bare `MathML`
/// element, then any `math` descendant.
fn find_formula(root: &FormulaNode) -> Option<&FormulaNode> {
    root.path(&["MathML", "math"])
        .or_else(|| root.child("MathML"))
        .or_else(|| root.descendant("math"))
}

/// Drives `quick-xml` over the source and builds the element tree, tags
/// namespace-stripped, text accumulated in document order.
fn parse_element_tree(source: &str) -> Result<FormulaNode, SpecidxError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut stack: Vec<FormulaNode> = Vec::new();
    let mut root: Option<FormulaNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let node = element_from_start(&e)?;
                attach(&mut stack, &mut root, node);
            }
            Event::Text(e) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = decode_utf8(e.as_ref())?;
                    let text = unescape(raw)
                        .map_err(|e| SpecidxError::Malformed(e.to_string()))?;
                    parent.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(decode_utf8(e.as_ref())?);
                }
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Event::Eof => break,
            _ => (),
        }
        buf.clear();
    }

    root.ok_or_else(|| SpecidxError::Malformed("document has no root element".to_owned()))
}

fn attach(stack: &mut Vec<FormulaNode>, root: &mut Option<FormulaNode>, node: FormulaNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn element_from_start(e: &BytesStart) -> Result<FormulaNode, SpecidxError> {
    let tag = decode_utf8(e.local_name().as_ref())?.to_owned();
    let mut node = FormulaNode::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| SpecidxError::Malformed(e.to_string()))?;
        let key = decode_utf8(attr.key.local_name().as_ref())?.to_owned();
        let raw_value = decode_utf8(&attr.value)?;
        let value = unescape(raw_value)
            .map_err(|e| SpecidxError::Malformed(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, SpecidxError> {
    std::str::from_utf8(bytes).map_err(|e| SpecidxError::Malformed(e.to_string()))
}
