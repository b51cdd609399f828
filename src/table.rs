//! Tabular export of definitions.
//!
//! One row per definition file, including error rows for files that failed
//! to load, so the table is a complete record of the input set. Output is
//! RFC-4180 CSV.

use std::fs;
use std::path::Path;

use crate::document::IndexDefinition;
use crate::error::SpecidxError;
use crate::mathml::Translator;

pub const COLUMNS: [&str; 11] = [
    "VIs Name",
    "Abbreviation Algorithm",
    "Alternative names",
    "Wavelengths used",
    "Algorithm",
    "Application Group",
    "Application Molecular Target",
    "Application Subtarget",
    "Species",
    "Reference",
    "Additional Information",
];

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct IndexRow {
    pub vis_name: String,
    pub abbreviation: String,
    pub alternative_names: String,
    pub wavelengths: String,
    pub algorithm: String,
    pub application_group: String,
    pub application_molecular_target: String,
    pub application_subtarget: String,
    pub species: String,
    pub reference: String,
    pub additional_information: String,
}

impl IndexRow {
    /// Builds the row for a loaded definition. The `Algorithm` column
    /// carries the flat formula string, falling back to the definition's
    /// name when there is no translatable formula.
    pub fn from_definition(definition: &IndexDefinition) -> IndexRow {
        let mut algorithm = Translator::flat_string(definition.formula.as_ref());
        if algorithm.is_empty() {
            algorithm = definition.name.clone();
        }

        let vis_name = if definition.description.is_empty() {
            "Unknown".to_owned()
        } else {
            definition.description.clone()
        };

        IndexRow {
            vis_name,
            abbreviation: definition.name.clone(),
            alternative_names: definition.alternative_names_joined(),
            wavelengths: definition.wavelengths_summary(),
            algorithm,
            application_group: definition.application_group.clone(),
            application_molecular_target: definition.application_molecular_target.clone(),
            application_subtarget: definition.application_subtarget.clone(),
            species: definition.species.clone(),
            reference: definition.reference.clone(),
            additional_information: definition.additional_information.clone(),
        }
    }

    /// Builds the error row for a file that could not be processed.
    pub fn error(stem: &str, message: &str) -> IndexRow {
        IndexRow {
            vis_name: format!("Error: {}", stem),
            abbreviation: stem.to_uppercase(),
            alternative_names: String::new(),
            wavelengths: String::new(),
            algorithm: format!("Error: {}", message),
            application_group: String::new(),
            application_molecular_target: String::new(),
            application_subtarget: String::new(),
            species: String::new(),
            reference: String::new(),
            additional_information: String::new(),
        }
    }

    fn fields(&self) -> [&str; 11] {
        [
            &self.vis_name,
            &self.abbreviation,
            &self.alternative_names,
            &self.wavelengths,
            &self.algorithm,
            &self.application_group,
            &self.application_molecular_target,
            &self.application_subtarget,
            &self.species,
            &self.reference,
            &self.additional_information,
        ]
    }
}

#[derive(Default, Debug)]
pub struct IndexTable {
    rows: Vec<IndexRow>,
}

impl IndexTable {
    pub fn new() -> IndexTable {
        IndexTable::default()
    }

    pub fn push(&mut self, row: IndexRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorts rows by the `Abbreviation Algorithm` column.
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
    }

    /// The table as CSV text, header row first.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_record(&mut out, &COLUMNS);
        for row in &self.rows {
            write_record(&mut out, &row.fields());
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), SpecidxError> {
        fs::write(path, self.to_csv()).map_err(|source| SpecidxError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push_str("\r\n");
}

/// Quotes a field when it contains a comma, quote, or line break, doubling
/// any embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
