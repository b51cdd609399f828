use std::fs;

use crate::document::{Band, IndexDefinition};
use crate::tests::util::NDWI_XML;
use crate::Translator;

#[test]
fn test_full_definition() {
    let definition = IndexDefinition::from_xml(NDWI_XML).unwrap();

    assert_eq!(definition.name, "NDWI");
    assert_eq!(
        definition.alternative_names,
        vec!["Normalized Difference Water Index", "Gao's NDWI"],
    );
    assert_eq!(definition.description, "Normalized Difference Water Index");
    assert_eq!(definition.application_group, "Water");
    assert_eq!(definition.application_molecular_target, "H2O");
    assert_eq!(definition.application_subtarget, "Leaf water content");
    assert_eq!(definition.species, "All");
    assert_eq!(definition.reference, "Gao (1996)");
    assert_eq!(definition.additional_information, "Sensitive to canopy moisture");

    assert_eq!(definition.bands.len(), 2);
    assert_eq!(
        definition.bands[0],
        Band {
            name: "Green".to_owned(),
            min: "550".to_owned(),
            max: "550".to_owned(),
            unit: "nm".to_owned(),
        },
    );

    assert_eq!(
        Translator::flat_string(definition.formula.as_ref()),
        "(550 - 860)*(550 + 860)**-1",
    );
}

#[test]
fn test_missing_fields_default() {
    let definition = IndexDefinition::from_xml("<IndexDefinition/>").unwrap();

    assert_eq!(definition.name, "Unknown");
    assert!(definition.alternative_names.is_empty());
    assert_eq!(definition.description, "");
    assert!(definition.bands.is_empty());
    assert!(definition.formula.is_none());
    assert_eq!(definition.wavelengths_summary(), "");
}

#[test]
fn test_entities_unescaped() {
    let definition =
        IndexDefinition::from_xml("<Def><Name>A &amp; B</Name></Def>").unwrap();
    assert_eq!(definition.name, "A & B");
}

#[test]
fn test_band_attribute_defaults() {
    let source = "<Def><Wavelengths><Band/></Wavelengths></Def>";
    let definition = IndexDefinition::from_xml(source).unwrap();

    assert_eq!(definition.bands.len(), 1);
    let band = &definition.bands[0];
    assert_eq!(band.name, "Unknown");
    assert_eq!(band.unit, "nm");
    assert_eq!(band.legend_entry(), "Unknown: nm");
}

#[test]
fn test_legend_entries() {
    let single = Band {
        name: "Green".to_owned(),
        min: "550".to_owned(),
        max: "550".to_owned(),
        unit: "nm".to_owned(),
    };
    assert_eq!(single.legend_entry(), "Green: 550 nm");

    let range = Band {
        name: "NIR".to_owned(),
        min: "760".to_owned(),
        max: "900".to_owned(),
        unit: "nm".to_owned(),
    };
    assert_eq!(range.legend_entry(), "NIR: 760-900 nm");
}

#[test]
fn test_wavelengths_summary() {
    let band = |min: &str, max: &str| Band {
        name: "B".to_owned(),
        min: min.to_owned(),
        max: max.to_owned(),
        unit: "nm".to_owned(),
    };

    let definition = IndexDefinition {
        bands: vec![
            band("760", "900"),
            band("550", "550"),
            band("531.5", "531.5"),
            band("", ""),
            band("400", "500"),
        ],
        ..IndexDefinition::from_xml("<Def/>").unwrap()
    };

    // Singles sorted first, then ranges by their minimum; whole values
    // print without a trailing .0, and non-numeric bounds are skipped.
    assert_eq!(definition.wavelengths_summary(), "531.5, 550, 400:500, 760:900");
}

#[test]
fn test_formula_locations() {
    let source = "<Def><math><ci>x</ci></math></Def>";
    let definition = IndexDefinition::from_xml(source).unwrap();
    assert_eq!(Translator::flat_string(definition.formula.as_ref()), "x");

    let source = "<Def><MathML><ci>G</ci></MathML></Def>";
    let definition = IndexDefinition::from_xml(source).unwrap();
    assert_eq!(Translator::flat_string(definition.formula.as_ref()), "G");
}

#[test]
fn test_namespace_prefixes_stripped() {
    let source = r#"<Def><MathML>
        <mml:math xmlns:mml="http://www.w3.org/1998/Math/MathML">
            <mml:cn>5</mml:cn>
        </mml:math>
    </MathML></Def>"#;
    let definition = IndexDefinition::from_xml(source).unwrap();

    let formula = definition.formula.as_ref().unwrap();
    assert_eq!(formula.tag, "math");
    assert_eq!(Translator::flat_string(Some(formula)), "5");
}

#[test]
fn test_document_without_root() {
    assert!(IndexDefinition::from_xml("").is_err());
    assert!(IndexDefinition::from_xml("no markup here").is_err());
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ndwi.xml");
    fs::write(&path, NDWI_XML).unwrap();

    let definition = IndexDefinition::load(&path).unwrap();
    assert_eq!(definition.name, "NDWI");

    let missing = dir.path().join("absent.xml");
    assert!(IndexDefinition::load(&missing).is_err());
}
