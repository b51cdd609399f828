use image::Rgb;

use crate::card::FormulaCard;
use crate::document::IndexDefinition;
use crate::tests::util::NDWI_XML;

const NAVY: Rgb<u8> = Rgb([0, 0, 96]);
const RED: Rgb<u8> = Rgb([178, 34, 34]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[test]
fn test_card_framed_in_navy() {
    let definition = IndexDefinition::from_xml(NDWI_XML).unwrap();
    let card = FormulaCard::render(&definition);
    let image = card.image();

    assert!(image.width() >= 480);
    assert!(image.height() > 0);

    // Border ring sits a few pixels in from the edge, on white ground.
    assert_eq!(*image.get_pixel(5, 5), NAVY);
    assert_eq!(*image.get_pixel(0, 0), WHITE);
}

#[test]
fn test_error_card_framed_in_red() {
    let card = FormulaCard::error("unexpected end of file");
    let image = card.image();

    assert!(image.width() >= 480);
    assert_eq!(*image.get_pixel(5, 5), RED);
    assert_eq!(*image.get_pixel(0, 0), WHITE);
}

#[test]
fn test_annotations_extend_the_card() {
    let full = IndexDefinition::from_xml(NDWI_XML).unwrap();
    let bare = IndexDefinition::from_xml("<Def><Name>NDWI</Name></Def>").unwrap();

    let full_card = FormulaCard::render(&full);
    let bare_card = FormulaCard::render(&bare);

    // Description and band legend each add rows below the formula.
    assert!(full_card.image().height() > bare_card.image().height());
}

#[test]
fn test_save_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ndwi.png");

    let definition = IndexDefinition::from_xml(NDWI_XML).unwrap();
    FormulaCard::render(&definition).save(&path).unwrap();

    let header = std::fs::read(&path).unwrap();
    assert_eq!(&header[1..4], b"PNG");
}
