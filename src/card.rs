//! Annotated per-definition images.
//!
//! A card stacks, centred inside a border frame: the title (`{name} Index`),
//! the rendered formula, the wrapped description, and the wavelength-band
//! legend. A failed file gets an error card with the failure message in
//! place of the content.

use std::path::Path;

use image::{imageops, Rgb, RgbImage};

use crate::document::IndexDefinition;
use crate::error::SpecidxError;
use crate::mathml::Translator;
use crate::renderers::{font, PngRenderer};

const MARGIN: u32 = 32;
const GAP: u32 = 24;
const LINE_SPACING: u32 = 4;
const WRAP_COLUMNS: usize = 60;
const MIN_WIDTH: u32 = 480;

const TITLE_SCALE: u32 = 3;
const FORMULA_SCALE: u32 = 2;
const BODY_SCALE: u32 = 2;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const NAVY: Rgb<u8> = Rgb([0, 0, 96]);
const DARK_BLUE: Rgb<u8> = Rgb([0, 0, 139]);
const DARK_GREEN: Rgb<u8> = Rgb([0, 100, 0]);
const STEEL_BLUE: Rgb<u8> = Rgb([70, 100, 150]);
const RED: Rgb<u8> = Rgb([178, 34, 34]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

pub struct FormulaCard {
    image: RgbImage,
}

impl FormulaCard {
    /// Composes the card for a definition.
    pub fn render(definition: &IndexDefinition) -> FormulaCard {
        let title = format!("{} Index", definition.name);

        // Name as a plain text run when the formula is absent or yields
        // nothing translatable.
        let formula_image = match Translator::parse_expression(definition.formula.as_ref()) {
            Some(expr) => PngRenderer::new(FORMULA_SCALE).render_to_image(&expr),
            None => text_image(&definition.name, FORMULA_SCALE, BLACK),
        };

        let description_lines = wrap_text(&definition.description, WRAP_COLUMNS);

        let mut legend_lines = Vec::new();
        if !definition.bands.is_empty() {
            legend_lines.push("Wavelength Bands:".to_owned());
            legend_lines.extend(definition.bands.iter().map(|band| band.legend_entry()));
        }

        let body_line_height = font::GLYPH_HEIGHT * BODY_SCALE + LINE_SPACING;
        let title_height = font::GLYPH_HEIGHT * TITLE_SCALE;

        let mut width = font::text_width(&title, TITLE_SCALE).max(formula_image.width());
        for line in description_lines.iter().chain(legend_lines.iter()) {
            width = width.max(font::text_width(line, BODY_SCALE));
        }
        let width = (width + 2 * MARGIN).max(MIN_WIDTH);

        let mut height = MARGIN + title_height + GAP + formula_image.height();
        if !description_lines.is_empty() {
            height += GAP + description_lines.len() as u32 * body_line_height;
        }
        if !legend_lines.is_empty() {
            height += GAP + legend_lines.len() as u32 * body_line_height;
        }
        height += MARGIN;

        let mut image = RgbImage::from_pixel(width, height, WHITE);

        let mut y = MARGIN;
        draw_centred(&mut image, &title, y, TITLE_SCALE, DARK_BLUE);
        y += title_height + GAP;

        let formula_x = (width.saturating_sub(formula_image.width())) / 2;
        imageops::replace(&mut image, &formula_image, formula_x as i64, y as i64);
        y += formula_image.height();

        if !description_lines.is_empty() {
            y += GAP;
            for line in &description_lines {
                draw_centred(&mut image, line, y, BODY_SCALE, DARK_GREEN);
                y += body_line_height;
            }
        }

        if !legend_lines.is_empty() {
            y += GAP;
            for line in &legend_lines {
                draw_centred(&mut image, line, y, BODY_SCALE, STEEL_BLUE);
                y += body_line_height;
            }
        }

        draw_border(&mut image, NAVY);

        FormulaCard { image }
    }

    /// Composes the card used when a file could not be processed.
    pub fn error(message: &str) -> FormulaCard {
        let title = "Error Processing XML";
        let message_lines = wrap_text(message, WRAP_COLUMNS);

        let body_line_height = font::GLYPH_HEIGHT * BODY_SCALE + LINE_SPACING;
        let title_height = font::GLYPH_HEIGHT * TITLE_SCALE;

        let mut width = font::text_width(title, TITLE_SCALE);
        for line in &message_lines {
            width = width.max(font::text_width(line, BODY_SCALE));
        }
        let width = (width + 2 * MARGIN).max(MIN_WIDTH);

        let height = MARGIN
            + title_height
            + GAP
            + message_lines.len() as u32 * body_line_height
            + MARGIN;

        let mut image = RgbImage::from_pixel(width, height, WHITE);

        let mut y = MARGIN;
        draw_centred(&mut image, title, y, TITLE_SCALE, RED);
        y += title_height + GAP;
        for line in &message_lines {
            draw_centred(&mut image, line, y, BODY_SCALE, BLACK);
            y += body_line_height;
        }

        draw_border(&mut image, RED);

        FormulaCard { image }
    }

    /// Encodes the card as a PNG at the given path.
    pub fn save(&self, path: &Path) -> Result<(), SpecidxError> {
        self.image.save(path)?;
        Ok(())
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

/// Greedy word wrap at a fixed column width. Words longer than the width
/// occupy a line of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn text_image(text: &str, scale: u32, colour: Rgb<u8>) -> RgbImage {
    let width = font::text_width(text, scale).max(1);
    let height = font::GLYPH_HEIGHT * scale;
    let mut image = RgbImage::from_pixel(width, height, WHITE);
    font::draw_text(&mut image, text, 0, 0, scale, colour);
    image
}

fn draw_centred(image: &mut RgbImage, text: &str, y: u32, scale: u32, colour: Rgb<u8>) {
    let x = image.width().saturating_sub(font::text_width(text, scale)) / 2;
    font::draw_text(image, text, x, y, scale, colour);
}

fn draw_border(image: &mut RgbImage, colour: Rgb<u8>) {
    let inset = 4u32;
    let thickness = 3u32;
    let (w, h) = (image.width(), image.height());

    for t in 0..thickness {
        let left = inset + t;
        let right = w - 1 - inset - t;
        let top = inset + t;
        let bottom = h - 1 - inset - t;

        for x in left..=right {
            image.put_pixel(x, top, colour);
            image.put_pixel(x, bottom, colour);
        }
        for y in top..=bottom {
            image.put_pixel(left, y, colour);
            image.put_pixel(right, y, colour);
        }
    }
}
