use image::{Rgb, RgbImage};

use super::font;
use crate::expr::Expression;
use crate::render::{Area, CalculatedPoint, Glyph, Renderer};

/// Renders an expression layout onto an RGB raster.
///
/// Character glyphs come from the embedded 8x8 font scaled by an integer
/// factor; structural glyphs (fraction lines, parentheses, radicals) are
/// drawn as line art so they stretch to their contents.
pub struct PngRenderer {
    scale: u32,
    ink: Rgb<u8>,
    background: Rgb<u8>,
    canvas: RgbImage,
}

impl PngRenderer {
    pub fn new(scale: u32) -> Self {
        let scale = scale.max(1);
        PngRenderer {
            scale,
            ink: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
            canvas: RgbImage::new(1, 1),
        }
    }

    /// Lays out and draws an expression, returning the finished raster.
    pub fn render_to_image(&mut self, expr: &Expression) -> RgbImage {
        self.draw_all(expr);
        self.canvas.clone()
    }

    fn cell(&self) -> u64 {
        (font::GLYPH_HEIGHT * self.scale) as u64
    }

    fn s(&self) -> u64 {
        self.scale as u64
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64) {
        for py in y..y + h {
            for px in x..x + w {
                if px >= 0
                    && py >= 0
                    && (px as u32) < self.canvas.width()
                    && (py as u32) < self.canvas.height()
                {
                    self.canvas.put_pixel(px as u32, py as u32, self.ink);
                }
            }
        }
    }

    /// Draws a line of `scale` thickness between two points.
    fn stroke(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let thickness = self.scale as i64;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.fill_rect(x, y, thickness, thickness);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl Renderer for PngRenderer {
    fn size(&mut self, glyph: Glyph) -> Area {
        let s = self.s();
        match glyph {
            Glyph::Char { .. } | Glyph::Add | Glyph::Subtract | Glyph::Multiply => {
                Area::square(self.cell())
            }

            Glyph::Fraction { inner_width } => Area::new(inner_width + 2 * s, 3 * s),

            Glyph::Sqrt { inner_area } => {
                Area::new(inner_area.width + 8 * s, inner_area.height + 3 * s)
            }

            Glyph::LeftParenthesis { inner_height } | Glyph::RightParenthesis { inner_height } => {
                Area::new(4 * s, inner_height)
            }

            Glyph::Bar { inner_height } => Area::new(3 * s, inner_height),
        }
    }

    fn init(&mut self, size: Area) {
        self.canvas = RgbImage::from_pixel(
            (size.width as u32).max(1),
            (size.height as u32).max(1),
            self.background,
        );
    }

    fn draw(&mut self, glyph: Glyph, point: CalculatedPoint) {
        let s = self.s() as i64;
        let x = point.x as i64;
        let y = point.y as i64;

        match glyph {
            Glyph::Char { ch } => {
                font::draw_char(&mut self.canvas, ch, point.x as u32, point.y as u32, self.scale, self.ink)
            }
            Glyph::Add => {
                font::draw_char(&mut self.canvas, '+', point.x as u32, point.y as u32, self.scale, self.ink)
            }
            Glyph::Subtract => {
                font::draw_char(&mut self.canvas, '-', point.x as u32, point.y as u32, self.scale, self.ink)
            }
            Glyph::Multiply => {
                font::draw_char(&mut self.canvas, '*', point.x as u32, point.y as u32, self.scale, self.ink)
            }

            Glyph::Fraction { inner_width } => {
                self.fill_rect(x, y + s, inner_width as i64 + 2 * s, s);
            }

            Glyph::LeftParenthesis { inner_height } => {
                let h = inner_height as i64;
                self.stroke(x + 3 * s, y, x + s, y + h / 4);
                self.stroke(x + s, y + h / 4, x + s, y + 3 * h / 4);
                self.stroke(x + s, y + 3 * h / 4, x + 3 * s, y + h - s);
            }

            Glyph::RightParenthesis { inner_height } => {
                let h = inner_height as i64;
                let w = 4 * s;
                self.stroke(x + w - 3 * s, y, x + w - s, y + h / 4);
                self.stroke(x + w - s, y + h / 4, x + w - s, y + 3 * h / 4);
                self.stroke(x + w - s, y + 3 * h / 4, x + w - 3 * s, y + h - s);
            }

            Glyph::Bar { inner_height } => {
                self.fill_rect(x + s, y, s, inner_height as i64);
            }

            Glyph::Sqrt { inner_area } => {
                let h = inner_area.height as i64 + 3 * s;
                let w = inner_area.width as i64 + 8 * s;
                // Tick, rising stroke, then the overline across the inner
                // area with a little overhang.
                self.stroke(x, y + 2 * h / 3, x + 2 * s, y + h - s);
                self.stroke(x + 2 * s, y + h - s, x + 6 * s, y);
                self.fill_rect(x + 6 * s, y, w - 6 * s, s);
            }
        }
    }
}
