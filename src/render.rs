//! Two-dimensional formula layout.
//!
//! An [`Expression`] is laid out into a [`LayoutBlock`]: a bag of glyphs at
//! calculated points, plus a baseline used to align neighbouring blocks.
//! Blocks are built bottom-up and merged, either along their baselines
//! (horizontal runs) or along their vertical centres (fraction stacks).
//! A [`Renderer`] supplies glyph sizes during layout and receives the final
//! glyph placements to draw.

use std::cmp::max;

use crate::expr::Expression;
use crate::number::Number;

pub type Dimension = u64;

/// A glyph position relative to the top-left of the finished layout.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CalculatedPoint {
    pub x: u64,
    pub y: u64,
}

impl CalculatedPoint {
    pub fn dx(&self, delta: i64) -> CalculatedPoint {
        CalculatedPoint { x: (self.x as i64 + delta) as u64, y: self.y }
    }

    pub fn dy(&self, delta: i64) -> CalculatedPoint {
        CalculatedPoint { x: self.x, y: (self.y as i64 + delta) as u64 }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Area {
    pub width: Dimension,
    pub height: Dimension,
}

impl Area {
    pub fn new(width: Dimension, height: Dimension) -> Area {
        Area { width, height }
    }

    pub fn square(size: Dimension) -> Area {
        Area { width: size, height: size }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Glyph {
    /// A run character: digit, letter, or punctuation from a name.
    Char { ch: char },

    Add,
    Subtract,
    Multiply,

    Fraction { inner_width: Dimension },

    LeftParenthesis { inner_height: Dimension },
    RightParenthesis { inner_height: Dimension },

    /// The vertical bar of an absolute value.
    Bar { inner_height: Dimension },

    Sqrt { inner_area: Area },
}

#[derive(Debug)]
pub struct LayoutBlock {
    pub glyphs: Vec<(Glyph, CalculatedPoint)>,
    pub baseline: Dimension,
}

pub enum MergeBaseline {
    SelfAsBaseline,
    OtherAsBaseline,
}

impl LayoutBlock {
    fn empty() -> LayoutBlock {
        LayoutBlock { glyphs: vec![], baseline: 0 }
    }

    /// Creates a new layout block with one glyph at the origin. The baseline
    /// is the centre of this glyph.
    fn from_glyph(renderer: &mut impl Renderer, glyph: Glyph) -> LayoutBlock {
        LayoutBlock {
            glyphs: vec![(glyph, CalculatedPoint { x: 0, y: 0 })],
            baseline: renderer.size(glyph).height / 2,
        }
    }

    /// Creates a block with one glyph at the origin and an explicit
    /// baseline, for delimiters which must align with what they enclose.
    fn from_glyph_with_baseline(glyph: Glyph, baseline: Dimension) -> LayoutBlock {
        LayoutBlock {
            glyphs: vec![(glyph, CalculatedPoint { x: 0, y: 0 })],
            baseline,
        }
    }

    pub fn area(&self, renderer: &mut impl Renderer) -> Area {
        let mut width = 0;
        let mut height = 0;

        for (glyph, point) in &self.glyphs {
            let size = renderer.size(*glyph);
            let ex = point.x + size.width;
            let ey = point.y + size.height;
            if ex > width { width = ex }
            if ey > height { height = ey }
        }

        Area { width, height }
    }

    fn offset(&self, dx: Dimension, dy: Dimension) -> LayoutBlock {
        LayoutBlock {
            glyphs: self.glyphs
                .iter()
                .map(|(g, p)| (*g, p.dx(dx as i64).dy(dy as i64)))
                .collect(),
            baseline: self.baseline + dy,
        }
    }

    fn merge_along_baseline(&self, other: &LayoutBlock) -> LayoutBlock {
        // The points can't go negative, so shift the glyphs of the
        // lesser-baselined block down to meet the other baseline.
        let (lesser_baselined, greater_baselined) = if self.baseline < other.baseline {
            (self, other)
        } else {
            (other, self)
        };

        let baseline_difference = greater_baselined.baseline - lesser_baselined.baseline;

        let glyphs =
            lesser_baselined.glyphs
            .iter()
            .cloned()
            .map(|(g, p)| (g, p.dy(baseline_difference as i64)))
            .chain(greater_baselined.glyphs.iter().cloned())
            .collect::<Vec<_>>();

        LayoutBlock {
            glyphs,
            baseline: greater_baselined.baseline,
        }
    }

    /// Merges the glyphs of two layout blocks along their vertical centre.
    fn merge_along_vertical_centre(&self, renderer: &mut impl Renderer, other: &LayoutBlock, baseline: MergeBaseline) -> LayoutBlock {
        // The points can't go negative, so shift the glyphs of the thinner
        // block right to centre it under the wider one.
        let self_centre = self.area(renderer).width / 2;
        let other_centre = other.area(renderer).width / 2;
        let (thinner, thinner_centre, wider, wider_centre) = if self_centre < other_centre {
            (self, self_centre, other, other_centre)
        } else {
            (other, other_centre, self, self_centre)
        };

        let centre_difference = wider_centre - thinner_centre;

        let glyphs =
            thinner.glyphs
            .iter()
            .cloned()
            .map(|(g, p)| (g, p.dx(centre_difference as i64)))
            .chain(wider.glyphs.iter().cloned())
            .collect::<Vec<_>>();

        LayoutBlock {
            glyphs,
            baseline: match baseline {
                MergeBaseline::SelfAsBaseline => self.baseline,
                MergeBaseline::OtherAsBaseline => other.baseline,
            },
        }
    }

    /// Merges the glyphs of two layout blocks exactly, without moving them.
    fn merge_in_place(&self, other: &LayoutBlock, baseline: MergeBaseline) -> LayoutBlock {
        let glyphs =
            self.glyphs
            .iter()
            .cloned()
            .chain(other.glyphs.iter().cloned())
            .collect::<Vec<_>>();

        LayoutBlock {
            glyphs,
            baseline: match baseline {
                MergeBaseline::SelfAsBaseline => self.baseline,
                MergeBaseline::OtherAsBaseline => other.baseline,
            },
        }
    }

    /// Assuming that two layout blocks start at the same point, returns a
    /// clone of this block moved directly to the right of another block.
    fn move_right_of_other(&self, renderer: &mut impl Renderer, other: &LayoutBlock) -> LayoutBlock {
        self.offset(other.area(renderer).width, 0)
    }

    /// Assuming that two layout blocks start at the same point, returns a
    /// clone of this block moved directly below another block.
    fn move_below_other(&self, renderer: &mut impl Renderer, other: &LayoutBlock) -> LayoutBlock {
        self.offset(0, other.area(renderer).height)
    }
}

pub trait Renderer {
    /// Given a glyph, returns the size that it will be drawn at. This is
    /// used to calculate the layout of an expression before it is drawn.
    fn size(&mut self, glyph: Glyph) -> Area;

    /// Prepare a draw surface of the given size.
    fn init(&mut self, size: Area);

    /// Draw a glyph at a specific point.
    fn draw(&mut self, glyph: Glyph, point: CalculatedPoint);

    /// Initialises the graphics surface and draws an expression onto it.
    fn draw_all(&mut self, expr: &Expression) where Self: Sized {
        let layout = self.layout(expr);
        let area = layout.area(self);
        self.init(area);
        for (glyph, point) in layout.glyphs {
            self.draw(glyph, point);
        }
    }

    /// Computes the layout for an expression, converting it into a set of
    /// glyphs at particular locations.
    fn layout(&mut self, expr: &Expression) -> LayoutBlock where Self: Sized {
        match expr {
            Expression::Number(number) => self.layout_number(number),

            Expression::Variable(name) => self.layout_text(name),

            Expression::Negate(inner) => {
                let sign = LayoutBlock::from_glyph(self, Glyph::Subtract);
                let operand = self.layout_grouping_sums(inner);
                self.layout_horizontal(&[sign, operand])
            }

            Expression::Sum(terms) => self.layout_sum(terms),

            Expression::Product(factors) => self.layout_product(factors),

            Expression::Power(base, exp) => self.layout_power(base, exp),

            Expression::Abs(inner) => {
                let inner_layout = self.layout(inner);
                let inner_height = inner_layout.area(self).height;
                self.layout_delimited(
                    Glyph::Bar { inner_height },
                    Glyph::Bar { inner_height },
                    inner_layout,
                )
            }

            Expression::Ln(inner) => {
                let name = self.layout_text("ln");
                let inner_layout = self.layout(inner);
                let inner_height = inner_layout.area(self).height;
                let bracketed = self.layout_delimited(
                    Glyph::LeftParenthesis { inner_height },
                    Glyph::RightParenthesis { inner_height },
                    inner_layout,
                );
                self.layout_horizontal(&[name, bracketed])
            }

            Expression::Call(name, args) => {
                let name_layout = self.layout_text(name);

                let mut arg_blocks = Vec::new();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        arg_blocks.push(LayoutBlock::from_glyph(self, Glyph::Char { ch: ',' }));
                    }
                    arg_blocks.push(self.layout(arg));
                }
                let args_layout = self.layout_horizontal(&arg_blocks);

                let inner_height = args_layout.area(self).height;
                let bracketed = self.layout_delimited(
                    Glyph::LeftParenthesis { inner_height },
                    Glyph::RightParenthesis { inner_height },
                    args_layout,
                );
                self.layout_horizontal(&[name_layout, bracketed])
            }
        }
    }

    /// Lays out a number. Integers and decimals become character runs;
    /// rationals become a two-line fraction stack.
    fn layout_number(&mut self, number: &Number) -> LayoutBlock where Self: Sized {
        match number {
            Number::Rational(n, d) => {
                let top = self.layout_text(&n.to_string());
                let bottom = self.layout_text(&d.to_string());
                self.layout_fraction(top, bottom)
            }
            other => self.layout_text(&other.to_string()),
        }
    }

    /// Lays out a run of characters one-after-the-other.
    fn layout_text(&mut self, text: &str) -> LayoutBlock where Self: Sized {
        let glyph_layouts = text
            .chars()
            .map(|ch| LayoutBlock::from_glyph(self, Glyph::Char { ch }))
            .collect::<Vec<_>>();

        self.layout_horizontal(&glyph_layouts[..])
    }

    /// Lays out a sign-aware sum: a negated or negative term joins with a
    /// subtraction sign rather than rendering `+ -x`.
    fn layout_sum(&mut self, terms: &[Expression]) -> LayoutBlock where Self: Sized {
        let mut blocks = Vec::new();
        for (i, term) in terms.iter().enumerate() {
            if i == 0 {
                let block = self.layout_grouping_sums(term);
                blocks.push(block);
                continue;
            }

            match term {
                Expression::Negate(inner) => {
                    blocks.push(LayoutBlock::from_glyph(self, Glyph::Subtract));
                    let block = self.layout_grouping_sums(inner);
                    blocks.push(block);
                }
                Expression::Number(n) if n.is_negative() => {
                    blocks.push(LayoutBlock::from_glyph(self, Glyph::Subtract));
                    let block = self.layout_number(&-*n);
                    blocks.push(block);
                }
                _ => {
                    blocks.push(LayoutBlock::from_glyph(self, Glyph::Add));
                    let block = self.layout_grouping_sums(term);
                    blocks.push(block);
                }
            }
        }

        self.layout_horizontal(&blocks)
    }

    /// Lays out a product. Inverse factors are collected into the
    /// denominator of a vertical fraction; a product with none renders as a
    /// horizontal run joined by multiplication signs.
    fn layout_product(&mut self, factors: &[Expression]) -> LayoutBlock where Self: Sized {
        let mut numerator: Vec<&Expression> = Vec::new();
        let mut denominator: Vec<&Expression> = Vec::new();
        for factor in factors {
            match factor.as_inverse_factor() {
                Some(base) => denominator.push(base),
                None => numerator.push(factor),
            }
        }

        if denominator.is_empty() {
            return self.layout_factor_run(&numerator);
        }

        let top = if numerator.is_empty() {
            self.layout_text("1")
        } else {
            self.layout_factor_run(&numerator)
        };
        let bottom = self.layout_factor_run(&denominator);
        self.layout_fraction(top, bottom)
    }

    /// Lays out juxtaposed factors joined by multiplication signs. A lone
    /// factor takes no grouping parentheses; its run is a whole numerator
    /// or denominator.
    fn layout_factor_run(&mut self, factors: &[&Expression]) -> LayoutBlock where Self: Sized {
        let grouping = factors.len() > 1;
        let mut blocks = Vec::new();
        for (i, factor) in factors.iter().enumerate() {
            if i > 0 {
                blocks.push(LayoutBlock::from_glyph(self, Glyph::Multiply));
            }
            let block = match factor {
                Expression::Sum(_) | Expression::Negate(_) if grouping => {
                    self.layout_parenthesized(factor)
                }
                Expression::Number(n) if grouping && n.is_negative() => {
                    self.layout_parenthesized(factor)
                }
                other => self.layout(other),
            };
            blocks.push(block);
        }
        self.layout_horizontal(&blocks)
    }

    /// Lays out a power. A rational exponent `1/n` becomes a radical (with
    /// its degree run to the left when it is not 2); anything else becomes a
    /// raised superscript.
    fn layout_power(&mut self, base: &Expression, exp: &Expression) -> LayoutBlock where Self: Sized {
        if let Expression::Number(Number::Rational(1, degree)) = exp {
            let inner_layout = self.layout(base);
            let inner_area = inner_layout.area(self);

            let sqrt_symbol_layout = LayoutBlock::from_glyph(self, Glyph::Sqrt { inner_area });

            // The inner layout goes in the very bottom right of the symbol,
            // so work out the offset from the difference of the two areas.
            let x_offset = sqrt_symbol_layout.area(self).width - inner_area.width;
            let y_offset = sqrt_symbol_layout.area(self).height - inner_area.height;

            let radical = sqrt_symbol_layout.merge_in_place(
                &inner_layout.offset(x_offset, y_offset),
                MergeBaseline::OtherAsBaseline,
            );

            if *degree == 2 {
                return radical;
            }
            let degree_layout = self.layout_text(&degree.to_string());
            return self.layout_horizontal(&[degree_layout, radical]);
        }

        let base_layout = match base {
            Expression::Sum(_)
            | Expression::Negate(_)
            | Expression::Product(_)
            | Expression::Power(_, _) => self.layout_parenthesized(base),
            Expression::Number(n) if n.is_negative() => self.layout_parenthesized(base),
            other => self.layout(other),
        };
        let exp_layout = self.layout(exp);

        let exp_height = exp_layout.area(self).height;
        let base_width = base_layout.area(self).width;

        // Raise the exponent above the base's top edge.
        let base_layout = base_layout.offset(0, exp_height);
        let exp_layout = exp_layout.offset(base_width, 0);

        base_layout.merge_in_place(&exp_layout, MergeBaseline::SelfAsBaseline)
    }

    /// Stacks one layout above another with a fraction line between them,
    /// all centred, with the baseline on the line.
    fn layout_fraction(&mut self, top: LayoutBlock, bottom: LayoutBlock) -> LayoutBlock where Self: Sized {
        // The fraction line should be the widest of the two.
        let line_width = max(
            top.area(self).width,
            bottom.area(self).width,
        );
        let line_layout = LayoutBlock::from_glyph(self, Glyph::Fraction {
            inner_width: line_width
        }).move_below_other(self, &top);

        let bottom = bottom.move_below_other(self, &line_layout);

        top
            .merge_along_vertical_centre(self, &line_layout, MergeBaseline::OtherAsBaseline)
            .merge_along_vertical_centre(self, &bottom, MergeBaseline::SelfAsBaseline)
    }

    /// Surrounds a layout with a pair of delimiter glyphs whose baselines
    /// are pinned to the inner baseline.
    fn layout_delimited(&mut self, left: Glyph, right: Glyph, inner: LayoutBlock) -> LayoutBlock where Self: Sized {
        let left_block = LayoutBlock::from_glyph_with_baseline(left, inner.baseline);
        let right_block = LayoutBlock::from_glyph_with_baseline(right, inner.baseline);
        self.layout_horizontal(&[left_block, inner, right_block])
    }

    fn layout_parenthesized(&mut self, inner: &Expression) -> LayoutBlock where Self: Sized {
        let inner_layout = self.layout(inner);
        let inner_height = inner_layout.area(self).height;
        self.layout_delimited(
            Glyph::LeftParenthesis { inner_height },
            Glyph::RightParenthesis { inner_height },
            inner_layout,
        )
    }

    /// Parenthesizes sums only; used for operands whose own notation
    /// already separates anything tighter-binding.
    fn layout_grouping_sums(&mut self, expr: &Expression) -> LayoutBlock where Self: Sized {
        match expr {
            Expression::Sum(_) => self.layout_parenthesized(expr),
            other => self.layout(other),
        }
    }

    /// Calculates layout for a sequence of other layouts, one-after-the-other
    /// horizontally.
    fn layout_horizontal(&mut self, layouts: &[LayoutBlock]) -> LayoutBlock where Self: Sized
    {
        let mut block = LayoutBlock::empty();

        // Repeatedly merge the result block with a new block created to the
        // right of it for each layout.
        for layout in layouts {
            block = block.merge_along_baseline(
                &layout.move_right_of_other(self, &block),
            );
        }

        block
    }
}
