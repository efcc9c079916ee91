use std::{borrow::Cow, collections::HashMap};

use crate::{
    assets::fonts::ResolvedFont,
    foundation::error::{CarouselError, CarouselResult},
};

/// A glyph id with its pen position relative to the block's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph id in the font the block was shaped with.
    pub id: u32,
    /// Horizontal pen position.
    pub x: f32,
    /// Baseline position.
    pub y: f32,
}

/// Shaped text ready for drawing: glyphs positioned relative to the block's top-left corner,
/// with every line centered horizontally inside the block.
#[derive(Clone, Debug)]
pub struct TextBlock {
    /// Positioned glyphs.
    pub glyphs: Vec<PositionedGlyph>,
    /// Width of the widest line (trailing whitespace excluded).
    pub width: f32,
    /// Total height of all lines.
    pub height: f32,
    /// Font size the glyphs were shaped at.
    pub size_px: f32,
    /// Number of lines after wrapping.
    pub line_count: usize,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    registered: HashMap<String, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    fn family_name_for(&mut self, font: &ResolvedFont) -> CarouselResult<String> {
        if let Some(name) = self.registered.get(&font.family) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CarouselError::render("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CarouselError::render("registered font family has no name"))?
            .to_string();

        self.registered.insert(font.family.clone(), name.clone());
        Ok(name)
    }

    /// Shape `text`, wrap at `max_width_px` (if any) and center each line.
    ///
    /// Explicit newlines in `text` always start a new line.
    pub fn layout_centered(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        max_width_px: Option<f32>,
    ) -> CarouselResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CarouselError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_name_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let line_widths: Vec<f32> = layout
            .lines()
            .map(|line| {
                let m = line.metrics();
                (m.advance - m.trailing_whitespace).max(0.0)
            })
            .collect();
        let width = line_widths.iter().copied().fold(0.0f32, f32::max);

        let mut glyphs = Vec::new();
        for (line, line_width) in layout.lines().zip(&line_widths) {
            let dx = (width - line_width) / 2.0;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PositionedGlyph {
                    id: g.id,
                    x: g.x + dx,
                    y: g.y,
                }));
            }
        }

        Ok(TextBlock {
            glyphs,
            width,
            height: layout.height(),
            size_px,
            line_count: line_widths.len(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
