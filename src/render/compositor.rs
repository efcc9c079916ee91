use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::{
        decode::PreparedImage,
        fonts::{FontRegistry, ResolvedFont},
    },
    foundation::{
        core::{Affine, Canvas, Point, Rect, Rgba8, RoundedRect},
        error::{CarouselError, CarouselResult},
        math::mul_div255_u8,
    },
    project::model::{ResolvedTextStyle, TextPosition},
    render::{
        FrameRGBA,
        blur::{blur_rgba8_premul, shadow_blur_params},
        composite::{LayerPlacement, over_layer_in_place},
        crop::{cover_crop, cover_transform},
    },
    text::layout::{TextBlock, TextLayoutEngine},
};

/// Canvas width the editor preview sizes text against.
pub const REFERENCE_WIDTH: f32 = 500.0;
/// Padding between the text block and its background pad, on every side.
pub const PAD_PX: f64 = 20.0;
/// Vertical shadow offset.
pub const SHADOW_OFFSET_Y: i64 = 4;
/// Canvas-style blur value per unit of `shadowBlur`.
pub const SHADOW_BLUR_SCALE: f32 = 2.0;
/// Outline width per unit of `strokeWidth`.
pub const STROKE_WIDTH_SCALE: f32 = 2.0;
/// Default maximum line width as a fraction of the canvas width.
pub const DEFAULT_WRAP_RATIO: f32 = 0.85;

/// Everything needed to draw one slide.
#[derive(Clone, Copy, Debug)]
pub struct SlideScene<'a> {
    /// Decoded photo.
    pub image: &'a PreparedImage,
    /// Overlay text; nothing is drawn over the photo when it is blank.
    pub text: &'a str,
    /// Text anchor in percent of the canvas.
    pub position: TextPosition,
    /// Global text style.
    pub style: &'a ResolvedTextStyle,
    /// Output surface.
    pub canvas: Canvas,
}

#[derive(Clone, Copy, Debug)]
enum InkKind {
    Stroke(f32),
    Fill,
}

/// One glyph draw with its own effects; nothing carries over to the next draw.
#[derive(Clone, Copy, Debug)]
struct InkPass {
    kind: InkKind,
    color: Rgba8,
    shadow: Option<(Rgba8, f32)>,
}

/// Draws slides: cover-cropped photo, optional pad, then shadowed/stroked/filled text.
pub struct SlideCompositor {
    fonts: FontRegistry,
    layout: TextLayoutEngine,
    font_data: HashMap<(String, u32), vello_cpu::peniko::FontData>,
    wrap_ratio: f32,
}

impl SlideCompositor {
    /// Compositor drawing text with faces from `fonts`.
    pub fn new(fonts: FontRegistry) -> Self {
        Self {
            fonts,
            layout: TextLayoutEngine::new(),
            font_data: HashMap::new(),
            wrap_ratio: DEFAULT_WRAP_RATIO,
        }
    }

    /// Override the maximum line width ratio; non-positive values disable wrapping.
    pub fn with_wrap_ratio(mut self, wrap_ratio: f32) -> Self {
        self.wrap_ratio = wrap_ratio;
        self
    }

    #[tracing::instrument(
        skip_all,
        fields(width = scene.canvas.width, height = scene.canvas.height)
    )]
    pub fn compose(&mut self, scene: &SlideScene<'_>) -> CarouselResult<FrameRGBA> {
        let canvas = scene.canvas;
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CarouselError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CarouselError::render("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(CarouselError::render("canvas must be non-empty"));
        }

        let text = scene.text.trim();
        let overlay = if text.is_empty() {
            None
        } else {
            Some(self.shape_overlay(text, scene)?)
        };

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw_cover_image(&mut ctx, scene.image, canvas)?;
        if let (Some((block, _, origin)), Some((pad_color, radius))) =
            (&overlay, scene.style.background)
        {
            draw_pad(&mut ctx, block, *origin, pad_color, radius);
        }
        ctx.flush();

        let mut base = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut base);
        let mut data = base.data_as_u8_slice().to_vec();

        if let Some((block, font, origin)) = &overlay {
            let font = self.font_data_for(font);
            for pass in ink_passes(scene.style) {
                draw_ink(&mut data, canvas, block, &font, *origin, pass)?;
            }
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        })
    }

    /// Shape the overlay and return it with the top-left corner of its centered block.
    fn shape_overlay(
        &mut self,
        text: &str,
        scene: &SlideScene<'_>,
    ) -> CarouselResult<(TextBlock, ResolvedFont, Point)> {
        let canvas = scene.canvas;
        let width = canvas.width as f32;
        let font = self.fonts.resolve(scene.style.family)?;
        let size_px = scene.style.font_size * width / REFERENCE_WIDTH;
        let max_width = (self.wrap_ratio > 0.0).then(|| self.wrap_ratio * width);

        let block = self
            .layout
            .layout_centered(text, &font, size_px, max_width)?;

        let anchor = Point::new(
            scene.position.x / 100.0 * f64::from(canvas.width),
            scene.position.y / 100.0 * f64::from(canvas.height),
        );
        let origin = Point::new(
            anchor.x - f64::from(block.width) / 2.0,
            anchor.y - f64::from(block.height) / 2.0,
        );
        tracing::debug!(
            lines = block.line_count,
            size_px,
            font = %font.family,
            "text overlay shaped"
        );
        Ok((block, font, origin))
    }

    fn font_data_for(&mut self, font: &ResolvedFont) -> vello_cpu::peniko::FontData {
        self.font_data
            .entry((font.family.clone(), font.index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
                    font.index,
                )
            })
            .clone()
    }
}

/// Stroke (if enabled) then fill, each carrying its own copy of the shadow.
fn ink_passes(style: &ResolvedTextStyle) -> Vec<InkPass> {
    let shadow = style
        .shadow
        .map(|(color, blur)| (color, blur * SHADOW_BLUR_SCALE));
    let mut passes = Vec::with_capacity(2);
    if let Some((color, width)) = style.stroke {
        passes.push(InkPass {
            kind: InkKind::Stroke(width * STROKE_WIDTH_SCALE),
            color,
            shadow,
        });
    }
    passes.push(InkPass {
        kind: InkKind::Fill,
        color: style.color,
        shadow,
    });
    passes
}

fn draw_cover_image(
    ctx: &mut vello_cpu::RenderContext,
    image: &PreparedImage,
    canvas: Canvas,
) -> CarouselResult<()> {
    let pixmap =
        image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let crop = cover_crop(image.width, image.height, canvas.aspect());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(cover_transform(crop, canvas)));
    ctx.set_paint(paint);
    ctx.fill_rect(&rect_to_cpu(crop));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn draw_pad(
    ctx: &mut vello_cpu::RenderContext,
    block: &TextBlock,
    origin: Point,
    color: Rgba8,
    radius: f32,
) {
    let rect = Rect::new(
        origin.x,
        origin.y,
        origin.x + f64::from(block.width),
        origin.y + f64::from(block.height),
    )
    .inflate(PAD_PX, PAD_PX);
    let pad = RoundedRect::from_rect(rect, f64::from(radius));

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color.to_cpu_color());
    ctx.fill_path(&shape_to_cpu(&pad));
}

/// Render one ink pass into a layer around the visible part of the block, then shadow and
/// composite it.
fn draw_ink(
    dst: &mut [u8],
    canvas: Canvas,
    block: &TextBlock,
    font: &vello_cpu::peniko::FontData,
    origin: Point,
    pass: InkPass,
) -> CarouselResult<()> {
    let stroke_half = match pass.kind {
        InkKind::Stroke(width) => width / 2.0,
        InkKind::Fill => 0.0,
    };
    let blur = pass
        .shadow
        .map(|(_, value)| shadow_blur_params(value))
        .unwrap_or((0, 0.0));
    // Room for glyph overhang past the advance box, the outline and the blur tail.
    let margin = f64::from((block.size_px * 0.5 + stroke_half + blur.0 as f32 + 2.0).ceil());
    let wanted = Rect::new(
        origin.x,
        origin.y,
        origin.x + f64::from(block.width),
        origin.y + f64::from(block.height),
    )
    .inflate(margin, margin);

    // Ink farther from the canvas than the blur reach (plus the shadow offset) never shows.
    let reach_x = f64::from(blur.0) + 2.0;
    let reach_y = reach_x + SHADOW_OFFSET_Y as f64;
    let visible = wanted.intersect(canvas.rect().inflate(reach_x, reach_y));
    if visible.width() <= 0.0 || visible.height() <= 0.0 {
        return Ok(());
    }

    let layer_x = visible.x0.floor();
    let layer_y = visible.y0.floor();
    let layer_w = (visible.x1 - layer_x).ceil() + 1.0;
    let layer_h = (visible.y1 - layer_y).ceil() + 1.0;
    let max = f64::from(u16::MAX);
    if layer_w > max || layer_h > max {
        return Err(CarouselError::render("text layer exceeds u16 bounds"));
    }
    let (lw, lh) = (layer_w as u16, layer_h as u16);

    // Glyphs whose em box misses the layer are dropped before rasterization.
    let slack = f64::from(block.size_px + stroke_half);
    let keep = Rect::new(
        layer_x - origin.x,
        layer_y - origin.y,
        layer_x + layer_w - origin.x,
        layer_y + layer_h - origin.y,
    )
    .inflate(slack, slack);

    let mut ctx = vello_cpu::RenderContext::new(lw, lh);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        origin.x - layer_x,
        origin.y - layer_y,
    )));
    ctx.set_paint(pass.color.to_cpu_color());
    let glyphs = block
        .glyphs
        .iter()
        .filter(|g| keep.contains(Point::new(f64::from(g.x), f64::from(g.y))))
        .map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
    match pass.kind {
        InkKind::Stroke(width) => {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(width)));
            ctx.glyph_run(font)
                .font_size(block.size_px)
                .stroke_glyphs(glyphs);
        }
        InkKind::Fill => {
            ctx.glyph_run(font)
                .font_size(block.size_px)
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();
    let mut layer = vello_cpu::Pixmap::new(lw, lh);
    ctx.render_to_pixmap(&mut layer);
    let ink = layer.data_as_u8_slice();

    let placement = LayerPlacement {
        dst_width: canvas.width,
        dst_height: canvas.height,
        src_width: u32::from(lw),
        src_height: u32::from(lh),
        x: layer_x as i64,
        y: layer_y as i64,
    };

    if let Some((shadow_color, _)) = pass.shadow {
        let tinted = tint_coverage(ink, shadow_color);
        let shadow = blur_rgba8_premul(
            &tinted,
            placement.src_width,
            placement.src_height,
            blur.0,
            blur.1,
        )?;
        over_layer_in_place(
            dst,
            &shadow,
            LayerPlacement {
                y: placement.y + SHADOW_OFFSET_Y,
                ..placement
            },
        )?;
    }
    over_layer_in_place(dst, ink, placement)
}

/// Premultiplied `color` scaled by the coverage (alpha) of each `ink` pixel.
fn tint_coverage(ink: &[u8], color: Rgba8) -> Vec<u8> {
    let base = color.to_premul();
    let mut out = vec![0u8; ink.len()];
    for (dst, src) in out.chunks_exact_mut(4).zip(ink.chunks_exact(4)) {
        let cov = u16::from(src[3]);
        if cov == 0 {
            continue;
        }
        for c in 0..4 {
            dst[c] = mul_div255_u8(u16::from(base[c]), cov);
        }
    }
    out
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CarouselResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CarouselError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CarouselError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CarouselError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
