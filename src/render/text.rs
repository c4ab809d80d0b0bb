//! Styled text rendering: background box, stroke, shadow and fill for one
//! text element, layered in that order.

use std::collections::HashMap;

use kurbo::Shape;

use crate::assets::color::{Rgba, parse_css_color};
use crate::assets::fonts::{FontRegistry, TextBrushRgba8, TextShapeSpec};
use crate::foundation::core::{Rect, RoundedRect};
use crate::foundation::error::PreviewResult;
use crate::layout::metrics::{
    self, TextExtents, TextKind, baseline_y, centered_x, font_scale, scaled_font_px,
    scaled_hairline,
};
use crate::render::paint::{Surface, bezpath_to_cpu};
use crate::style::model::{Alignment, FontStyle};

/// How a text element is anchored inside its region.
#[derive(Clone, Copy, Debug)]
pub enum TextPlacement {
    /// Horizontally centered, vertically per the style's `position`.
    Anchored,
    /// Absolute top Y with alignment-driven X, used by the stacked
    /// main/sub title area.
    Absolute { y: f64, alignment: Alignment },
}

/// One text element to draw.
#[derive(Clone, Copy, Debug)]
pub struct TextElement<'a> {
    pub text: &'a str,
    pub style: &'a FontStyle,
    pub kind: TextKind,
    pub placement: TextPlacement,
}

/// The region a text element is laid out against: the simulated screen
/// area, offset within the full frame.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Region {
    pub fn scale(&self) -> f64 {
        font_scale(self.width, self.height)
    }
}

/// Background used when a style resolves none. Both are fully transparent
/// and therefore invisible, but the parsed value is part of the contract
/// with the backend renderer.
pub fn fallback_background(kind: TextKind) -> Rgba {
    match kind {
        TextKind::Title => Rgba::new(0xCE, 0xC9, 0x70, 0.0),
        TextKind::Subtitle => Rgba::new(0xFF, 0xFF, 0xFF, 0.0),
    }
}

/// Draws text elements onto a [`Surface`], caching per-font glyph data
/// across elements.
#[derive(Default)]
pub struct TextPainter {
    glyph_fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl TextPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one element. Failures are logged and swallowed so a bad style
    /// never takes down the rest of the scene.
    pub fn draw(
        &mut self,
        surface: &mut Surface,
        registry: &mut FontRegistry,
        region: Region,
        element: TextElement<'_>,
    ) {
        if let Err(err) = self.draw_inner(surface, registry, region, element) {
            tracing::warn!(
                text = element.text,
                kind = ?element.kind,
                error = %err,
                "text element skipped",
            );
        }
    }

    fn draw_inner(
        &mut self,
        surface: &mut Surface,
        registry: &mut FontRegistry,
        region: Region,
        element: TextElement<'_>,
    ) -> PreviewResult<()> {
        let style = element.style;
        let raw_size = style
            .font_size
            .unwrap_or_else(|| element.kind.default_font_size());
        if raw_size <= 0.0 {
            return Ok(());
        }

        let scale = region.scale();
        let scaled_size = scaled_font_px(raw_size, scale);

        let default_fill = match element.placement {
            TextPlacement::Anchored => "#ffffff",
            TextPlacement::Absolute { .. } => "#000000",
        };
        let fill = style.fill_color_or(default_fill);

        let stack = std::borrow::Cow::Owned(
            registry
                .resolved_stack(style.font_family.as_deref(), style.font_url.is_some())
                .into_owned(),
        );
        let spec = TextShapeSpec {
            stack,
            size_px: scaled_size as f32,
            brush: brush_of(fill),
            bold: style.bold,
            italic: style.italic,
            letter_spacing: style.letter_spacing.map(|ls| (ls * scale) as f32),
        };
        let layout = registry.layout(element.text, &spec)?;
        let extents = extents_of(&layout, element.text, scaled_size);

        let (x, baseline) = match element.placement {
            TextPlacement::Anchored => (
                centered_x(extents.width, region.width, region.offset_x),
                baseline_y(
                    style.position,
                    element.kind,
                    extents,
                    region.height,
                    region.offset_y,
                ),
            ),
            TextPlacement::Absolute { y, alignment } => (
                metrics::aligned_x(alignment, extents.width, region.width, region.offset_x),
                y + extents.ascent,
            ),
        };

        let background = style
            .background_rgba()
            .unwrap_or_else(|| fallback_background(element.kind));
        if background.a > 0.0 {
            self.draw_background(surface, background, x, baseline, extents, scale)?;
        }

        if let Some(stroke_width) = style.stroke_width.filter(|w| *w > 0.0)
            && let Some(stroke_color) = style
                .stroke_color
                .as_deref()
                .and_then(|c| parse_css_color(c, None))
        {
            let width = scaled_hairline(stroke_width, scale) * 2.0;
            self.glyph_pass(surface, &layout, (x, baseline - extents.ascent), stroke_color, Some(width))?;
        }

        if style.shadow
            && let Some(shadow_color) = style
                .shadow_color
                .as_deref()
                .and_then(|c| parse_css_color(c, None))
        {
            let blur = (4.0 * scale).max(1.0);
            let offset = scaled_hairline(2.0, scale);
            let origin = (x + offset, baseline - extents.ascent + offset);
            let fonts = &mut self.glyph_fonts;
            surface.pass_blurred(blur, |ctx| {
                glyph_pass_on(fonts, ctx, &layout, origin, shadow_color, None)
            })?;
        }

        self.glyph_pass(surface, &layout, (x, baseline - extents.ascent), fill, None)
    }

    fn draw_background(
        &mut self,
        surface: &mut Surface,
        background: Rgba,
        x: f64,
        baseline: f64,
        extents: TextExtents,
        scale: f64,
    ) -> PreviewResult<()> {
        let pad_x = (8.0 * scale).max(8.0);
        let pad_y = (4.0 * scale).max(6.0);
        let rect = Rect::new(
            x - pad_x,
            baseline - extents.ascent - pad_y,
            x - pad_x + extents.width + pad_x * 2.0,
            baseline - extents.ascent - pad_y + extents.height() + pad_y * 2.0,
        );
        let radius = (pad_y + 2.0).floor().min(8.0);
        let path = RoundedRect::from_rect(rect, radius).to_path(0.1);
        let cpu_path = bezpath_to_cpu(&path);
        surface.pass(|ctx| {
            ctx.set_paint(color_of(background));
            ctx.fill_path(&cpu_path);
            Ok(())
        })
    }

    /// Draw unstyled text in the fallback family, centered on `center_x`
    /// with its baseline at `baseline`. Used for decorative scene labels.
    pub fn draw_plain(
        &mut self,
        surface: &mut Surface,
        registry: &mut FontRegistry,
        text: &str,
        size_px: f64,
        color: Rgba,
        center_x: f64,
        baseline: f64,
    ) -> PreviewResult<()> {
        let spec = TextShapeSpec {
            stack: std::borrow::Cow::Owned(registry.resolved_stack(None, false).into_owned()),
            size_px: size_px as f32,
            brush: brush_of(color),
            bold: false,
            italic: false,
            letter_spacing: None,
        };
        let layout = registry.layout(text, &spec)?;
        let extents = extents_of(&layout, text, size_px);
        let origin = (center_x - extents.width / 2.0, baseline - extents.ascent);
        self.glyph_pass(surface, &layout, origin, color, None)
    }

    fn glyph_pass(
        &mut self,
        surface: &mut Surface,
        layout: &parley::Layout<TextBrushRgba8>,
        origin: (f64, f64),
        color: Rgba,
        stroke_width: Option<f64>,
    ) -> PreviewResult<()> {
        let fonts = &mut self.glyph_fonts;
        surface.pass(|ctx| glyph_pass_on(fonts, ctx, layout, origin, color, stroke_width))
    }
}

/// Emit every glyph run of a layout at the given top-left origin.
fn glyph_pass_on(
    fonts: &mut HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    origin: (f64, f64),
    color: Rgba,
    stroke_width: Option<f64>,
) -> PreviewResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.0, origin.1)));
    if let Some(width) = stroke_width {
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width)
                .with_join(vello_cpu::kurbo::Join::Round)
                .with_miter_limit(2.0),
        );
    }
    ctx.set_paint(color_of(color));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let font = font_for(fonts, run.run().font());
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let builder = ctx.glyph_run(&font).font_size(run.run().font_size());
            if stroke_width.is_some() {
                builder.stroke_glyphs(glyphs);
            } else {
                builder.fill_glyphs(glyphs);
            }
        }
    }
    Ok(())
}

fn font_for(
    fonts: &mut HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    font: &parley::Font,
) -> vello_cpu::peniko::FontData {
    let key = (font.data.id(), font.index);
    if let Some(cached) = fonts.get(&key) {
        return cached.clone();
    }
    let bytes = font.data.as_ref().to_vec();
    let data =
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), font.index);
    fonts.insert(key, data.clone());
    data
}

/// Extents of a shaped layout, with the estimates the backend uses when a
/// measurement comes back empty.
fn extents_of(
    layout: &parley::Layout<TextBrushRgba8>,
    text: &str,
    scaled_size: f64,
) -> TextExtents {
    let mut width = f64::from(layout.width());
    if width <= 0.0 && !text.is_empty() {
        width = text.chars().count() as f64 * scaled_size * 0.6;
    }
    match layout.lines().next() {
        Some(line) => {
            let m = line.metrics();
            TextExtents {
                width,
                ascent: f64::from(m.ascent),
                descent: f64::from(m.descent),
            }
        }
        None => TextExtents {
            width,
            ascent: (scaled_size * 0.8).round(),
            descent: (scaled_size * 0.25).round(),
        },
    }
}

fn brush_of(color: Rgba) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    }
}

fn color_of(color: Rgba) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(
        color.r,
        color.g,
        color.b,
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
