//! Whole-frame composition: phone chrome, screen background (poster or
//! synthetic video scene), title block and subtitle, in painter's order.

use std::sync::Arc;

use kurbo::Shape;

use crate::assets::color::Rgba;
use crate::assets::decode::PreparedImage;
use crate::assets::fonts::FontRegistry;
use crate::foundation::core::{Affine, BezPath, Canvas, Circle, Ellipse, FrameRgba, Point, Rect};
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::layout::metrics::TextKind;
use crate::render::paint::{
    self, Surface, affine_to_cpu, bezpath_to_cpu, diagonal_gradient_pixmap, image_paint,
    radial_fade_pixmap,
};
use crate::render::text::{Region, TextElement, TextPainter, TextPlacement};
use crate::render::title::draw_title;
use crate::style::model::{PlaceholderMode, StyleConfig};

const SUBTITLE_PLACEHOLDER: &str = "示例字幕文本";

const FRAME_THICKNESS: f64 = 12.0;
const FRAME_CORNER_RADIUS: f64 = 25.0;
const SCREEN_CORNER_RADIUS: f64 = 17.0;
const STATUS_BAR_INSET: f64 = 20.0;

/// Inputs for one rendered frame.
pub struct SceneParams<'a> {
    pub config: &'a StyleConfig,
    pub poster: Option<&'a PreparedImage>,
    pub mode: PlaceholderMode,
}

/// Render a full preview frame. A zero-sized canvas yields an empty frame.
pub fn render_scene(
    painter: &mut TextPainter,
    registry: &mut FontRegistry,
    canvas: Canvas,
    params: SceneParams<'_>,
) -> PreviewResult<FrameRgba> {
    if canvas.is_empty() {
        return Ok(FrameRgba {
            width: canvas.width,
            height: canvas.height,
            data: Vec::new(),
        });
    }
    let frame_w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PreviewError::validation("canvas width exceeds u16"))?;
    let frame_h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PreviewError::validation("canvas height exceeds u16"))?;

    let w = f64::from(frame_w);
    let h = f64::from(frame_h);
    let mut frame = Surface::new(frame_w, frame_h);

    draw_phone_body(&mut frame, w, h)?;

    // Screen content is rendered on its own surface and composited through
    // the rounded screen path, which stands in for canvas clipping.
    let screen_w = w - FRAME_THICKNESS * 2.0;
    let screen_h = h - FRAME_THICKNESS * 2.0 - STATUS_BAR_INSET * 2.0;
    if screen_w >= 1.0 && screen_h >= 1.0 {
        let mut screen = Surface::new(screen_w as u16, screen_h as u16);
        let sw = f64::from(screen_w as u16);
        let sh = f64::from(screen_h as u16);

        match params.poster {
            Some(poster) => draw_poster_background(&mut screen, poster, sw, sh)?,
            None => draw_synthetic_background(&mut screen, painter, registry, sw, sh)?,
        }

        let region = Region {
            width: sw,
            height: sh,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        draw_title(
            painter,
            &mut screen,
            registry,
            region,
            &params.config.title,
            params.mode,
        );
        draw_subtitle(painter, &mut screen, registry, region, &params);

        let screen_x = FRAME_THICKNESS;
        let screen_y = FRAME_THICKNESS + STATUS_BAR_INSET;
        let content = Arc::new(screen.frame().clone());
        let screen_path = rounded_rect_path(0.0, 0.0, sw, sh, SCREEN_CORNER_RADIUS);
        frame.pass(|ctx| {
            ctx.set_transform(affine_to_cpu(Affine::translate((screen_x, screen_y))));
            ctx.set_paint(image_paint(content));
            ctx.fill_path(&bezpath_to_cpu(&screen_path));
            Ok(())
        })?;
    }

    draw_chrome_details(&mut frame, w, h)?;

    Ok(FrameRgba {
        width: canvas.width,
        height: canvas.height,
        data: frame.frame_bytes().to_vec(),
    })
}

/// Rounded phone body filled with a dark three-stop diagonal gradient.
fn draw_phone_body(frame: &mut Surface, w: f64, h: f64) -> PreviewResult<()> {
    let gradient = diagonal_gradient_pixmap(
        u32::from(frame.width()),
        u32::from(frame.height()),
        &[
            (0.0, [0x1a, 0x1a, 0x1a]),
            (0.5, [0x2a, 0x2a, 0x2a]),
            (1.0, [0x1a, 0x1a, 0x1a]),
        ],
    )?;
    let body = rounded_rect_path(0.0, 0.0, w, h, FRAME_CORNER_RADIUS);
    frame.pass(|ctx| {
        ctx.set_paint(image_paint(Arc::new(gradient)));
        ctx.fill_path(&bezpath_to_cpu(&body));
        Ok(())
    })
}

/// Earpiece, front camera and home indicator. All sit on the frame band
/// outside the screen cut-out.
fn draw_chrome_details(frame: &mut Surface, w: f64, h: f64) -> PreviewResult<()> {
    let earpiece = rounded_rect_path(w / 2.0 - 25.0, 8.0, w / 2.0 + 25.0, 12.0, 2.0);
    let camera = Circle::new(Point::new(w / 2.0 + 40.0, 12.0), 3.0).to_path(0.1);
    let home = rounded_rect_path(w / 2.0 - 30.0, h - 12.0, w / 2.0 + 30.0, h - 9.0, 2.0);
    frame.pass(|ctx| {
        ctx.set_paint(color(0x33, 0x33, 0x33, 1.0));
        ctx.fill_path(&bezpath_to_cpu(&earpiece));
        ctx.set_paint(color(0x11, 0x11, 0x11, 1.0));
        ctx.fill_path(&bezpath_to_cpu(&camera));
        ctx.set_paint(color(0x44, 0x44, 0x44, 1.0));
        ctx.fill_path(&bezpath_to_cpu(&home));
        Ok(())
    })
}

/// Cover-fit the poster over the screen area and dim it for legibility.
fn draw_poster_background(
    screen: &mut Surface,
    poster: &PreparedImage,
    sw: f64,
    sh: f64,
) -> PreviewResult<()> {
    if poster.width == 0 || poster.height == 0 {
        return Err(PreviewError::asset("poster image has zero dimension"));
    }
    let pixmap = paint::pixmap_from_premul_bytes(&poster.rgba8_premul, poster.width, poster.height)?;
    let img_w = f64::from(poster.width);
    let img_h = f64::from(poster.height);

    let img_ratio = img_w / img_h;
    let area_ratio = sw / sh;
    let (draw_w, draw_h) = if img_ratio > area_ratio {
        (sh * img_ratio, sh)
    } else {
        (sw, sw / img_ratio)
    };
    let offset_x = (sw - draw_w) / 2.0;
    let offset_y = (sh - draw_h) / 2.0;

    let transform =
        Affine::translate((offset_x, offset_y)) * Affine::scale_non_uniform(draw_w / img_w, draw_h / img_h);
    let paint = image_paint(Arc::new(pixmap));
    screen.pass(|ctx| {
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, img_w, img_h));
        Ok(())
    })?;

    screen.pass(|ctx| {
        ctx.set_paint(color(0, 0, 0, 0.3));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, sw, sh));
        Ok(())
    })
}

/// Dark gradient plus the decorative "sample video" scene drawn when no
/// poster is configured.
fn draw_synthetic_background(
    screen: &mut Surface,
    painter: &mut TextPainter,
    registry: &mut FontRegistry,
    sw: f64,
    sh: f64,
) -> PreviewResult<()> {
    let gradient = diagonal_gradient_pixmap(
        u32::from(screen.width()),
        u32::from(screen.height()),
        &[(0.0, [0x40, 0x40, 0x40]), (1.0, [0x2a, 0x2a, 0x2a])],
    )?;
    screen.pass(|ctx| {
        ctx.set_paint(image_paint(Arc::new(gradient)));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, sw, sh));
        Ok(())
    })?;

    // 16:9 video strip centered in the screen, height derived from the
    // width after the 90% clamp.
    let vw = (sh * 0.5 * 16.0 / 9.0).min(sw * 0.9);
    let vh = vw * 9.0 / 16.0;
    if vw < 1.0 || vh < 1.0 {
        return Ok(());
    }
    let vx = (sw - vw) / 2.0;
    let vy = (sh - vh) / 2.0;

    screen.pass(|ctx| {
        // Video area wash.
        ctx.set_paint(color(60, 70, 80, 0.4));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(vx, vy, vx + vw, vy + vh));

        // Silhouettes.
        ctx.set_paint(color(100, 120, 140, 0.4));
        let figure1 = Ellipse::new(
            Point::new(vx + vw * 0.25, vy + vh * 0.4),
            (vw * 0.08, vh * 0.12),
            0.0,
        );
        ctx.fill_path(&bezpath_to_cpu(&figure1.to_path(0.1)));
        let figure2 = Ellipse::new(
            Point::new(vx + vw * 0.75, vy + vh * 0.6),
            (vw * 0.06, vh * 0.1),
            0.0,
        );
        ctx.fill_path(&bezpath_to_cpu(&figure2.to_path(0.1)));

        // Building blocks.
        ctx.set_paint(color(80, 100, 120, 0.3));
        ctx.fill_rect(&cpu_rect(vx + vw * 0.1, vy + vh * 0.3, vw * 0.15, vh * 0.4));
        ctx.fill_rect(&cpu_rect(vx + vw * 0.75, vy + vh * 0.25, vw * 0.2, vh * 0.5));

        // Motion streaks.
        ctx.set_paint(color(150, 170, 190, 0.2));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        for i in 0..5 {
            let t = f64::from(i) * 0.2;
            let mut line = BezPath::new();
            line.move_to(Point::new(vx + vw * (0.1 + t), vy + vh * 0.2));
            line.line_to(Point::new(vx + vw * (0.15 + t), vy + vh * 0.8));
            ctx.stroke_path(&bezpath_to_cpu(&line));
        }
        Ok(())
    })?;

    // Soft light bloom in the upper middle of the video area.
    let light = radial_fade_pixmap(
        vw.ceil() as u32,
        vh.ceil() as u32,
        Point::new(vw * 0.5, vh * 0.3),
        vw * 0.3,
        [255, 255, 255],
        0.08,
    )?;
    screen.pass(|ctx| {
        ctx.set_transform(affine_to_cpu(Affine::translate((vx, vy))));
        ctx.set_paint(image_paint(Arc::new(light)));
        ctx.fill_rect(&cpu_rect(0.0, 0.0, vw, vh));
        Ok(())
    })?;

    screen.pass(|ctx| {
        // Progress bar: dim track, bright played portion.
        ctx.set_paint(color(255, 255, 255, 0.15));
        ctx.fill_rect(&cpu_rect(vx + vw * 0.05, vy + vh * 0.92, vw * 0.9, 2.0));
        ctx.set_paint(color(24, 144, 255, 0.9));
        ctx.fill_rect(&cpu_rect(vx + vw * 0.05, vy + vh * 0.92, vw * 0.4, 2.0));

        // Play button.
        let size = vw.min(vh) * 0.15;
        let cx = vx + vw / 2.0;
        let cy = vy + vh / 2.0;
        let disc = Circle::new(Point::new(cx, cy), size).to_path(0.1);
        ctx.set_paint(color(240, 240, 240, 0.8));
        ctx.fill_path(&bezpath_to_cpu(&disc));
        ctx.set_paint(color(200, 200, 200, 0.9));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(2.0));
        ctx.stroke_path(&bezpath_to_cpu(&disc));

        let tri = size * 0.4;
        let mut triangle = BezPath::new();
        triangle.move_to(Point::new(cx - tri * 0.3, cy - tri * 0.6));
        triangle.line_to(Point::new(cx - tri * 0.3, cy + tri * 0.6));
        triangle.line_to(Point::new(cx + tri * 0.7, cy));
        triangle.close_path();
        ctx.set_paint(color(100, 100, 100, 0.9));
        ctx.fill_path(&bezpath_to_cpu(&triangle));

        // Label plate.
        ctx.set_paint(color(50, 50, 50, 0.8));
        ctx.fill_rect(&cpu_rect(vx + vw * 0.02, vy + vh * 0.02, vw * 0.25, vh * 0.08));
        Ok(())
    })?;

    painter.draw_plain(
        screen,
        registry,
        "案例视频",
        (vw * 0.03).max(10.0),
        Rgba::new(255, 255, 255, 0.9),
        vx + vw * 0.145,
        vy + vh * 0.065,
    )
}

fn draw_subtitle(
    painter: &mut TextPainter,
    screen: &mut Surface,
    registry: &mut FontRegistry,
    region: Region,
    params: &SceneParams<'_>,
) {
    let style = &params.config.subtitle;
    let text = match params.mode {
        PlaceholderMode::Preview => SUBTITLE_PLACEHOLDER,
        PlaceholderMode::Production => match style.text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return,
        },
    };
    painter.draw(
        screen,
        registry,
        region,
        TextElement {
            text,
            style,
            kind: TextKind::Subtitle,
            placement: TextPlacement::Anchored,
        },
    );
}

/// Rounded rectangle with the radius clamped to half the shorter side, so
/// degenerate sizes still produce a valid path.
fn rounded_rect_path(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) -> BezPath {
    let rect = Rect::new(x0, y0, x1, y1);
    let r = radius.min((rect.width().min(rect.height()) / 2.0).floor());
    kurbo::RoundedRect::from_rect(rect, r.max(0.0)).to_path(0.1)
}

fn cpu_rect(x: f64, y: f64, w: f64, h: f64) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(x, y, x + w, y + h)
}

fn color(r: u8, g: u8, b: u8, a: f64) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, (a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
