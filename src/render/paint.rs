//! Bridging helpers between our geometry/color types and the `vello_cpu`
//! painting surface, plus the procedurally generated gradient pixmaps used
//! by the synthetic background.

use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::{PreviewError, PreviewResult};

/// Premultiply a straight RGBA color into the pixel layout `vello_cpu`
/// composites with.
pub fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = u16::from(a) + 1;
    let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

/// Wrap a premultiplied RGBA8 byte buffer as a pixmap.
pub fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PreviewResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PreviewError::draw("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PreviewError::draw("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PreviewError::draw("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Image paint sampling the given pixmap at its natural size.
pub fn image_paint(pixmap: Arc<vello_cpu::Pixmap>) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(pixmap),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

pub fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
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

/// Pixmap filled with an opaque linear gradient along the main diagonal.
/// `stops` are `(offset, rgb)` pairs sorted by offset in `0..=1`.
pub fn diagonal_gradient_pixmap(
    width: u32,
    height: u32,
    stops: &[(f64, [u8; 3])],
) -> PreviewResult<vello_cpu::Pixmap> {
    if stops.is_empty() {
        return Err(PreviewError::draw("gradient needs at least one stop"));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PreviewError::draw("gradient buffer size overflow"))?;
    let mut bytes = vec![0u8; len];
    let denom = (width as f64 - 1.0).max(1.0) + (height as f64 - 1.0).max(1.0);
    for y in 0..height {
        for x in 0..width {
            let t = (x as f64 + y as f64) / denom;
            let rgb = gradient_sample(stops, t);
            let idx = ((y * width + x) as usize) * 4;
            bytes[idx..idx + 3].copy_from_slice(&rgb);
            bytes[idx + 3] = 255;
        }
    }
    pixmap_from_premul_bytes(&bytes, width, height)
}

fn gradient_sample(stops: &[(f64, [u8; 3])], t: f64) -> [u8; 3] {
    let first = stops[0];
    let last = stops[stops.len() - 1];
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
            let mut rgb = [0u8; 3];
            for c in 0..3 {
                let v = f64::from(c0[c]) + (f64::from(c1[c]) - f64::from(c0[c])) * f;
                rgb[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            return rgb;
        }
    }
    last.1
}

/// Pixmap containing a soft radial highlight: `color` at `alpha` in the
/// center, fading linearly to transparent at `radius`. Everything outside
/// the radius is fully transparent.
pub fn radial_fade_pixmap(
    width: u32,
    height: u32,
    center: Point,
    radius: f64,
    color: [u8; 3],
    alpha: f64,
) -> PreviewResult<vello_cpu::Pixmap> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PreviewError::draw("gradient buffer size overflow"))?;
    let mut bytes = vec![0u8; len];
    if radius > 0.0 {
        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let d = (dx * dx + dy * dy).sqrt();
                if d >= radius {
                    continue;
                }
                let a = (alpha * (1.0 - d / radius)).clamp(0.0, 1.0);
                let a8 = (a * 255.0).round() as u8;
                let idx = ((y * width + x) as usize) * 4;
                let px = premul_rgba8(color[0], color[1], color[2], a8);
                bytes[idx..idx + 4].copy_from_slice(&px);
            }
        }
    }
    pixmap_from_premul_bytes(&bytes, width, height)
}

/// A pass-accumulating raster target.
///
/// `vello_cpu` renders a context into a fresh buffer, so every logical draw
/// step goes through its own pass: record into the context, rasterize into
/// a scratch pixmap, then source-over the scratch onto the accumulated
/// frame. This also isolates failures, a pass that errors leaves the frame
/// as it was.
pub struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    scratch: vello_cpu::Pixmap,
    frame: vello_cpu::Pixmap,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            scratch: vello_cpu::Pixmap::new(width, height),
            frame: vello_cpu::Pixmap::new(width, height),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The accumulated frame.
    pub fn frame(&self) -> &vello_cpu::Pixmap {
        &self.frame
    }

    /// Premultiplied RGBA8 bytes of the accumulated frame.
    pub fn frame_bytes(&self) -> &[u8] {
        self.frame.data_as_u8_slice()
    }

    /// Record one pass and composite it over the frame.
    pub fn pass<F>(&mut self, f: F) -> PreviewResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> PreviewResult<()>,
    {
        self.rasterize(f)?;
        crate::render::fx::over_in_place(
            self.frame.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        )
    }

    /// Record one pass, gaussian-blur its output, then composite it over
    /// the frame. Used for text shadows.
    pub fn pass_blurred<F>(&mut self, blur_px: f64, f: F) -> PreviewResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> PreviewResult<()>,
    {
        self.rasterize(f)?;
        let blurred = crate::render::fx::blur_premul_rgba8(
            self.scratch.data_as_u8_slice(),
            u32::from(self.width),
            u32::from(self.height),
            blur_px,
        )?;
        crate::render::fx::over_in_place(self.frame.data_as_u8_slice_mut(), &blurred)
    }

    fn rasterize<F>(&mut self, f: F) -> PreviewResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> PreviewResult<()>,
    {
        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        f(&mut self.ctx)?;
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.scratch);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
