//! Raster effects over premultiplied RGBA8 buffers: the separable gaussian
//! blur behind text shadows, and source-over compositing used to stack
//! render passes onto the frame.

use crate::foundation::error::{PreviewError, PreviewResult};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Gaussian-blur a premultiplied RGBA8 buffer. `blur_px` follows the 2D
/// canvas `shadowBlur` convention: sigma is half the blur value. A blur
/// below one device pixel returns the input unchanged.
pub fn blur_premul_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    blur_px: f64,
) -> PreviewResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PreviewError::draw("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(PreviewError::draw(
            "blur_premul_rgba8 expects src matching width*height*4",
        ));
    }

    let sigma = blur_px * 0.5;
    let radius = (sigma * 2.0).ceil() as u32;
    if blur_px < 1.0 || radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    convolve_axis(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    convolve_axis(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

/// Fixed-point Q16 kernel normalized to sum exactly 1<<16 so repeated
/// blurs never gain or lose alpha.
fn gaussian_kernel_q16(radius: u32, sigma: f64) -> PreviewResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PreviewError::draw("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(PreviewError::draw("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding residue into the center tap.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn convolve_axis(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

/// Porter-Duff source-over of one premultiplied pixel onto another.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = mul_div255(u16::from(dst[3]), inv).saturating_add(sa);
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` over `dst`, both premultiplied RGBA8 of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PreviewResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PreviewError::draw(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/fx.rs"]
mod tests;
