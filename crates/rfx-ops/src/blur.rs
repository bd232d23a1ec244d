//! Separable Gaussian blur.
//!
//! Radii are converted to a standard deviation the way GPU compositors do:
//! `sigma = 0.57735 * radius + 0.5`, with radius 0 meaning no blur. The
//! kernel extends `ceil(3 * sigma)` pixels to each side.
//!
//! Blurring happens on premultiplied values so transparent pixels don't
//! bleed their color into opaque neighbours.

use crate::exec::fill_rows;
use crate::{OpsError, OpsResult};
use rfx_core::image::CHANNELS;
use rfx_core::{RgbaImage, TileMode};
use rfx_graph::effects::MAX_BLUR_RADIUS;
use tracing::{debug, trace};

/// Largest kernel half-width [`gaussian_weights`] produces.
pub const MAX_HALF_WIDTH: usize = 1800;

/// Standard deviation for a blur radius.
///
/// ```rust
/// use rfx_ops::blur::sigma_from_radius;
///
/// assert_eq!(sigma_from_radius(0.0), 0.0);
/// assert!((sigma_from_radius(25.0) - 14.93375).abs() < 1e-4);
/// ```
#[inline]
pub fn sigma_from_radius(radius: f32) -> f32 {
    if radius > 0.0 { 0.57735 * radius + 0.5 } else { 0.0 }
}

/// Normalized 1D Gaussian weights, `2 * ceil(3 * sigma) + 1` taps.
///
/// `sigma <= 0` (or NaN) yields the single tap `[1.0]`. The half-width is
/// capped at [`MAX_HALF_WIDTH`].
pub fn gaussian_weights(sigma: f32) -> Vec<f32> {
    if sigma.is_nan() || sigma <= 0.0 {
        return vec![1.0];
    }
    let half = (3.0 * sigma).ceil().min(MAX_HALF_WIDTH as f32) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-half..=half)
        .map(|i| {
            let x = i as f32;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Blurs `src` with independent horizontal and vertical radii.
///
/// # Example
///
/// ```rust
/// use rfx_core::{RgbaImage, TileMode};
/// use rfx_ops::blur::gaussian_blur;
///
/// let src = RgbaImage::filled(16, 16, [0.5, 0.5, 0.5, 1.0]).unwrap();
/// let out = gaussian_blur(&src, 4.0, 4.0, TileMode::Clamp, false).unwrap();
/// assert!(out.max_abs_diff(&src).unwrap() < 1e-5);
/// ```
pub fn gaussian_blur(
    src: &RgbaImage,
    radius_x: f32,
    radius_y: f32,
    edge: TileMode,
    parallel: bool,
) -> OpsResult<RgbaImage> {
    for r in [radius_x, radius_y] {
        if !r.is_finite() || !(0.0..=MAX_BLUR_RADIUS).contains(&r) {
            return Err(OpsError::InvalidParameter(format!(
                "blur radius must be in 0..={MAX_BLUR_RADIUS}, got {r}"
            )));
        }
    }
    if radius_x == 0.0 && radius_y == 0.0 {
        return Ok(src.clone());
    }

    let (w, h) = (src.width as usize, src.height as usize);
    let wx = gaussian_weights(sigma_from_radius(radius_x));
    let wy = gaussian_weights(sigma_from_radius(radius_y));
    debug!(w, h, radius_x, radius_y, taps_x = wx.len(), taps_y = wy.len(), %edge, "gaussian blur");

    let mut data = src.data().to_vec();
    premultiply(&mut data);
    let tmp = pass_horizontal(&data, w, h, &wx, edge, parallel);
    let mut out = pass_vertical(&tmp, w, h, &wy, edge, parallel);
    unpremultiply(&mut out);

    Ok(RgbaImage::from_f32(out, src.width, src.height)?)
}

fn pass_horizontal(
    src: &[f32],
    w: usize,
    h: usize,
    weights: &[f32],
    edge: TileMode,
    parallel: bool,
) -> Vec<f32> {
    trace!(taps = weights.len(), "horizontal pass");
    let half = (weights.len() / 2) as i64;
    let mut dst = vec![0.0f32; w * h * CHANNELS];
    fill_rows(&mut dst, w * CHANNELS, parallel, |y, row| {
        for x in 0..w {
            let mut acc = [0.0f32; CHANNELS];
            for (k, &wt) in weights.iter().enumerate() {
                let sx = x as i64 + k as i64 - half;
                let Some(sx) = edge.resolve(sx, w as u32) else {
                    continue;
                };
                let i = (y * w + sx as usize) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += src[i + c] * wt;
                }
            }
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&acc);
        }
    });
    dst
}

fn pass_vertical(
    src: &[f32],
    w: usize,
    h: usize,
    weights: &[f32],
    edge: TileMode,
    parallel: bool,
) -> Vec<f32> {
    trace!(taps = weights.len(), "vertical pass");
    let half = (weights.len() / 2) as i64;
    let mut dst = vec![0.0f32; w * h * CHANNELS];
    fill_rows(&mut dst, w * CHANNELS, parallel, |y, row| {
        for (k, &wt) in weights.iter().enumerate() {
            let sy = y as i64 + k as i64 - half;
            let Some(sy) = edge.resolve(sy, h as u32) else {
                continue;
            };
            let src_row = &src[sy as usize * w * CHANNELS..(sy as usize + 1) * w * CHANNELS];
            for (d, s) in row.iter_mut().zip(src_row) {
                *d += s * wt;
            }
        }
    });
    dst
}

fn premultiply(data: &mut [f32]) {
    for px in data.chunks_exact_mut(CHANNELS) {
        let a = px[3];
        px[0] *= a;
        px[1] *= a;
        px[2] *= a;
    }
}

fn unpremultiply(data: &mut [f32]) {
    for px in data.chunks_exact_mut(CHANNELS) {
        let a = px[3];
        if a > 1e-6 {
            px[0] = (px[0] / a).clamp(0.0, 1.0);
            px[1] = (px[1] / a).clamp(0.0, 1.0);
            px[2] = (px[2] / a).clamp(0.0, 1.0);
        } else {
            px[..3].fill(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn edge_image() -> RgbaImage {
        // left half black, right half white
        RgbaImage::from_fn(32, 8, |x, _| {
            let v = if x < 16 { 0.0 } else { 1.0 };
            [v, v, v, 1.0]
        })
        .unwrap()
    }

    #[test]
    fn test_weights_normalized_and_symmetric() {
        let w = gaussian_weights(sigma_from_radius(25.0));
        assert_eq!(w.len(), 2 * 45 + 1);
        let sum: f32 = w.iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-5);
        for i in 0..w.len() / 2 {
            assert_abs_diff_eq!(w[i], w[w.len() - 1 - i], epsilon = 1e-7);
        }
    }

    #[test]
    fn test_zero_radius_is_passthrough() {
        let src = edge_image();
        let out = gaussian_blur(&src, 0.0, 0.0, TileMode::Clamp, false).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let src = edge_image();
        assert!(gaussian_blur(&src, -1.0, 0.0, TileMode::Clamp, false).is_err());
        assert!(gaussian_blur(&src, f32::NAN, 0.0, TileMode::Clamp, false).is_err());
    }

    #[test]
    fn test_huge_radius_rejected() {
        let src = RgbaImage::filled(2, 2, [0.5, 0.5, 0.5, 1.0]).unwrap();
        assert!(matches!(
            gaussian_blur(&src, 30000.0, 0.0, TileMode::Clamp, false),
            Err(OpsError::InvalidParameter(_))
        ));
        let out = gaussian_blur(&src, MAX_BLUR_RADIUS, 0.0, TileMode::Clamp, false).unwrap();
        assert!(out.max_abs_diff(&src).unwrap() < 1e-4);
    }

    #[test]
    fn test_weights_bounded_for_large_sigma() {
        let w = gaussian_weights(1.0e6);
        assert_eq!(w.len(), 2 * MAX_HALF_WIDTH + 1);
        assert!(w.iter().all(|v| v.is_finite()));
        assert_eq!(gaussian_weights(f32::NAN), vec![1.0]);
    }

    #[test]
    fn test_blur_softens_edge() {
        let src = edge_image();
        let out = gaussian_blur(&src, 5.0, 5.0, TileMode::Clamp, false).unwrap();
        let left = out.pixel(15, 4).unwrap()[0];
        let right = out.pixel(16, 4).unwrap()[0];
        assert!(left > 0.0 && left < 0.5, "left = {left}");
        assert!(right > 0.5 && right < 1.0, "right = {right}");
        // far from the edge the clamp keeps the flat value
        assert_abs_diff_eq!(out.pixel(0, 4).unwrap()[0], 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.pixel(31, 4).unwrap()[3], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_horizontal_only() {
        let src = edge_image();
        let out = gaussian_blur(&src, 5.0, 0.0, TileMode::Clamp, false).unwrap();
        // rows are identical, so a vertical no-op keeps them equal
        for y in 1..8 {
            assert_eq!(out.row(y).unwrap(), out.row(0).unwrap());
        }
    }

    #[test]
    fn test_decal_fades_alpha_at_border() {
        let src = RgbaImage::filled(16, 16, [1.0, 1.0, 1.0, 1.0]).unwrap();
        let out = gaussian_blur(&src, 4.0, 4.0, TileMode::Decal, false).unwrap();
        let corner = out.pixel(0, 0).unwrap();
        let center = out.pixel(8, 8).unwrap();
        assert!(corner[3] < 0.5);
        assert!(center[3] > corner[3]);
        // color is unpremultiplied back to white
        assert_abs_diff_eq!(corner[0], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_transparent_does_not_bleed_color() {
        // opaque white next to transparent red
        let src = RgbaImage::from_fn(8, 1, |x, _| {
            if x < 4 { [1.0, 1.0, 1.0, 1.0] } else { [1.0, 0.0, 0.0, 0.0] }
        })
        .unwrap();
        let out = gaussian_blur(&src, 3.0, 0.0, TileMode::Clamp, false).unwrap();
        let px = out.pixel(4, 0).unwrap();
        assert!(px[3] > 0.0);
        assert_abs_diff_eq!(px[1], 1.0, epsilon = 1e-4);
    }
}
