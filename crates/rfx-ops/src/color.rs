//! Color matrices and constant-color blends.

use crate::exec::map_pixels;
use rfx_core::{Rgba, RgbaImage};
use rfx_graph::{BlendMode, ColorMatrix};
use tracing::debug;

/// Applies `matrix` to every pixel. Channels are clamped to `0..=1`.
pub fn apply_matrix(src: &RgbaImage, matrix: &ColorMatrix, parallel: bool) -> RgbaImage {
    debug!(saturation = ?matrix.saturation_term(), "color matrix");
    let mut out = src.clone();
    let width = out.width as usize;
    map_pixels(out.data_mut(), width, parallel, |px| matrix.apply_unit(px));
    out
}

/// Blends the constant `color` onto every pixel of `src`.
pub fn blend_color(src: &RgbaImage, color: Rgba, mode: BlendMode, parallel: bool) -> RgbaImage {
    debug!(?color, ?mode, "blend color");
    let mut out = src.clone();
    let width = out.width as usize;
    map_pixels(out.data_mut(), width, parallel, |px| blend_pixel(color, px, mode));
    out
}

/// Porter-Duff blend of source `s` onto destination `d`.
///
/// Both inputs and the result are straight-alpha; the math runs on
/// premultiplied values.
///
/// ```rust
/// use rfx_graph::BlendMode;
/// use rfx_ops::color::blend_pixel;
///
/// let red = [1.0, 0.0, 0.0, 1.0];
/// let white = [1.0, 1.0, 1.0, 1.0];
/// assert_eq!(blend_pixel(red, white, BlendMode::SrcAtop), red);
/// ```
pub fn blend_pixel(s: Rgba, d: Rgba, mode: BlendMode) -> Rgba {
    let (sa, da) = (s[3].clamp(0.0, 1.0), d[3].clamp(0.0, 1.0));
    let sp = [s[0] * sa, s[1] * sa, s[2] * sa];
    let dp = [d[0] * da, d[1] * da, d[2] * da];

    let mut rgb = [0.0f32; 3];
    let alpha = match mode {
        BlendMode::SrcOver => {
            for c in 0..3 {
                rgb[c] = sp[c] + dp[c] * (1.0 - sa);
            }
            sa + da * (1.0 - sa)
        }
        BlendMode::SrcAtop => {
            for c in 0..3 {
                rgb[c] = sp[c] * da + dp[c] * (1.0 - sa);
            }
            da
        }
        BlendMode::SrcIn => {
            for c in 0..3 {
                rgb[c] = sp[c] * da;
            }
            sa * da
        }
        BlendMode::Multiply => {
            for c in 0..3 {
                rgb[c] = sp[c] * dp[c];
            }
            sa * da
        }
        BlendMode::Screen => {
            for c in 0..3 {
                rgb[c] = sp[c] + dp[c] - sp[c] * dp[c];
            }
            sa + da - sa * da
        }
    };

    if alpha <= 1e-6 {
        return [0.0; 4];
    }
    [
        (rgb[0] / alpha).clamp(0.0, 1.0),
        (rgb[1] / alpha).clamp(0.0, 1.0),
        (rgb[2] / alpha).clamp(0.0, 1.0),
        alpha.clamp(0.0, 1.0),
    ]
}
