//! Translation.

use crate::exec::fill_rows;
use crate::{OpsError, OpsResult};
use glam::Vec2;
use rfx_core::image::CHANNELS;
use rfx_core::{RgbaImage, TileMode};
use tracing::debug;

/// Shifts `src` by `(dx, dy)`: output at `p` shows input at `p - (dx, dy)`.
///
/// Fractional shifts snap with nearest sampling at pixel centers. Uncovered
/// pixels resolve with `mode`; [`TileMode::Decal`] leaves them transparent.
///
/// ```rust
/// use rfx_core::{RgbaImage, TileMode};
/// use rfx_ops::offset::translate;
///
/// let src = RgbaImage::from_fn(4, 1, |x, _| [x as f32, 0.0, 0.0, 1.0]).unwrap();
/// let out = translate(&src, 1.0, 0.0, TileMode::Decal, false).unwrap();
/// assert_eq!(out.pixel(0, 0).unwrap(), [0.0; 4]);
/// assert_eq!(out.pixel(3, 0).unwrap()[0], 2.0);
/// ```
pub fn translate(
    src: &RgbaImage,
    dx: f32,
    dy: f32,
    mode: TileMode,
    parallel: bool,
) -> OpsResult<RgbaImage> {
    if !dx.is_finite() || !dy.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "offset must be finite, got ({dx}, {dy})"
        )));
    }
    if dx == 0.0 && dy == 0.0 {
        return Ok(src.clone());
    }
    let (w, h) = src.dimensions();
    debug!(dx, dy, %mode, "translate");

    let shift = Vec2::new(dx, dy);
    let mut out = vec![0.0f32; src.pixel_count() * CHANNELS];
    fill_rows(&mut out, w as usize * CHANNELS, parallel, |y, row| {
        let cy = y as f32 + 0.5;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let p = Vec2::new(x as f32 + 0.5, cy) - shift;
            px.copy_from_slice(&src.sample_nearest(p, mode));
        }
    });
    Ok(RgbaImage::from_f32(out, w, h)?)
}
