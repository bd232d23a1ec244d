//! Per-pixel kernel execution.

use crate::exec::fill_rows;
use crate::kernel::{FragmentKernel, ImageSampler};
use crate::OpsResult;
use glam::Vec2;
use rfx_core::image::CHANNELS;
use rfx_core::{RgbaImage, TileMode};
use tracing::debug;

/// Evaluates `kernel` at every pixel center of `src`.
///
/// Input reads outside the image resolve with `mode`.
pub fn run_kernel(
    src: &RgbaImage,
    kernel: &dyn FragmentKernel,
    mode: TileMode,
    parallel: bool,
) -> OpsResult<RgbaImage> {
    let (w, h) = src.dimensions();
    debug!(kernel = kernel.name(), w, h, %mode, "run kernel");

    let sampler = ImageSampler::new(src, mode);
    let mut out = vec![0.0f32; src.pixel_count() * CHANNELS];
    fill_rows(&mut out, w as usize * CHANNELS, parallel, |y, row| {
        let cy = y as f32 + 0.5;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let color = kernel.shade(Vec2::new(x as f32 + 0.5, cy), &sampler);
            px.copy_from_slice(&color);
        }
    });
    Ok(RgbaImage::from_f32(out, w, h)?)
}
