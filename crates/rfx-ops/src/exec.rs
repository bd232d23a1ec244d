//! Row-wise execution, parallel when the `parallel` feature is enabled.

use rfx_core::image::CHANNELS;
use rfx_core::Rgba;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized chunk of `dst`.
#[cfg(feature = "parallel")]
pub(crate) fn fill_rows<F>(dst: &mut [f32], row_len: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    if parallel {
        dst.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        dst.chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

/// Calls `f(y, row)` for every `row_len`-sized chunk of `dst` (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
pub(crate) fn fill_rows<F>(dst: &mut [f32], row_len: usize, _parallel: bool, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Applies `f` to every pixel of `data` in place.
pub(crate) fn map_pixels<F>(data: &mut [f32], width: usize, parallel: bool, f: F)
where
    F: Fn(Rgba) -> Rgba + Sync,
{
    fill_rows(data, width * CHANNELS, parallel, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let out = f([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
    });
}
