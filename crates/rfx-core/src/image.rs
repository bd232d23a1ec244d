//! RGBA raster buffer.
//!
//! [`RgbaImage`] stores interleaved, straight (non-premultiplied) RGBA
//! values as `f32`, nominally in `0..=1`. It is the input and output type of
//! the reference renderer and of the procedural test patterns.

use crate::{Error, Result, TileMode};
use glam::Vec2;

/// One RGBA pixel, straight alpha.
pub type Rgba = [f32; 4];

/// Fully transparent black.
pub const TRANSPARENT: Rgba = [0.0; 4];

/// Channels per pixel.
pub const CHANNELS: usize = 4;

/// Interleaved RGBA raster with `f32` channels.
#[derive(Clone, PartialEq)]
pub struct RgbaImage {
    data: Vec<f32>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RgbaImage {
    /// Creates a transparent image.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Creates an image filled with one color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rfx_core::RgbaImage;
    ///
    /// let img = RgbaImage::filled(4, 2, [1.0, 0.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(img.pixel(3, 1).unwrap(), [1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&color);
        }
        Ok(Self { data, width, height })
    }

    /// Wraps existing interleaved RGBA data.
    pub fn from_f32(data: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgba,
    {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self { data, width, height })
    }

    /// Builds an image from 8-bit RGBA values.
    pub fn from_rgba8(data: &[u8], width: u32, height: u32) -> Result<Self> {
        let floats = data.iter().map(|&v| v as f32 / 255.0).collect();
        Self::from_f32(floats, width, height)
    }

    /// Converts to 8-bit RGBA, clamping and rounding each channel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Image dimensions `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw interleaved data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the image, returning its data.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Reads pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Rgba> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.texel(x, y))
    }

    /// Writes pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&color);
        Ok(())
    }

    /// Reads a pixel at a possibly out-of-range integer position.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rfx_core::{RgbaImage, TileMode, TRANSPARENT};
    ///
    /// let img = RgbaImage::filled(2, 2, [1.0; 4]).unwrap();
    /// assert_eq!(img.fetch(-5, 0, TileMode::Clamp), [1.0; 4]);
    /// assert_eq!(img.fetch(-5, 0, TileMode::Decal), TRANSPARENT);
    /// ```
    #[inline]
    pub fn fetch(&self, x: i64, y: i64, mode: TileMode) -> Rgba {
        match (mode.resolve(x, self.width), mode.resolve(y, self.height)) {
            (Some(x), Some(y)) => self.texel(x, y),
            _ => crate::TRANSPARENT,
        }
    }

    /// Nearest sample at a continuous coordinate.
    ///
    /// Picks the pixel containing `coord`, i.e. `floor(coord)`.
    #[inline]
    pub fn sample_nearest(&self, coord: Vec2, mode: TileMode) -> Rgba {
        if !coord.is_finite() {
            return TRANSPARENT;
        }
        let p = coord.floor();
        self.fetch(p.x as i64, p.y as i64, mode)
    }

    /// Row `y` as an interleaved slice.
    pub fn row(&self, y: u32) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Largest absolute per-channel difference to `other`.
    ///
    /// Returns `None` when dimensions differ.
    pub fn max_abs_diff(&self, other: &RgbaImage) -> Option<f32> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f32::max),
        )
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> Rgba {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

impl std::fmt::Debug for RgbaImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbaImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(RgbaImage::new(0, 4).is_err());
        assert!(RgbaImage::new(4, 0).is_err());
    }

    #[test]
    fn test_from_f32_size_check() {
        let err = RgbaImage::from_f32(vec![0.0; 10], 2, 2).unwrap_err();
        assert_eq!(
            err,
            Error::BufferSizeMismatch {
                expected: 16,
                actual: 10
            }
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut img = RgbaImage::new(3, 2).unwrap();
        img.set_pixel(2, 1, [0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(img.pixel(2, 1).unwrap(), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(img.pixel(0, 0).unwrap(), TRANSPARENT);
        assert!(img.pixel(3, 0).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_sample_nearest_uses_floor() {
        let img = RgbaImage::from_fn(4, 1, |x, _| [x as f32, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(img.sample_nearest(Vec2::new(2.5, 0.5), TileMode::Clamp)[0], 2.0);
        assert_eq!(img.sample_nearest(Vec2::new(2.999, 0.5), TileMode::Clamp)[0], 2.0);
        assert_eq!(img.sample_nearest(Vec2::new(-0.5, 0.5), TileMode::Clamp)[0], 0.0);
        assert_eq!(img.sample_nearest(Vec2::new(9.0, 0.5), TileMode::Clamp)[0], 3.0);
        assert_eq!(img.sample_nearest(Vec2::new(9.0, 0.5), TileMode::Decal), TRANSPARENT);
    }

    #[test]
    fn test_rgba8_conversion() {
        let img = RgbaImage::from_rgba8(&[255, 0, 128, 255], 1, 1).unwrap();
        assert_eq!(img.to_rgba8(), vec![255, 0, 128, 255]);
    }

    #[test]
    fn test_max_abs_diff() {
        let a = RgbaImage::filled(2, 2, [0.5; 4]).unwrap();
        let b = RgbaImage::filled(2, 2, [0.25; 4]).unwrap();
        let c = RgbaImage::filled(1, 2, [0.5; 4]).unwrap();
        assert_eq!(a.max_abs_diff(&b), Some(0.25));
        assert_eq!(a.max_abs_diff(&c), None);
    }

    #[test]
    fn test_row_access() {
        let img = RgbaImage::from_fn(2, 2, |x, y| [x as f32, y as f32, 0.0, 1.0]).unwrap();
        let row = img.row(1).unwrap();
        assert_eq!(row.len(), 8);
        assert_eq!(row[1], 1.0);
        assert!(img.row(2).is_none());
    }
}
