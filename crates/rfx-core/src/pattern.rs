//! Deterministic procedural test patterns.
//!
//! Used by tests, benches and the CLI preview in place of decoded photos.
//! The gradient pattern encodes position in color: `R = x % 256`,
//! `G = y % 256`, `B = 64`, which makes coordinate remaps easy to read back.

use crate::{Result, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// A procedural pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Two-color checkerboard with square cells of `cell` pixels.
    Checker {
        /// Cell edge length in pixels (treated as at least 1).
        cell: u32,
        /// Color of the cell containing the origin.
        a: Rgba,
        /// Alternate color.
        b: Rgba,
    },
    /// Position-encoding gradient, opaque.
    Gradient,
    /// Single color.
    Solid(Rgba),
}

impl Pattern {
    /// Black and white checkerboard with 8 pixel cells.
    pub const CHECKER: Pattern = Pattern::Checker {
        cell: 8,
        a: [1.0, 1.0, 1.0, 1.0],
        b: [0.0, 0.0, 0.0, 1.0],
    };

    /// Color at pixel `(x, y)`.
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Rgba {
        match *self {
            Pattern::Checker { cell, a, b } => {
                let cell = cell.max(1);
                if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b }
            }
            Pattern::Gradient => [
                (x % 256) as f32 / 255.0,
                (y % 256) as f32 / 255.0,
                64.0 / 255.0,
                1.0,
            ],
            Pattern::Solid(c) => c,
        }
    }

    /// Renders the pattern into a new image.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rfx_core::pattern::Pattern;
    ///
    /// let img = Pattern::Gradient.render(16, 16).unwrap();
    /// assert_eq!(img.to_rgba8()[..4], [0, 0, 64, 255]);
    /// ```
    pub fn render(&self, width: u32, height: u32) -> Result<RgbaImage> {
        RgbaImage::from_fn(width, height, |x, y| self.color_at(x, y))
    }
}
