//! 4x5 color matrix.
//!
//! # Convention
//!
//! Coefficients are stored **row-major**, one row per output channel, and
//! act on channel values in `0..=255`:
//!
//! ```text
//! R' = m0*R  + m1*G  + m2*B  + m3*A  + m4
//! G' = m5*R  + m6*G  + m7*B  + m8*A  + m9
//! B' = m10*R + m11*G + m12*B + m13*A + m14
//! A' = m15*R + m16*G + m17*B + m18*A + m19
//! ```
//!
//! The fifth column is a bias in 0..255 units, so an inversion carries
//! `+255` there. Results are clamped to `0..=255`.

use serde::{Deserialize, Serialize};

/// Luma weights used by [`ColorMatrix::saturation`].
pub const SATURATION_LUMA: [f32; 3] = [0.213, 0.715, 0.072];

/// A 4x5 color transform.
///
/// # Example
///
/// ```rust
/// use rfx_graph::ColorMatrix;
///
/// let invert = ColorMatrix::invert();
/// assert_eq!(invert.apply_rgba8([255, 255, 255, 255]), [0, 0, 0, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatrix {
    /// Coefficients, row-major.
    pub m: [f32; 20],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    };

    /// Creates a matrix from its 20 coefficients.
    #[inline]
    pub const fn from_array(m: [f32; 20]) -> Self {
        Self { m }
    }

    /// Creates a matrix from four rows.
    pub const fn from_rows(rows: [[f32; 5]; 4]) -> Self {
        let mut m = [0.0; 20];
        let mut r = 0;
        while r < 4 {
            let mut c = 0;
            while c < 5 {
                m[r * 5 + c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self { m }
    }

    /// Row `r` (0 = red, 3 = alpha).
    #[inline]
    pub fn row(&self, r: usize) -> [f32; 5] {
        let s = r * 5;
        [self.m[s], self.m[s + 1], self.m[s + 2], self.m[s + 3], self.m[s + 4]]
    }

    /// Saturation matrix. `0.0` is fully desaturated, `1.0` is identity.
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let r = SATURATION_LUMA[0] * inv;
        let g = SATURATION_LUMA[1] * inv;
        let b = SATURATION_LUMA[2] * inv;
        Self {
            m: [
                r + sat, g, b, 0.0, 0.0,
                r, g + sat, b, 0.0, 0.0,
                r, g, b + sat, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Per-channel scale.
    pub fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            m: [
                r, 0.0, 0.0, 0.0, 0.0,
                0.0, g, 0.0, 0.0, 0.0,
                0.0, 0.0, b, 0.0, 0.0,
                0.0, 0.0, 0.0, a, 0.0,
            ],
        }
    }

    /// RGB inversion: `c' = 255 - c`, alpha unchanged.
    pub fn invert() -> Self {
        Self {
            m: [
                -1.0, 0.0, 0.0, 0.0, 255.0,
                0.0, -1.0, 0.0, 0.0, 255.0,
                0.0, 0.0, -1.0, 0.0, 255.0,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Classic sepia tone, alpha unchanged.
    pub fn sepia() -> Self {
        Self {
            m: [
                0.393, 0.769, 0.189, 0.0, 0.0,
                0.349, 0.686, 0.168, 0.0, 0.0,
                0.272, 0.534, 0.131, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Returns the matrix applying `first`, then `self`.
    ///
    /// ```rust
    /// use rfx_graph::ColorMatrix;
    ///
    /// let twice = ColorMatrix::invert().concat(&ColorMatrix::invert());
    /// assert_eq!(twice.apply_rgba8([10, 20, 30, 40]), [10, 20, 30, 40]);
    /// ```
    pub fn concat(&self, first: &ColorMatrix) -> ColorMatrix {
        let a = &self.m;
        let b = &first.m;
        let mut out = [0.0f32; 20];
        for r in 0..4 {
            for c in 0..5 {
                let mut v = 0.0;
                for k in 0..4 {
                    v += a[r * 5 + k] * b[k * 5 + c];
                }
                if c == 4 {
                    v += a[r * 5 + 4];
                }
                out[r * 5 + c] = v;
            }
        }
        ColorMatrix { m: out }
    }

    /// Applies the matrix to channel values in `0..=255` without clamping.
    #[inline]
    pub fn transform(&self, c: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        let mut out = [0.0; 4];
        for (r, o) in out.iter_mut().enumerate() {
            let s = r * 5;
            *o = m[s] * c[0] + m[s + 1] * c[1] + m[s + 2] * c[2] + m[s + 3] * c[3] + m[s + 4];
        }
        out
    }

    /// Applies the matrix to an 8-bit RGBA pixel.
    pub fn apply_rgba8(&self, px: [u8; 4]) -> [u8; 4] {
        let out = self.transform(px.map(|v| v as f32));
        out.map(|v| v.clamp(0.0, 255.0).round() as u8)
    }

    /// Applies the matrix to a pixel with channels in `0..=1`.
    #[inline]
    pub fn apply_unit(&self, px: [f32; 4]) -> [f32; 4] {
        let out = self.transform(px.map(|v| v * 255.0));
        out.map(|v| v.clamp(0.0, 255.0) / 255.0)
    }

    /// Recovers `s` if this matrix has the form of [`ColorMatrix::saturation`].
    ///
    /// ```rust
    /// use rfx_graph::ColorMatrix;
    ///
    /// assert_eq!(ColorMatrix::saturation(0.0).saturation_term(), Some(0.0));
    /// assert_eq!(ColorMatrix::sepia().saturation_term(), None);
    /// ```
    pub fn saturation_term(&self) -> Option<f32> {
        const EPS: f32 = 1e-6;
        let m = &self.m;
        let sat = m[0] - m[5];
        let close = |a: f32, b: f32| (a - b).abs() <= EPS;

        let rgb_shape = close(m[5], m[10])
            && close(m[1], m[11])
            && close(m[2], m[7])
            && close(m[6] - m[1], sat)
            && close(m[12] - m[2], sat);
        let weights = close(m[5], SATURATION_LUMA[0] * (1.0 - sat))
            && close(m[1], SATURATION_LUMA[1] * (1.0 - sat))
            && close(m[2], SATURATION_LUMA[2] * (1.0 - sat));
        let untouched = [3, 4, 8, 9, 13, 14, 15, 16, 17, 19]
            .iter()
            .all(|&i| m[i] == 0.0)
            && m[18] == 1.0;

        (rgb_shape && weights && untouched).then_some(sat)
    }

    /// True when every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_roundtrip() {
        let px = [12, 200, 77, 128];
        assert_eq!(ColorMatrix::IDENTITY.apply_rgba8(px), px);
    }

    #[test]
    fn test_from_rows_matches_array() {
        let rows = ColorMatrix::from_rows([
            [0.393, 0.769, 0.189, 0.0, 0.0],
            [0.349, 0.686, 0.168, 0.0, 0.0],
            [0.272, 0.534, 0.131, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ]);
        assert_eq!(rows, ColorMatrix::sepia());
        assert_eq!(rows.row(1), [0.349, 0.686, 0.168, 0.0, 0.0]);
    }

    #[test]
    fn test_invert_black_and_white() {
        let inv = ColorMatrix::invert();
        assert_eq!(inv.apply_rgba8([255, 255, 255, 255]), [0, 0, 0, 255]);
        assert_eq!(inv.apply_rgba8([0, 0, 0, 255]), [255, 255, 255, 255]);
        assert_eq!(inv.apply_rgba8([0, 0, 0, 17]), [255, 255, 255, 17]);
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let gray = ColorMatrix::saturation(0.0);
        let out = gray.apply_unit([1.0, 0.0, 0.0, 1.0]);
        assert_abs_diff_eq!(out[0], 0.213, epsilon = 1e-5);
        assert_abs_diff_eq!(out[0], out[1], epsilon = 1e-6);
        assert_abs_diff_eq!(out[1], out[2], epsilon = 1e-6);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_saturation_one_is_identity() {
        let m = ColorMatrix::saturation(1.0);
        assert_eq!(m, ColorMatrix::IDENTITY);
        assert_eq!(m.saturation_term(), Some(1.0));
    }

    #[test]
    fn test_saturation_term_roundtrip() {
        for s in [0.0, 0.25, 0.5, 2.0] {
            let got = ColorMatrix::saturation(s).saturation_term().unwrap();
            assert_abs_diff_eq!(got, s, epsilon = 1e-6);
        }
        assert_eq!(ColorMatrix::invert().saturation_term(), None);
    }

    #[test]
    fn test_concat_order() {
        // scale red by 0.5 after inversion: 255 -> 0 -> 0, 0 -> 255 -> 127.5
        let m = ColorMatrix::scale(0.5, 1.0, 1.0, 1.0).concat(&ColorMatrix::invert());
        let out = m.transform([0.0, 0.0, 0.0, 255.0]);
        assert_abs_diff_eq!(out[0], 127.5, epsilon = 1e-4);
        assert_abs_diff_eq!(out[1], 255.0, epsilon = 1e-4);
    }

    #[test]
    fn test_apply_unit_clamps() {
        let m = ColorMatrix::scale(4.0, 1.0, 1.0, 1.0);
        assert_eq!(m.apply_unit([0.5, 0.5, 0.5, 1.0])[0], 1.0);
    }
}
