//! Edge handling for out-of-range pixel coordinates.

use serde::{Deserialize, Serialize};

/// How a coordinate outside `0..size` is mapped back into the raster.
///
/// Mirrors the tile modes of GPU samplers. `Decal` has no in-range pixel and
/// reads as fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileMode {
    /// Repeat the nearest edge pixel.
    #[default]
    Clamp,
    /// Wrap around (tile the raster).
    Repeat,
    /// Reflect at each edge.
    Mirror,
    /// Transparent outside the raster.
    Decal,
}

impl TileMode {
    /// All tile modes.
    pub const ALL: [TileMode; 4] = [Self::Clamp, Self::Repeat, Self::Mirror, Self::Decal];

    /// Resolves index `i` against an axis of `size` pixels.
    ///
    /// Returns `None` for `Decal` outside the range and for empty axes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rfx_core::TileMode;
    ///
    /// assert_eq!(TileMode::Clamp.resolve(-3, 10), Some(0));
    /// assert_eq!(TileMode::Repeat.resolve(12, 10), Some(2));
    /// assert_eq!(TileMode::Mirror.resolve(-1, 10), Some(0));
    /// assert_eq!(TileMode::Decal.resolve(10, 10), None);
    /// ```
    #[inline]
    pub fn resolve(self, i: i64, size: u32) -> Option<u32> {
        if size == 0 {
            return None;
        }
        let n = size as i64;
        if (0..n).contains(&i) {
            return Some(i as u32);
        }
        let idx = match self {
            Self::Clamp => i.clamp(0, n - 1),
            Self::Repeat => i.rem_euclid(n),
            Self::Mirror => {
                let m = i.rem_euclid(2 * n);
                if m < n { m } else { 2 * n - 1 - m }
            }
            Self::Decal => return None,
        };
        Some(idx as u32)
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Repeat => "repeat",
            Self::Mirror => "mirror",
            Self::Decal => "decal",
        }
    }
}

impl std::fmt::Display for TileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_identity() {
        for mode in TileMode::ALL {
            for i in 0..5 {
                assert_eq!(mode.resolve(i, 5), Some(i as u32));
            }
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(TileMode::Clamp.resolve(-100, 4), Some(0));
        assert_eq!(TileMode::Clamp.resolve(4, 4), Some(3));
        assert_eq!(TileMode::Clamp.resolve(1000, 4), Some(3));
    }

    #[test]
    fn test_repeat() {
        assert_eq!(TileMode::Repeat.resolve(-1, 4), Some(3));
        assert_eq!(TileMode::Repeat.resolve(4, 4), Some(0));
        assert_eq!(TileMode::Repeat.resolve(9, 4), Some(1));
    }

    #[test]
    fn test_mirror() {
        // 0 1 2 3 | 3 2 1 0 | 0 1 ...
        assert_eq!(TileMode::Mirror.resolve(4, 4), Some(3));
        assert_eq!(TileMode::Mirror.resolve(7, 4), Some(0));
        assert_eq!(TileMode::Mirror.resolve(8, 4), Some(0));
        assert_eq!(TileMode::Mirror.resolve(-1, 4), Some(0));
        assert_eq!(TileMode::Mirror.resolve(-2, 4), Some(1));
    }

    #[test]
    fn test_decal() {
        assert_eq!(TileMode::Decal.resolve(-1, 4), None);
        assert_eq!(TileMode::Decal.resolve(4, 4), None);
    }

    #[test]
    fn test_empty_axis() {
        assert_eq!(TileMode::Clamp.resolve(0, 0), None);
    }
}
