//! Effect identifiers.

use crate::GraphError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Symbolic name of a catalog effect.
///
/// Used only as a lookup key; see [`crate::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectId {
    /// No transformation.
    #[default]
    None,
    /// Gaussian blur.
    Blur,
    /// Full desaturation.
    Grayscale,
    /// Color inversion, alpha untouched.
    Invert,
    /// Sepia tone.
    Sepia,
    /// Block pixelation.
    Pixelate,
    /// Horizontal RGB channel split.
    ChromaticAberration,
    /// Spatial translation.
    Offset,
    /// Horizontal sine displacement.
    WaveDistortion,
    /// Rotation that grows with distance from a center.
    SwirlDistortion,
}

impl EffectId {
    /// All effects in presentation order.
    pub const ALL: [EffectId; 10] = [
        Self::None,
        Self::Blur,
        Self::Grayscale,
        Self::Invert,
        Self::Sepia,
        Self::Pixelate,
        Self::ChromaticAberration,
        Self::Offset,
        Self::WaveDistortion,
        Self::SwirlDistortion,
    ];

    /// Display name, e.g. `"Chromatic Aberration"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Blur => "Blur",
            Self::Grayscale => "Grayscale",
            Self::Invert => "Invert",
            Self::Sepia => "Sepia",
            Self::Pixelate => "Pixelate",
            Self::ChromaticAberration => "Chromatic Aberration",
            Self::Offset => "Offset",
            Self::WaveDistortion => "Wave Distortion",
            Self::SwirlDistortion => "Swirl Distortion",
        }
    }

    /// First word of the display name, used as a compact caption.
    ///
    /// ```rust
    /// use rfx_graph::EffectId;
    ///
    /// assert_eq!(EffectId::WaveDistortion.short_label(), "Wave");
    /// assert_eq!(EffectId::Blur.short_label(), "Blur");
    /// ```
    pub fn short_label(self) -> &'static str {
        let name = self.name();
        name.split(' ').next().unwrap_or(name)
    }

    /// True when the effect is built from a runtime fragment program.
    pub fn requires_runtime_shader(self) -> bool {
        matches!(
            self,
            Self::Pixelate | Self::ChromaticAberration | Self::WaveDistortion | Self::SwirlDistortion
        )
    }

    /// Position in [`EffectId::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase with spaces, `_` and `-` removed.
pub(crate) fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for EffectId {
    type Err = GraphError;

    /// Parses display names case-insensitively; `snake_case` and
    /// `kebab-case` spellings are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s.trim());
        Self::ALL
            .into_iter()
            .find(|id| normalize_name(id.name()) == key)
            .ok_or_else(|| GraphError::UnknownEffect(s.to_string()))
    }
}
