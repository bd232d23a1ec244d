//! Validated node constructors.
//!
//! Every catalog entry is built through these functions. Parameters are
//! checked up front so a returned node is always well formed:
//!
//! - non-finite values fail with [`GraphError::NonFinite`]
//! - out-of-range values fail with [`GraphError::InvalidParameter`]

use crate::{BlendMode, ColorMatrix, FilterNode, GraphError, GraphResult, ProgramKind, RuntimeShader};
use glam::Vec2;
use rfx_core::{Rgba, TileMode};

/// Largest accepted blur radius in pixels.
pub const MAX_BLUR_RADIUS: f32 = 1000.0;

/// Gaussian blur with radii in pixels. Radii must lie in `0..=MAX_BLUR_RADIUS`.
///
/// # Example
///
/// ```rust
/// use rfx_core::TileMode;
/// use rfx_graph::effects;
///
/// assert!(effects::blur(25.0, 25.0, TileMode::Clamp).is_ok());
/// assert!(effects::blur(-1.0, 25.0, TileMode::Clamp).is_err());
/// ```
pub fn blur(radius_x: f32, radius_y: f32, edge_mode: TileMode) -> GraphResult<FilterNode> {
    for (name, r) in [("radius_x", radius_x), ("radius_y", radius_y)] {
        GraphError::check_finite(name, r)?;
        if r < 0.0 {
            return Err(GraphError::invalid(name, r, "must be >= 0"));
        }
        if r > MAX_BLUR_RADIUS {
            return Err(GraphError::invalid(name, r, "exceeds MAX_BLUR_RADIUS"));
        }
    }
    Ok(FilterNode::Blur {
        radius_x,
        radius_y,
        edge_mode,
    })
}

/// Arbitrary color matrix. All coefficients must be finite.
pub fn color_matrix(matrix: ColorMatrix) -> GraphResult<FilterNode> {
    if let Some(bad) = matrix.m.iter().find(|v| !v.is_finite()) {
        return Err(GraphError::NonFinite {
            name: "matrix".into(),
            value: *bad,
        });
    }
    Ok(FilterNode::ColorMatrix(matrix))
}

/// Saturation adjustment; `0.0` is grayscale.
pub fn saturation(sat: f32) -> GraphResult<FilterNode> {
    GraphError::check_finite("saturation", sat)?;
    color_matrix(ColorMatrix::saturation(sat))
}

/// RGB inversion.
pub fn invert() -> FilterNode {
    FilterNode::ColorMatrix(ColorMatrix::invert())
}

/// Sepia tone.
pub fn sepia() -> FilterNode {
    FilterNode::ColorMatrix(ColorMatrix::sepia())
}

/// Constant color blended over every pixel.
pub fn tint(color: Rgba, mode: BlendMode) -> GraphResult<FilterNode> {
    for v in color {
        GraphError::check_finite("color", v)?;
    }
    Ok(FilterNode::BlendColor { color, mode })
}

/// Translation by `(dx, dy)` pixels.
pub fn offset(dx: f32, dy: f32) -> GraphResult<FilterNode> {
    GraphError::check_finite("dx", dx)?;
    GraphError::check_finite("dy", dy)?;
    Ok(FilterNode::Offset { dx, dy })
}

/// Block pixelation. `pixel_size` must be `> 0`.
pub fn pixelate(pixel_size: f32) -> GraphResult<FilterNode> {
    GraphError::check_finite("pixelSize", pixel_size)?;
    if pixel_size <= 0.0 {
        return Err(GraphError::invalid("pixelSize", pixel_size, "must be > 0"));
    }
    let mut shader = RuntimeShader::builtin(ProgramKind::Pixelate);
    shader.set_float("pixelSize", pixel_size)?;
    finish(shader)
}

/// Horizontal channel split by `offset` pixels.
pub fn chromatic_aberration(offset: f32) -> GraphResult<FilterNode> {
    let mut shader = RuntimeShader::builtin(ProgramKind::ChromaticAberration);
    shader.set_float("offset", offset)?;
    finish(shader)
}

/// Sine displacement along x. Both `resolution` components must be `> 0`.
pub fn wave(amplitude: f32, frequency: f32, resolution: Vec2) -> GraphResult<FilterNode> {
    for (name, v) in [("resolution.x", resolution.x), ("resolution.y", resolution.y)] {
        GraphError::check_finite(name, v)?;
        if v <= 0.0 {
            return Err(GraphError::invalid(name, v, "must be > 0"));
        }
    }
    let mut shader = RuntimeShader::builtin(ProgramKind::Wave);
    shader
        .set_float("amplitude", amplitude)?
        .set_float("frequency", frequency)?
        .set_float2("resolution", resolution.x, resolution.y)?;
    finish(shader)
}

/// Swirl around `center`; the angle grows by `strength / 200` per pixel.
pub fn swirl(center: Vec2, strength: f32) -> GraphResult<FilterNode> {
    let mut shader = RuntimeShader::builtin(ProgramKind::Swirl);
    shader
        .set_float2("center", center.x, center.y)?
        .set_float("strength", strength)?;
    finish(shader)
}

fn finish(shader: RuntimeShader) -> GraphResult<FilterNode> {
    shader.validate()?;
    Ok(FilterNode::Shader(shader))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_rejects_bad_radius() {
        assert!(matches!(
            blur(-0.5, 1.0, TileMode::Clamp),
            Err(GraphError::InvalidParameter { .. })
        ));
        assert!(matches!(
            blur(1.0, f32::INFINITY, TileMode::Clamp),
            Err(GraphError::NonFinite { .. })
        ));
        assert!(blur(0.0, 0.0, TileMode::Decal).is_ok());
    }

    #[test]
    fn test_blur_radius_limit() {
        assert!(blur(MAX_BLUR_RADIUS, 0.0, TileMode::Clamp).is_ok());
        assert!(matches!(
            blur(30000.0, 0.0, TileMode::Clamp),
            Err(GraphError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_pixelate_rejects_non_positive() {
        assert!(pixelate(0.0).is_err());
        assert!(pixelate(-12.0).is_err());
        assert!(pixelate(f32::NAN).is_err());
    }

    #[test]
    fn test_wave_rejects_zero_resolution() {
        let err = wave(1.0, 8.0, Vec2::new(500.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidParameter {
                name: "resolution.y".into(),
                value: 0.0,
                reason: "must be > 0",
            }
        );
    }

    #[test]
    fn test_swirl_uniforms() {
        let FilterNode::Shader(s) = swirl(Vec2::new(10.0, 20.0), 0.5).unwrap() else {
            panic!("expected shader node");
        };
        assert_eq!(s.kind(), ProgramKind::Swirl);
        assert_eq!(s.uniforms().float2("center").unwrap(), Vec2::new(10.0, 20.0));
        assert_eq!(s.uniforms().float("strength").unwrap(), 0.5);
    }

    #[test]
    fn test_color_matrix_rejects_nan() {
        let mut m = ColorMatrix::IDENTITY;
        m.m[7] = f32::NAN;
        assert!(color_matrix(m).is_err());
    }

    #[test]
    fn test_tint_and_offset() {
        assert!(tint([1.0, 0.0, 0.0, 1.0], BlendMode::SrcAtop).is_ok());
        assert!(tint([f32::NAN, 0.0, 0.0, 1.0], BlendMode::SrcAtop).is_err());
        assert_eq!(offset(3.0, -4.0).unwrap(), FilterNode::Offset { dx: 3.0, dy: -4.0 });
    }
}
