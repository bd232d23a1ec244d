//! Native counterparts of the built-in fragment programs.
//!
//! A [`FragmentKernel`] computes one output color from a destination
//! coordinate and a [`Sampler`] over the input, mirroring
//! `vec4 main(vec2 coord)` with `content.eval(...)` in the program source.
//! Coordinates are in pixel units; pixel `(x, y)` has its center at
//! `(x + 0.5, y + 0.5)`.

use crate::{OpsError, OpsResult};
use glam::Vec2;
use rfx_core::{Rgba, RgbaImage, TileMode};
use rfx_graph::{ProgramKind, RuntimeShader};
use std::cell::RefCell;

/// Something a kernel can read colors from.
pub trait Sampler {
    /// Color at `coord` in pixel units.
    fn eval(&self, coord: Vec2) -> Rgba;
}

/// Nearest-neighbour sampling of an image with an edge policy.
#[derive(Debug, Clone, Copy)]
pub struct ImageSampler<'a> {
    image: &'a RgbaImage,
    mode: TileMode,
}

impl<'a> ImageSampler<'a> {
    /// Samples `image`, resolving out-of-range coordinates with `mode`.
    pub fn new(image: &'a RgbaImage, mode: TileMode) -> Self {
        Self { image, mode }
    }
}

impl Sampler for ImageSampler<'_> {
    #[inline]
    fn eval(&self, coord: Vec2) -> Rgba {
        self.image.sample_nearest(coord, self.mode)
    }
}

/// Records every coordinate it is asked for and answers with one color.
///
/// Used to inspect which input locations a kernel reads.
///
/// ```rust
/// use glam::Vec2;
/// use rfx_ops::{ProbeSampler, Sampler};
///
/// let probe = ProbeSampler::new([1.0, 0.0, 0.0, 1.0]);
/// probe.eval(Vec2::new(3.0, 4.0));
/// assert_eq!(probe.taps(), vec![Vec2::new(3.0, 4.0)]);
/// ```
#[derive(Debug, Default)]
pub struct ProbeSampler {
    color: Rgba,
    taps: RefCell<Vec<Vec2>>,
}

impl ProbeSampler {
    /// Probe answering every tap with `color`.
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            taps: RefCell::new(Vec::new()),
        }
    }

    /// Coordinates requested so far, in order.
    pub fn taps(&self) -> Vec<Vec2> {
        self.taps.borrow().clone()
    }

    /// Forgets recorded taps.
    pub fn clear(&self) {
        self.taps.borrow_mut().clear();
    }
}

impl Sampler for ProbeSampler {
    fn eval(&self, coord: Vec2) -> Rgba {
        self.taps.borrow_mut().push(coord);
        self.color
    }
}

/// Per-pixel program with a single sampled input.
pub trait FragmentKernel: Send + Sync {
    /// Output color for destination `coord`.
    fn shade(&self, coord: Vec2, content: &dyn Sampler) -> Rgba;

    /// Program name for logs.
    fn name(&self) -> &'static str;
}

/// Block mosaic: every coordinate reads the corner of its block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixelate {
    /// Block edge length in pixels, > 0.
    pub pixel_size: f32,
}

impl FragmentKernel for Pixelate {
    fn shade(&self, coord: Vec2, content: &dyn Sampler) -> Rgba {
        content.eval((coord / self.pixel_size).floor() * self.pixel_size)
    }

    fn name(&self) -> &'static str {
        "pixelate"
    }
}

/// Red and blue read `offset` pixels to either side of green; output opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaticAberration {
    /// Horizontal channel separation in pixels.
    pub offset: f32,
}

impl FragmentKernel for ChromaticAberration {
    fn shade(&self, coord: Vec2, content: &dyn Sampler) -> Rgba {
        let off = Vec2::new(self.offset, 0.0);
        let r = content.eval(coord + off)[0];
        let g = content.eval(coord)[1];
        let b = content.eval(coord - off)[2];
        [r, g, b, 1.0]
    }

    fn name(&self) -> &'static str {
        "chromatic_aberration"
    }
}

/// Horizontal sine displacement: `dx = sin(y / res.y * frequency) * amplitude * 20`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Displacement scale; 1.0 moves up to 20 pixels.
    pub amplitude: f32,
    /// Radians per unit of normalized height.
    pub frequency: f32,
    /// Normalization extent.
    pub resolution: Vec2,
}

impl FragmentKernel for Wave {
    fn shade(&self, coord: Vec2, content: &dyn Sampler) -> Rgba {
        let uv = coord / self.resolution;
        let wave = (uv.y * self.frequency).sin() * self.amplitude;
        content.eval(coord + Vec2::new(wave * 20.0, 0.0))
    }

    fn name(&self) -> &'static str {
        "wave"
    }
}

/// Rotation about `center` by `strength * distance / 200` radians.
///
/// Matches the column-major `mat2(c, -s, s, c) * dir` of the program source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swirl {
    /// Rotation center in pixels.
    pub center: Vec2,
    /// Radians per 200 pixels of distance.
    pub strength: f32,
}

impl FragmentKernel for Swirl {
    fn shade(&self, coord: Vec2, content: &dyn Sampler) -> Rgba {
        let dir = coord - self.center;
        let angle = self.strength * dir.length() / 200.0;
        let (s, c) = angle.sin_cos();
        let twisted = self.center + Vec2::new(c * dir.x + s * dir.y, -s * dir.x + c * dir.y);
        content.eval(twisted)
    }

    fn name(&self) -> &'static str {
        "swirl"
    }
}

/// Builds the native kernel for a built-in program.
///
/// Fails with [`OpsError::Unsupported`] for custom sources and with
/// [`OpsError::Graph`] when uniforms are missing or mistyped.
pub fn compile(shader: &RuntimeShader) -> OpsResult<Box<dyn FragmentKernel>> {
    shader.validate()?;
    let u = shader.uniforms();
    let kernel: Box<dyn FragmentKernel> = match shader.kind() {
        ProgramKind::Pixelate => {
            let pixel_size = u.float("pixelSize")?;
            if pixel_size <= 0.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "pixelSize must be > 0, got {pixel_size}"
                )));
            }
            Box::new(Pixelate { pixel_size })
        }
        ProgramKind::ChromaticAberration => Box::new(ChromaticAberration {
            offset: u.float("offset")?,
        }),
        ProgramKind::Wave => {
            let resolution = u.float2("resolution")?;
            if resolution.x <= 0.0 || resolution.y <= 0.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "resolution must be positive, got {resolution}"
                )));
            }
            Box::new(Wave {
                amplitude: u.float("amplitude")?,
                frequency: u.float("frequency")?,
                resolution,
            })
        }
        ProgramKind::Swirl => Box::new(Swirl {
            center: u.float2("center")?,
            strength: u.float("strength")?,
        }),
        ProgramKind::Custom => {
            return Err(OpsError::Unsupported(
                "custom shader source has no native kernel".into(),
            ));
        }
    };
    Ok(kernel)
}
