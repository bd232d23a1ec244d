//! Runtime fragment program descriptions.

use crate::programs;
use crate::uniform::type_name_for;
use crate::{GraphError, GraphResult, UniformValue, Uniforms};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Which program a [`RuntimeShader`] carries.
///
/// Built-in kinds have a known source and a native CPU counterpart in the
/// reference renderer. `Custom` programs can only run on a host that
/// compiles shader source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    /// [`programs::PIXELATE`]
    Pixelate,
    /// [`programs::CHROMATIC_ABERRATION`]
    ChromaticAberration,
    /// [`programs::WAVE`]
    Wave,
    /// [`programs::SWIRL`]
    Swirl,
    /// Caller-supplied source.
    Custom,
}

impl ProgramKind {
    /// Source of a built-in program, `None` for `Custom`.
    pub fn source(self) -> Option<&'static str> {
        match self {
            Self::Pixelate => Some(programs::PIXELATE),
            Self::ChromaticAberration => Some(programs::CHROMATIC_ABERRATION),
            Self::Wave => Some(programs::WAVE),
            Self::Swirl => Some(programs::SWIRL),
            Self::Custom => None,
        }
    }

    /// Uniforms the program reads, with their arity.
    pub fn declared_uniforms(self) -> &'static [(&'static str, usize)] {
        match self {
            Self::Pixelate => &[("pixelSize", 1)],
            Self::ChromaticAberration => &[("offset", 1)],
            Self::Wave => &[("amplitude", 1), ("frequency", 1), ("resolution", 2)],
            Self::Swirl => &[("center", 2), ("strength", 1)],
            Self::Custom => &[],
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pixelate => "pixelate",
            Self::ChromaticAberration => "chromatic_aberration",
            Self::Wave => "wave",
            Self::Swirl => "swirl",
            Self::Custom => "custom",
        }
    }
}

/// A fragment program plus its uniform values.
///
/// # Example
///
/// ```rust
/// use rfx_graph::{ProgramKind, RuntimeShader};
///
/// let mut shader = RuntimeShader::builtin(ProgramKind::Pixelate);
/// shader.set_float("pixelSize", 12.0).unwrap();
/// shader.validate().unwrap();
/// assert_eq!(shader.uniforms().float("pixelSize").unwrap(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeShader {
    kind: ProgramKind,
    source: Cow<'static, str>,
    input: Cow<'static, str>,
    uniforms: Uniforms,
}

impl RuntimeShader {
    /// A built-in program with no uniforms set yet.
    ///
    /// `ProgramKind::Custom` yields an empty source; use
    /// [`RuntimeShader::custom`] for caller-supplied programs.
    pub fn builtin(kind: ProgramKind) -> Self {
        Self {
            kind,
            source: Cow::Borrowed(kind.source().unwrap_or_default()),
            input: Cow::Borrowed(programs::CONTENT_INPUT),
            uniforms: Uniforms::new(),
        }
    }

    /// A caller-supplied program sampling `input`.
    pub fn custom(source: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            kind: ProgramKind::Custom,
            source: Cow::Owned(source.into()),
            input: Cow::Owned(input.into()),
            uniforms: Uniforms::new(),
        }
    }

    /// Sets a `float` uniform.
    pub fn set_float(&mut self, name: &str, v: f32) -> GraphResult<&mut Self> {
        self.uniforms.set(name, v)?;
        Ok(self)
    }

    /// Sets a `float2` uniform.
    pub fn set_float2(&mut self, name: &str, x: f32, y: f32) -> GraphResult<&mut Self> {
        self.uniforms.set(name, Vec2::new(x, y))?;
        Ok(self)
    }

    /// Sets a `float3` uniform.
    pub fn set_float3(&mut self, name: &str, v: [f32; 3]) -> GraphResult<&mut Self> {
        self.uniforms.set(name, UniformValue::Float3(v))?;
        Ok(self)
    }

    /// Sets a `float4` uniform.
    pub fn set_float4(&mut self, name: &str, v: [f32; 4]) -> GraphResult<&mut Self> {
        self.uniforms.set(name, UniformValue::Float4(v))?;
        Ok(self)
    }

    /// Checks that every declared uniform is set with the right arity.
    pub fn validate(&self) -> GraphResult<()> {
        for &(name, arity) in self.kind.declared_uniforms() {
            let value = self
                .uniforms
                .get(name)
                .ok_or_else(|| GraphError::MissingUniform(name.to_string()))?;
            if value.arity() != arity {
                return Err(GraphError::UniformType {
                    name: name.to_string(),
                    expected: type_name_for(arity),
                    found: value.type_name(),
                });
            }
        }
        Ok(())
    }

    /// Program kind.
    #[inline]
    pub fn kind(&self) -> ProgramKind {
        self.kind
    }

    /// Program source text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the sampled input.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Uniform values.
    #[inline]
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }
}
