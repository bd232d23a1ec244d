//! Uniform values for runtime fragment programs.

use crate::{GraphError, GraphResult};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A float uniform of arity 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    /// `float`
    Float(f32),
    /// `vec2` / `float2`
    Float2([f32; 2]),
    /// `vec3` / `float3`
    Float3([f32; 3]),
    /// `vec4` / `float4`
    Float4([f32; 4]),
}

impl UniformValue {
    /// Number of components.
    pub fn arity(&self) -> usize {
        match self {
            Self::Float(_) => 1,
            Self::Float2(_) => 2,
            Self::Float3(_) => 3,
            Self::Float4(_) => 4,
        }
    }

    /// Shading-language type name.
    pub fn type_name(&self) -> &'static str {
        type_name_for(self.arity())
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[f32] {
        match self {
            Self::Float(v) => std::slice::from_ref(v),
            Self::Float2(v) => v,
            Self::Float3(v) => v,
            Self::Float4(v) => v,
        }
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.as_slice().iter().all(|v| v.is_finite())
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Float2(v.to_array())
    }
}

pub(crate) fn type_name_for(arity: usize) -> &'static str {
    match arity {
        1 => "float",
        2 => "float2",
        3 => "float3",
        _ => "float4",
    }
}

/// Uniform name to value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uniforms(BTreeMap<String, UniformValue>);

impl Uniforms {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, rejecting non-finite components.
    pub fn set(&mut self, name: &str, value: impl Into<UniformValue>) -> GraphResult<()> {
        let value = value.into();
        if let Some(bad) = value.as_slice().iter().find(|v| !v.is_finite()) {
            return Err(GraphError::NonFinite {
                name: name.to_string(),
                value: *bad,
            });
        }
        self.0.insert(name.to_string(), value);
        Ok(())
    }

    /// Raw lookup.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.0.get(name)
    }

    /// Reads a `float` uniform.
    pub fn float(&self, name: &str) -> GraphResult<f32> {
        match self.require(name)? {
            UniformValue::Float(v) => Ok(*v),
            other => Err(mismatch(name, 1, other)),
        }
    }

    /// Reads a `float2` uniform.
    pub fn float2(&self, name: &str) -> GraphResult<Vec2> {
        match self.require(name)? {
            UniformValue::Float2(v) => Ok(Vec2::from_array(*v)),
            other => Err(mismatch(name, 2, other)),
        }
    }

    /// Number of uniforms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no uniform is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &str) -> GraphResult<&UniformValue> {
        self.0
            .get(name)
            .ok_or_else(|| GraphError::MissingUniform(name.to_string()))
    }
}

fn mismatch(name: &str, expected: usize, found: &UniformValue) -> GraphError {
    GraphError::UniformType {
        name: name.to_string(),
        expected: type_name_for(expected),
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let mut u = Uniforms::new();
        u.set("strength", 1.5f32).unwrap();
        u.set("center", Vec2::new(125.0, 125.0)).unwrap();
        assert_eq!(u.float("strength").unwrap(), 1.5);
        assert_eq!(u.float2("center").unwrap(), Vec2::new(125.0, 125.0));
        assert_eq!(u.len(), 2);
    }

    #[test]
    fn test_missing_and_mismatch() {
        let mut u = Uniforms::new();
        u.set("offset", 5.0f32).unwrap();
        assert_eq!(u.float("nope"), Err(GraphError::MissingUniform("nope".into())));
        assert_eq!(
            u.float2("offset"),
            Err(GraphError::UniformType {
                name: "offset".into(),
                expected: "float2",
                found: "float",
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut u = Uniforms::new();
        let err = u.set("resolution", UniformValue::Float2([500.0, f32::NAN])).unwrap_err();
        assert!(matches!(err, GraphError::NonFinite { .. }));
        assert!(u.is_empty());
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut u = Uniforms::new();
        u.set("resolution", Vec2::splat(500.0)).unwrap();
        u.set("amplitude", 1.0f32).unwrap();
        u.set("frequency", 8.0f32).unwrap();
        let names: Vec<_> = u.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["amplitude", "frequency", "resolution"]);
    }

    #[test]
    fn test_arity() {
        assert_eq!(UniformValue::Float4([0.0; 4]).arity(), 4);
        assert_eq!(UniformValue::Float3([0.0; 3]).type_name(), "float3");
        assert_eq!(UniformValue::Float2([1.0, 2.0]).as_slice(), &[1.0, 2.0]);
    }
}
