//! Error types for graph construction.

use thiserror::Error;

/// Error type for filter graph construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Parameter is finite but outside its valid range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f32,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// Parameter is NaN or infinite.
    #[error("parameter {name} is not finite ({value})")]
    NonFinite {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f32,
    },

    /// A uniform the program reads was never set.
    #[error("missing uniform: {0}")]
    MissingUniform(String),

    /// A uniform has the wrong arity.
    #[error("uniform {name} has type {found}, expected {expected}")]
    UniformType {
        /// Uniform name.
        name: String,
        /// Type the program declares.
        expected: &'static str,
        /// Type that was set.
        found: &'static str,
    },

    /// Effect name not in the catalog.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),
}

impl GraphError {
    /// Fails with [`GraphError::NonFinite`] unless `value` is finite.
    #[inline]
    pub(crate) fn check_finite(name: &str, value: f32) -> GraphResult<f32> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite {
                name: name.to_string(),
                value,
            })
        }
    }

    #[inline]
    pub(crate) fn invalid(name: &str, value: f32, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value,
            reason,
        }
    }
}

/// Result type for graph construction.
pub type GraphResult<T> = Result<T, GraphError>;
