//! Error types for rendering.

use thiserror::Error;

/// Error type for rendering operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Node cannot be evaluated on the CPU.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Shader description is malformed.
    #[error(transparent)]
    Graph(#[from] rfx_graph::GraphError),

    /// Buffer error.
    #[error(transparent)]
    Core(#[from] rfx_core::Error),
}

/// Result type for rendering operations.
pub type OpsResult<T> = Result<T, OpsError>;
