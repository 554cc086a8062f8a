// error.rs - Error types for the surface simulation

use thiserror::Error;

/// Result type for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Errors raised by the surface field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// Invalid construction parameters. The field is never built in this state.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Direct node query outside the chain.
    #[error("Node index {index} out of range (field has {len} nodes)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SurfaceError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SurfaceError::Configuration(msg.into())
    }
}
