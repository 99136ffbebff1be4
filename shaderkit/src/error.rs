//! Error types for ShaderKit
//!
//! This module defines the general error type used by backends and program
//! handles. Build failures are reported separately through
//! [`BuildError`](crate::program::BuildError), which carries itemized diagnostics.

use std::fmt;

/// Result type for ShaderKit operations
pub type ShaderKitResult<T> = Result<T, ShaderKitError>;

/// ShaderKit engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderKitError {
    /// Backend-specific error (OpenGL, mock, etc.)
    BackendError(String),

    /// Invalid resource (unknown uniform, released handle, etc.)
    InvalidResource(String),

    /// Initialization failed (backend context, function loading)
    InitializationFailed(String),

    /// Reading a shader source from disk failed
    Io(String),
}

impl fmt::Display for ShaderKitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKitError::BackendError(msg) => write!(f, "Backend error: {}", msg),
            ShaderKitError::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            ShaderKitError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            ShaderKitError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ShaderKitError {}

impl From<std::io::Error> for ShaderKitError {
    fn from(err: std::io::Error) -> Self {
        ShaderKitError::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
