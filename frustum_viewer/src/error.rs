//! Error types for the frustum viewer
//!
//! This module defines the error type used throughout the viewer: camera
//! parameter validation, surface mounting, backend failures and startup.

use std::fmt;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Viewer errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (wgpu surface, device, ...)
    BackendError(String),

    /// Initialization failed (window, drawing surface, adapter)
    InitializationFailed(String),

    /// A parameter was rejected before it could reach a camera or panel field
    InvalidParameter(String),

    /// The operation is not allowed in the current state (double mount, disposed viewer, ...)
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
