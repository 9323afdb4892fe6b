//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cache, serialization, boundary, and input validation
/// failures.
#[derive(Debug)]
pub enum OdopError {
    /// An error from the underlying API client.
    Api(odop_api::Error),
    /// A cache operation failed (e.g. deserialization of cached data).
    Cache(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// A boundary dataset could not be loaded.
    Boundary(crate::boundary::BoundaryError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for OdopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Cache(msg) => write!(f, "Cache error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Boundary(e) => write!(f, "Boundary error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for OdopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Boundary(e) => Some(e),
            _ => None,
        }
    }
}

impl From<odop_api::Error> for OdopError {
    fn from(e: odop_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for OdopError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<crate::boundary::BoundaryError> for OdopError {
    fn from(e: crate::boundary::BoundaryError) -> Self {
        Self::Boundary(e)
    }
}
