//! Error types for MongoScope
//!
//! The diagram engine is deliberately tolerant: malformed schema input is
//! coerced rather than rejected, and stale identifiers are ignored. The
//! variants here cover the cases that genuinely cannot be recovered from,
//! plus IO/parse failures at the configuration boundary.

use thiserror::Error;

/// The main error type for the diagram engine
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Schema input had an unusable top-level shape
    #[error("Invalid schema format: {0}")]
    SchemaFormat(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DiagramError {
    /// Create a schema format error
    pub fn schema_format(msg: impl Into<String>) -> Self {
        DiagramError::SchemaFormat(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        DiagramError::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DiagramError::Internal(msg.into())
    }
}

/// Result type alias using DiagramError
pub type DiagramResult<T> = Result<T, DiagramError>;

// ============================================================================
// Tests
// ============================================================================
