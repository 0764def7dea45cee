//! Error types for area editing.

use thiserror::Error;

/// Errors raised by area construction, external updates and configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AreaError {
    #[error("Invalid area dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Update addressed to area {found}, expected {expected}")]
    IdMismatch { expected: String, found: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for area operations.
pub type AreaResult<T> = Result<T, AreaError>;
