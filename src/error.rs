//! # Error Types
//!
//! Custom error types for Stick Shaper using `thiserror`.

use thiserror::Error;

/// Main error type for Stick Shaper
#[derive(Debug, Error)]
pub enum ShaperError {
    /// A shaping parameter violates its invariant
    #[error("Invalid shaping parameter: {0}")]
    InvalidShaping(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Malformed input script
    #[error("Input error: {0}")]
    Input(String),

    /// JSON encoding or decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Stick Shaper
pub type Result<T> = std::result::Result<T, ShaperError>;
