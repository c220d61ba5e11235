//! Error types for decalcast.

use thiserror::Error;

/// The main error type for decalcast operations.
#[derive(Error, Debug)]
pub enum DecalError {
    /// The configured image topic is empty or malformed.
    #[error("invalid image topic '{0}'")]
    InvalidTopic(String),

    /// The configured coordinate frame is empty or malformed.
    #[error("invalid frame name '{0}'")]
    InvalidFrame(String),

    /// A transform lookup failed because the frame is not known.
    #[error("coordinate frame '{0}' is unknown")]
    UnknownFrame(String),

    /// A transform lookup succeeded but the result is too old to use.
    #[error("transform for frame '{frame}' is stale ({age_seconds:.2}s old)")]
    StaleTransform { frame: String, age_seconds: f32 },

    /// An image buffer does not match its declared dimensions.
    #[error("image buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A quad index is outside the configured quad count.
    #[error("quad index {index} out of range (count {count})")]
    QuadIndexOutOfRange { index: usize, count: usize },

    /// Rendering error reported by the engine capability layer.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for decalcast operations.
pub type Result<T> = std::result::Result<T, DecalError>;
