//! Error types for dsinsights-core.

use thiserror::Error;

/// Result type alias for dsinsights operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dsinsights operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The capture table could not be loaded from its source.
    #[error("load error: {0}")]
    Load(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No estimator is registered under the requested name.
    #[error("unknown estimator: {0}")]
    UnknownEstimator(String),

    /// An estimator with this name is already registered.
    #[error("estimator already registered: {0}")]
    DuplicateEstimator(String),

    /// Estimator construction, training or evaluation failed.
    #[error("estimator error: {0}")]
    EstimatorError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be decoded.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
