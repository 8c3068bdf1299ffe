//! Error types for tailcast.

use thiserror::Error;

/// Result type alias for tailcast operations.
pub type Result<T> = std::result::Result<T, TailError>;

/// Error types for the compounding and calibration engine.
#[derive(Error, Debug)]
pub enum TailError {
    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown strategy name.
    #[error("Unknown strategy: {name:?} (expected \"direct\", \"fast\" or \"biased\")")]
    UnknownStrategy { name: String },

    /// Histogram layouts differ where identical layouts are required.
    #[error("Histogram layout mismatch: {expected} buckets expected, got {actual}")]
    LayoutMismatch { expected: usize, actual: usize },

    /// Empty data where at least one observation is required.
    #[error("Empty data provided for {context}")]
    EmptyData { context: String },
}

impl TailError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a layout mismatch error.
    pub fn layout_mismatch(expected: usize, actual: usize) -> Self {
        Self::LayoutMismatch { expected, actual }
    }

    /// Create an empty data error.
    pub fn empty_data(context: impl Into<String>) -> Self {
        Self::EmptyData {
            context: context.into(),
        }
    }
}
