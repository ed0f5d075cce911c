use thiserror::Error;

/// Error types for the morphparam-rs library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MorphParamError {
    /// Error indicating a mismatch in vector or mask dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Error for invalid parameter values or indices.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid state in the iteration protocol or data structure.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for morphparam-rs operations.
pub type Result<T> = std::result::Result<T, MorphParamError>;

/// Extensions for converting from other error types.
impl From<String> for MorphParamError {
    fn from(s: String) -> Self {
        MorphParamError::Other(s)
    }
}

impl From<&str> for MorphParamError {
    fn from(s: &str) -> Self {
        MorphParamError::Other(s.to_string())
    }
}
