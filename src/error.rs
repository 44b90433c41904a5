//! Crate-level error types.

/// Result type for fallible engine boundaries (configuration, validation).
/// The core computations never return errors; they degrade to clamped or
/// zero-valued results instead.
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Configuration content is structurally valid but semantically unusable.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
