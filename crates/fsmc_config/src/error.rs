//! Error types for transition-table loading and validation.

/// Errors that can occur when loading or validating a transition-table file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the table file.
    #[error("failed to read transition table: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse transition table: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
