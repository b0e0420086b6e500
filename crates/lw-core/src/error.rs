/// Alias for `Result<T, LwError>`.
pub type LwResult<T> = Result<T, LwError>;

/// Errors that can occur when building or loading a world.
#[derive(Debug, thiserror::Error)]
pub enum LwError {
    /// A world configuration value is out of bounds.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// The offending configuration field.
        field: &'static str,
        /// What the field must satisfy.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}
