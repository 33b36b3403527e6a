/// Convenience result type used across scrollwork.
pub type ScrollworkResult<T> = Result<T, ScrollworkError>;

/// Top-level error taxonomy.
///
/// Only configuration loading and the command line surface these. The runtime components
/// (sampler, metrics cache, calculator, intro controller) degrade to neutral values instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollworkError {
    /// Configuration document is malformed or holds out-of-range values.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid caller-provided input (scripts, geometry handed to the CLI).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollworkError {
    /// Build a [`ScrollworkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollworkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollworkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
