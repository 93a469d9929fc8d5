/// Convenience result type used across textmotion APIs.
pub type MotionResult<T> = Result<T, MotionError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type for textmotion operations.
///
/// Malformed markup, rejected tags and registry misses are not errors; they degrade to
/// plain text or skipped effects. Errors only surface while building profiles and configs.
pub enum MotionError {
    /// Invalid input values (effect params, frame rates, windows).
    #[error("validation error: {0}")]
    Validation(String),

    /// Rejected profile authoring operation (duplicate or empty component key).
    #[error("registry error: {0}")]
    Registry(String),

    /// Inconsistent renderer or profile configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization or deserialization failures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Registry`] error.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Build a [`MotionError::Config`] error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MotionError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
