/// Convenience result type used across the crate.
pub type CollageResult<T> = Result<T, CollageError>;

/// Top-level error taxonomy used by generator, compiler and presenter APIs.
#[derive(thiserror::Error, Debug)]
pub enum CollageError {
    /// A caller-supplied argument is outside its closed set (e.g. an unknown density label).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The texture catalog is unusable (empty, duplicate ids, or mismatched with a layout).
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Invalid configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while compiling or painting a layout.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl CollageError {
    /// Build a [`CollageError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`CollageError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`CollageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CollageError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CollageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
