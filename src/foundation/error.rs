/// Result type used across pixblend.
pub type BlendResult<T> = Result<T, BlendError>;

/// Errors reported by the checked entry points.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BlendError {
    /// Invalid buffers, strides, rectangles or row lengths from the caller.
    #[error("validation error: {0}")]
    Validation(String),

    /// A valid request with no routine behind it (e.g. an unsupported scaled composite).
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl BlendError {
    /// Build a [`BlendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlendError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
