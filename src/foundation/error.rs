use crate::foundation::ids::NodeId;

/// Convenience result type used across kinema.
pub type AnimateResult<T> = Result<T, AnimateError>;

/// Top-level error taxonomy used by the composition APIs.
///
/// Timing drift and skipped windows are corrected internally and never show up here; every
/// variant is something the caller did.
#[derive(thiserror::Error, Debug)]
pub enum AnimateError {
    /// An operation that is never valid for the given tree shape or node kind.
    #[error("misuse: {0}")]
    Misuse(String),

    /// A node id that does not belong to this tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// Invalid timeline configuration (keyframes, repeat count, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from a host-provided time source or property.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimateError {
    /// Build an [`AnimateError::Misuse`] value.
    pub fn misuse(msg: impl Into<String>) -> Self {
        Self::Misuse(msg.into())
    }

    /// Build an [`AnimateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AnimateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error reports a programming mistake rather than bad data.
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::Misuse(_) | Self::UnknownNode(_))
    }
}

impl From<serde_json::Error> for AnimateError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
