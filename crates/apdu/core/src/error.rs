//! Error types for APDU operations

use crate::transport::TransportError;

/// Result type for APDU operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for APDU operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-related errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response shorter than a status word
    #[error("Invalid response length: {0}")]
    InvalidResponseLength(usize),

    /// Command body does not fit a short APDU
    #[error("Invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Free-form error
    #[error("{0}")]
    Message(String),

    /// Error with added context
    #[error("{context}: {source}")]
    Context {
        /// What was being attempted
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a free-form error
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap this error with context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context layers
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// The transport error at the root of this error, if any
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self.root() {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Extension trait for adding context to results
pub trait ResultExt<T> {
    /// Add context to the error variant
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|err| err.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_preserves_root() {
        let result: std::result::Result<(), TransportError> = Err(TransportError::Timeout);
        let err = result.context("Transport error").unwrap_err();

        assert_eq!(err.to_string(), "Transport error: Command timed out");
        assert!(matches!(err.as_transport(), Some(TransportError::Timeout)));
    }
}
