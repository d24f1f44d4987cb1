//! Error types for APDU operations

use crate::response::status::StatusWord;
use crate::transport::TransportError;

/// Error type for APDU operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw response bytes were too short to hold a status word
    #[error("Invalid response length: {0}")]
    InvalidResponseLength(usize),

    /// Card returned a non-success status word
    #[error("Card returned error status: {0}")]
    Status(StatusWord),

    /// Transport-level failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Context with source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },
}

impl Error {
    /// Wrap this error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The transport error at the root of this error, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Context { source, .. } => source.transport(),
            _ => None,
        }
    }

    /// The status word at the root of this error, if any
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            Self::Status(sw) => Some(*sw),
            Self::Context { source, .. } => source.status(),
            _ => None,
        }
    }
}
