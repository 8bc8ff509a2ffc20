//! Error types for the domain layer.

use thiserror::Error;

/// Errors a response processor reports back to the dialogue engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessingError {
    /// The answer could not be interpreted; the user should be prompted again
    /// with `message`.
    #[error("{message}")]
    ResponseNotUnderstood { message: String },

    /// Unexpected failure while processing an otherwise valid answer.
    #[error("Response processing failed: {reason}")]
    ResponseProcessing { reason: String },
}

impl ProcessingError {
    /// Creates a "not understood" error carrying the user-facing message.
    pub fn not_understood(message: impl Into<String>) -> Self {
        ProcessingError::ResponseNotUnderstood {
            message: message.into(),
        }
    }

    /// Creates a processing failure.
    pub fn processing(reason: impl Into<String>) -> Self {
        ProcessingError::ResponseProcessing {
            reason: reason.into(),
        }
    }

    /// Returns true if the dialogue can recover by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProcessingError::ResponseNotUnderstood { .. })
    }

    /// Message to show the user, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ProcessingError::ResponseNotUnderstood { message } => Some(message),
            ProcessingError::ResponseProcessing { .. } => None,
        }
    }
}
