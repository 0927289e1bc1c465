//! Error types for the dispatch contract.
//!
//! `CommandError` is the failure a command itself produced and hands to
//! `respond`; `DispatchError` covers infrastructure failures while
//! delivering a response (serialization, sink writes).

use std::io;

use thiserror::Error;

/// A failure produced by a command's own execution.
///
/// Carries the message delivered in the response envelope and an optional
/// diagnostic stack trace. The trace is surfaced verbatim on the
/// machine-readable channel and rendered as labelled sections on the
/// interactive path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
    stack: Option<String>,
}

impl CommandError {
    /// Creates a command error without a diagnostic stack.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Creates a command error carrying a diagnostic stack trace.
    #[must_use]
    pub fn with_stack(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the diagnostic stack trace, if one was recorded.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

/// Errors surfaced while delivering a response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The response envelope could not be serialized.
    #[error("failed to serialize response envelope: {0}")]
    SerializeEnvelope(#[from] serde_json::Error),

    /// Writing to an output sink failed.
    #[error("failed to write response: {0}")]
    WriteResponse(#[from] io::Error),
}
