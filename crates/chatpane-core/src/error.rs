//! Error types for the chat widget.

use thiserror::Error;

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while sending a message or wiring the widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server returned {status} {status_text}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Reason phrase reported by the browser, may be empty.
        status_text: String,
    },

    /// The body of a success response was not the expected JSON.
    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    /// No response arrived within the configured timeout.
    #[error("Request timed out after {0}ms")]
    Timeout(u32),

    /// A required page element is missing.
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// A page element exists but cannot be used as expected.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid widget configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// What went wrong with a submission, as reported to the caller of `submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Status,
    Transport,
    MalformedReply,
    Timeout,
    /// The page lacked what the request needs (chat id, bad endpoint).
    Request,
    /// The server answered successfully but with an empty output.
    EmptyOutput,
}

impl ChatError {
    /// Classify the error for [`crate::SubmitOutcome::NoReply`].
    pub fn kind(&self) -> FailureKind {
        match self {
            ChatError::Transport(_) => FailureKind::Transport,
            ChatError::Status { .. } => FailureKind::Status,
            ChatError::MalformedReply(_) => FailureKind::MalformedReply,
            ChatError::Timeout(_) => FailureKind::Timeout,
            ChatError::MissingElement(_) | ChatError::Dom(_) | ChatError::Config(_) => {
                FailureKind::Request
            }
        }
    }

    /// True for failures where no usable HTTP response was obtained.
    ///
    /// A plain non-success status is not a transport failure: the server was
    /// reached and declined.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::Transport | FailureKind::MalformedReply | FailureKind::Timeout
        )
    }
}
