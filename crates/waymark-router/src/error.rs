//! Error types for route compilation and request handling.

use thiserror::Error;

/// Fatal route table configuration errors.
///
/// Any of these aborts compilation entirely; the embedding application must
/// not start serving with a malformed table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A route declaration has an empty path.
    #[error("a valid path is required")]
    MissingPath,

    /// A route declaration has no handler.
    #[error("a valid handler is required for {path}")]
    MissingHandler { path: String },
}

/// Request body decoding errors.
///
/// Recovered silently by the dispatcher: a body that fails to decode is
/// treated as an empty object.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("invalid request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// A failure raised inside a handler chain.
///
/// Caught once per request at the dispatcher boundary and mapped onto the
/// error wire contract: status `status_code` (500 when absent) with body
/// `{message, stack, code}`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    /// Human-readable failure description.
    pub message: String,
    /// HTTP status to respond with; defaults to 500 at the boundary.
    pub status_code: Option<u16>,
    /// Optional trace attached by the producer; `null` on the wire when absent.
    pub stack: Option<String>,
}

impl HandlerError {
    /// Creates an error with the given message and no status override.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            stack: None,
        }
    }

    /// Sets the HTTP status the dispatcher should respond with.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attaches a trace string.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}
