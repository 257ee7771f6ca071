//! Error types for the content store client.

use std::time::Duration;
use thiserror::Error;

use opus8_core::ValidationError;

/// Errors that can occur during store operations.
///
/// Retryable classes (timeout, transport, 5xx) are transient: the retry
/// combinator may attempt them again. Terminal classes (not found,
/// malformed or schema-invalid payloads) cannot be fixed by retrying.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A single attempt exceeded its timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure (DNS, refused, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP error status from the store.
    #[error("server returned status {0}")]
    Server(u16),

    /// The object does not exist in the store.
    #[error("not found in store: {0}")]
    NotFound(String),

    /// The store answered with something unparseable.
    #[error("malformed store response: {0}")]
    MalformedResponse(String),

    /// Fetched bytes failed schema validation.
    #[error("schema-invalid payload: {0}")]
    InvalidPayload(#[from] ValidationError),

    /// The retry budget was exhausted; wraps the last cause.
    #[error("retry budget exhausted after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<StoreError>,
    },
}

impl StoreError {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Timeout(_) | StoreError::Transport(_) => true,
            StoreError::Server(status) => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
