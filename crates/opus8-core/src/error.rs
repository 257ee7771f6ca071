//! Error types for opus8 core.

use std::fmt;
use thiserror::Error;

/// Errors for malformed identifiers and addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid content address: {0}")]
    InvalidAddress(String),

    #[error("invalid wallet address: {0}")]
    InvalidWallet(String),

    #[error("invalid fingerprint hash: {0}")]
    InvalidHash(String),

    #[error("unrecognized declaration id: {0}")]
    UnknownIdForm(String),

    #[error("no content address found in: {0}")]
    NoAddress(String),
}

/// A single field-qualified validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the offending field, e.g. `identity.artist.name`.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Schema or invariant violation.
///
/// Carries every violation found in one pass, not just the first, so a
/// caller sees the complete picture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", self.summary())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Wrap a list of field errors.
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// A single-field violation (the builder's fail-fast path).
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(path, message)],
        }
    }

    /// All violations as display strings.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    fn summary(&self) -> String {
        self.messages().join("; ")
    }
}

impl From<FormatError> for ValidationError {
    fn from(e: FormatError) -> Self {
        ValidationError::single("", e.to_string())
    }
}
