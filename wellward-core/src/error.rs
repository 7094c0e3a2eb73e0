//! Error types for wellward-core

use thiserror::Error;

/// Main error type for the wellward-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A date/time string failed to parse under the expected
    /// `DD/MM/YYYY[, HH:MM am|pm]` grammar
    #[error("malformed date {value:?}: {message}")]
    MalformedDate { value: String, message: String },

    /// A record map failed structural validation at the store boundary
    #[error("invalid {kind} record: {message}")]
    Decode { kind: String, message: String },

    /// A record was inserted into a collection of a different activity kind
    #[error("record kind mismatch: collection holds {expected}, got {actual}")]
    KindMismatch { expected: String, actual: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Quote source error
    #[error("quote source error: {0}")]
    Quote(String),
}

impl Error {
    /// Shorthand for a malformed date/time error.
    pub fn malformed_date(value: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedDate {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a decode error at the store boundary.
    pub fn decode(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for wellward-core
pub type Result<T> = std::result::Result<T, Error>;
