//! Error types for paydesk.
//!
//! One error type is shared by every crate in the workspace, with explicit
//! variants for transport, API, filesystem, decoding and input validation
//! failures. The browsing engine itself never produces an error.

use std::fmt;
use thiserror::Error;

/// The unified error type for paydesk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The gateway API answered with a non-success status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Filesystem errors from snapshot sources and exports.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload could not be decoded as the expected JSON shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Input validation errors (bad URL, date, amount, page size).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Create a decode error from anything displayable.
    pub fn decode(message: impl fmt::Display) -> Self {
        Error::Decode {
            message: message.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the gateway API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body (if present).
    pub error: Option<String>,
    /// Human readable message from the response body (if present).
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if the API rejected our credentials.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid source URL.
    #[error("invalid source URL '{value}': {reason}")]
    SourceUrl { value: String, reason: String },

    /// Unknown entity name.
    #[error("unknown entity '{value}'")]
    Entity { value: String },

    /// Invalid calendar date in filter criteria.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    Date { value: String },

    /// Invalid amount bound in filter criteria.
    #[error("invalid amount '{value}'")]
    Amount { value: String },

    /// Invalid page request.
    #[error("invalid page request: {reason}")]
    Page { reason: String },

    /// A record payload that is not a JSON object.
    #[error("invalid record: {reason}")]
    Record { reason: String },

    /// Text that is not valid JSON.
    #[error("invalid JSON at line {line}, column {column}: {reason}")]
    Json {
        line: usize,
        column: usize,
        reason: String,
    },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
