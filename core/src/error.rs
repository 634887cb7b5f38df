//! Error types for the downloader API client.
//!
//! # Design
//! Every operation resolves to exactly one outcome: a decoded payload or an
//! `ApiError`. Transport and decode failures carry no status code; HTTP
//! failures keep the status plus whatever message the server put in its error
//! envelope, falling back to [`GENERIC_HTTP_ERROR`] when the envelope is
//! missing or unreadable. Nothing is retried.

use thiserror::Error;

/// Fallback message for error responses with no usable `message` field.
pub const GENERIC_HTTP_ERROR: &str = "the API reported an error";

/// Errors returned by `VideoClient` parse methods and the `VideoApi` facade.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP exchange could not be completed at all (DNS failure,
    /// connection refused, timeout).
    #[error("failed to connect to the API: {0}")]
    Transport(String),

    /// The server completed the exchange with status >= 400.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("malformed API response: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("invalid request payload: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of the failed exchange, when one completed at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
