//! Error taxonomy for REST API calls.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is handled locally. Every failure is classified and returned
//! to the caller, which owns rendering and any retry decision:
//!
//! - `Network`: the request never reached the server.
//! - `Api`: the server answered with a non-2xx status and a JSON error body.
//! - `ResponseParse`: a body that should have been JSON was not. This wins
//!   over `Api` when the error body itself is malformed.
//! - `EncodedData`: the double-encoded `data` field of the site endpoints
//!   did not parse. No recovery is attempted.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Failure reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    Setup(String),

    /// The request could not be built from its descriptor.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request was sent but no response arrived (DNS, refused, reset, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// A response arrived but its body could not be read.
    #[error("response body unreadable: {0}")]
    Body(String),
}

/// Errors produced by [`JetpackApi`](crate::api::JetpackApi) operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure; the server was not reached.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The server responded with a status outside `200..300`.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        body: Value,
    },

    /// A response body was not valid JSON.
    #[error("Couldn't understand Jetpack's REST API response ({kind})")]
    ResponseParse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The outer envelope parsed but its `data` string did not.
    #[error("encoded response data is not valid JSON: {0}")]
    EncodedData(String),

    /// A request body could not be serialized.
    #[error("request body serialization failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub(crate) fn response_parse(source: serde_json::Error) -> Self {
        Self::ResponseParse { kind: parse_failure_name(&source), source }
    }

    /// `true` when the server was never reached.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// HTTP status of an [`ApiError::Api`] failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error body of an [`ApiError::Api`] failure.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Short name of a JSON parse failure, embedded in the user-facing message.
///
/// Empty and truncated bodies count as syntax errors, as in `JSON.parse`.
pub(crate) fn parse_failure_name(err: &serde_json::Error) -> &'static str {
    use serde_json::error::Category;

    match err.classify() {
        Category::Io => "IoError",
        Category::Syntax | Category::Eof => "SyntaxError",
        Category::Data => "DataError",
    }
}
