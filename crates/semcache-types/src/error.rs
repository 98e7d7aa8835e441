//! Typed error definitions for the SemCache SDK.
//!
//! Every failure surfaces to the caller as exactly one [`ClientError`]
//! variant; nothing is swallowed or retried internally. All errors are
//! designed to be:
//!
//! - **Serializable** for logging and transport via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants
//! - **Composable** via thiserror derive macros

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when calling the SemCache API.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "error")]
pub enum ClientError {
    /// Credential rejected by the API (401/403).
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// Rate limited by the API (429).
    #[error("Rate limited: {message}{}", retry_after_secs.map(|s| format!(", retry after {}s", s)).unwrap_or_default())]
    RateLimit {
        message: String,
        /// Seconds to wait before retrying, if provided by the server.
        retry_after_secs: Option<u64>,
    },

    /// Request rejected by the API (400) or by a client-side check
    /// before any network call.
    #[error("Invalid request: {message}")]
    Validation {
        message: String,
        /// Parsed error body, when the API returned one.
        details: Option<Value>,
    },

    /// Transport-level failure (DNS, connect, TLS, ...).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The call exceeded its deadline, or the API reported 408.
    #[error("{message}")]
    Timeout { message: String },

    /// The API reported a 5xx error.
    #[error("Server error ({status}): {message}")]
    Server {
        message: String,
        /// HTTP status code (500, 502, 503 or 504).
        status: u16,
    },

    /// Any other non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        message: String,
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code.
        code: String,
        /// Raw response body, parsed when possible.
        details: Option<Value>,
    },
}

/// Standard Result type using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// HTTP status code carried by this error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Server { status, .. }
            | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if a caller-side retry could plausibly succeed.
    ///
    /// The client itself never retries; callers layer their own
    /// retry/backoff policy on top of this predicate.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Server { .. }
        )
    }
}
