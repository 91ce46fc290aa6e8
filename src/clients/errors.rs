//! Error types for webservice queries.
//!
//! - [`TransportError`]: the HTTP mechanism is unavailable or the call could not complete
//! - [`QueryError`]: every way a single query can fail, including the HTTP
//!   status mapping and body decoding
//!
//! # Example
//!
//! ```rust,ignore
//! use keyyo_manager::{Client, HttpMethod, QueryError};
//!
//! match client.query(HttpMethod::Get, &url, None).await {
//!     Ok(body) => println!("Body: {body}"),
//!     Err(QueryError::Forbidden { reason }) => println!("Forbidden: {reason:?}"),
//!     Err(QueryError::NotFound { reason }) => println!("Not found: {reason:?}"),
//!     Err(e) => println!("Query failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Failure of the underlying HTTP mechanism.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be initialized or configured.
    #[error("HTTP transport is unavailable: {reason}")]
    Unavailable {
        /// Why the transport could not be set up.
        reason: String,
    },

    /// The request could not be sent or its response could not be read.
    #[error("Could not execute HTTP request: {reason}")]
    CallFailed {
        /// The error reported by the HTTP mechanism.
        reason: String,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::CallFailed {
            reason: error.to_string(),
        }
    }
}

/// Error returned by [`Client::query`](crate::Client::query).
///
/// HTTP failures carry the server's `X-Status-Reason` header as `reason`
/// when the response included one.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The HTTP call itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered 403.
    #[error("Forbidden access{}", format_reason(.reason))]
    Forbidden {
        /// Reason given by the server, if any.
        reason: Option<String>,
    },

    /// The server answered 404.
    #[error("Resource not found{}", format_reason(.reason))]
    NotFound {
        /// Reason given by the server, if any.
        reason: Option<String>,
    },

    /// The server answered 500 or any other unexpected status.
    #[error("Internal server error (HTTP {code}){}", format_reason(.reason))]
    InternalServerError {
        /// The HTTP status code that was received.
        code: u16,
        /// Reason given by the server, if any.
        reason: Option<String>,
    },

    /// A non-empty response body was not valid JSON.
    #[error("Could not parse the response body: {source}")]
    Decode {
        /// The JSON parser error.
        #[source]
        source: serde_json::Error,
    },
}

impl QueryError {
    /// Returns the HTTP status code behind this error, if the server answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::InternalServerError { code, .. } => Some(*code),
            Self::Transport(_) | Self::Decode { .. } => None,
        }
    }

    /// Returns the server-provided reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Forbidden { reason }
            | Self::NotFound { reason }
            | Self::InternalServerError { reason, .. } => reason.as_deref(),
            Self::Transport(_) | Self::Decode { .. } => None,
        }
    }
}

fn format_reason(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map_or_else(String::new, |r| format!(": {r}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_includes_reason_in_message() {
        let error = QueryError::Forbidden {
            reason: Some("default profile cannot be deleted".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Forbidden access: default profile cannot be deleted"
        );
        assert_eq!(error.status_code(), Some(403));
        assert_eq!(error.reason(), Some("default profile cannot be deleted"));
    }

    #[test]
    fn test_not_found_without_reason() {
        let error = QueryError::NotFound { reason: None };
        assert_eq!(error.to_string(), "Resource not found");
        assert_eq!(error.status_code(), Some(404));
        assert!(error.reason().is_none());
    }

    #[test]
    fn test_internal_server_error_keeps_status_code() {
        let error = QueryError::InternalServerError {
            code: 502,
            reason: None,
        };
        assert_eq!(error.status_code(), Some(502));
        assert!(error.to_string().contains("502"));
    }

    #[test]
    fn test_transport_error_converts_into_query_error() {
        let error: QueryError = TransportError::Unavailable {
            reason: "tls backend".to_string(),
        }
        .into();

        assert!(matches!(error, QueryError::Transport(_)));
        assert!(error.status_code().is_none());
        assert!(error.to_string().contains("tls backend"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &QueryError::NotFound { reason: None };
        let _: &dyn std::error::Error = &TransportError::CallFailed {
            reason: "reset".to_string(),
        };
    }
}
