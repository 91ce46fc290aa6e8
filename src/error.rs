//! Configuration error types for the Keyyo Manager client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid token, URL or version is rejected before any request is issued.
//!
//! # Example
//!
//! ```rust
//! use keyyo_manager::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ManagerConfig`](crate::ManagerConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid OAuth2 access token.")]
    EmptyAccessToken,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.keyyo.com/manager').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected a non-empty version segment such as '1.0'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Required field '{field}' must be set.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "ftp://nope".to_string(),
        };
        assert!(error.to_string().contains("ftp://nope"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "access_token",
        };
        let message = error.to_string();
        assert!(message.contains("access_token"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let _: &dyn std::error::Error = &ConfigError::EmptyAccessToken;
    }
}
