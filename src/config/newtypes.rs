//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction. Invalid values are
//! rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated OAuth2 access token.
///
/// The token is sent as a bearer credential on every query. Its `Debug`
/// implementation masks the value so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use keyyo_manager::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated root URL of the Manager webservice.
///
/// The URL must carry an `http` or `https` scheme and a host. A trailing
/// slash is trimmed so that path segments can be appended with `/`.
///
/// # Example
///
/// ```rust
/// use keyyo_manager::BaseUrl;
///
/// let url = BaseUrl::new("https://api.keyyo.com/manager/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.keyyo.com/manager");
/// assert_eq!(url.host_name(), "api.keyyo.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// The production Manager webservice.
    pub const DEFAULT: &'static str = "https://api.keyyo.com/manager";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is not `http` or
    /// `https`, or if the host is empty.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            host_start: "https://".len(),
            host_end: "https://api.keyyo.com".len(),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_debug_is_masked() {
        let token = AccessToken::new("super-secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "AccessToken(*****)");
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let url = BaseUrl::new("https://api.keyyo.com/manager/").unwrap();
        assert_eq!(url.as_ref(), "https://api.keyyo.com/manager");
    }

    #[test]
    fn test_base_url_accepts_http_with_port() {
        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        assert!(matches!(
            BaseUrl::new("api.keyyo.com/manager"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_rejects_unsupported_scheme() {
        assert!(matches!(
            BaseUrl::new("ftp://api.keyyo.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_rejects_empty_host() {
        assert!(matches!(
            BaseUrl::new("https:///manager"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_default_base_url_matches_parsed_default() {
        let parsed = BaseUrl::new(BaseUrl::DEFAULT).unwrap();
        assert_eq!(BaseUrl::default(), parsed);
        assert_eq!(BaseUrl::default().host_name(), "api.keyyo.com");
    }
}
