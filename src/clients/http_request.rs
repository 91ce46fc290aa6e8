//! HTTP request types handed to a [`Transport`](crate::clients::Transport).

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Header carrying the bearer credential.
const AUTHORIZATION_HEADER: &str = "Authorization";

/// Returns `headers` in name order with the credential masked, for `Debug` output.
pub(crate) fn redacted_headers(headers: &HashMap<String, String>) -> BTreeMap<&str, &str> {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case(AUTHORIZATION_HEADER) {
                (name.as_str(), "*****")
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

/// HTTP methods supported by the Manager webservice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources.
    Get,
    /// HTTP POST method for creating collection members and updating singular resources.
    Post,
    /// HTTP PUT method for updating collections.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the verb as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that carry a form-encoded body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved HTTP request.
///
/// The [`Client`](crate::Client) builds these with the absolute URL (query
/// options already appended), the authorization headers and the encoded form
/// body.
///
/// # Example
///
/// ```rust
/// use keyyo_manager::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::new(HttpMethod::Post, "https://api.keyyo.com/manager/1.0/services")
///     .with_header("Authorization", "Bearer token")
///     .with_form_body("forced=1");
///
/// assert_eq!(request.body.as_deref(), Some("forced=1"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// Headers to send.
    pub headers: HashMap<String, String>,
    /// The form-encoded body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets a form-encoded body and the matching `Content-Type` header.
    #[must_use]
    pub fn with_form_body(mut self, body: impl Into<String>) -> Self {
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self.body = Some(body.into());
        self
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &redacted_headers(&self.headers))
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_authorization_header() {
        let request = HttpRequest::new(HttpMethod::Get, "https://x.tld/1.0/services")
            .with_header("Authorization", "Bearer s3cr3t-token")
            .with_header("Accept", "application/json");

        let output = format!("{request:?}");

        assert!(!output.contains("s3cr3t-token"));
        assert!(output.contains("\"Authorization\": \"*****\""));
        assert!(output.contains("application/json"));
    }

    #[test]
    fn test_http_method_display_is_wire_verb() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_only_post_and_put_have_body() {
        assert!(!HttpMethod::Get.has_body());
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }

    #[test]
    fn test_form_body_sets_content_type() {
        let request = HttpRequest::new(HttpMethod::Put, "https://example.com/x")
            .with_form_body("a=1");

        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body.as_deref(), Some("a=1"));
    }

    #[test]
    fn test_new_request_has_no_body() {
        let request = HttpRequest::new(HttpMethod::Get, "https://example.com/x");
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }
}
