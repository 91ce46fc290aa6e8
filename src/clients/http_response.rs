//! Raw HTTP responses and their decoding into JSON bodies.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::QueryError;

/// Header carrying a human-readable reason on failed responses.
pub const STATUS_REASON_HEADER: &str = "x-status-reason";

/// A raw HTTP response as returned by a [`Transport`](crate::clients::Transport).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The undecoded response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response, lowercasing header names.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_lowercase()).or_default().extend(v);
                acc
            });

        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Status-Reason` header, if present.
    #[must_use]
    pub fn status_reason(&self) -> Option<&str> {
        self.header(STATUS_REASON_HEADER)
    }

    /// Returns `true` if the status is 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code == 200
    }

    /// Decodes this response, see [`decode_response`].
    ///
    /// # Errors
    ///
    /// See [`decode_response`].
    pub fn decode(&self) -> Result<Value, QueryError> {
        decode_response(self)
    }
}

/// Maps a raw response to its decoded JSON body or a typed failure.
///
/// | Status | Outcome |
/// |---|---|
/// | 200 | body parsed as JSON, or `Value::Null` if empty |
/// | 403 | [`QueryError::Forbidden`] |
/// | 404 | [`QueryError::NotFound`] |
/// | anything else | [`QueryError::InternalServerError`] |
///
/// # Errors
///
/// Returns the status failure above, or [`QueryError::Decode`] when a
/// non-empty 200 body is not valid JSON.
pub fn decode_response(response: &HttpResponse) -> Result<Value, QueryError> {
    let reason = response.status_reason().map(String::from);

    match response.code {
        200 => {}
        403 => return Err(QueryError::Forbidden { reason }),
        404 => return Err(QueryError::NotFound { reason }),
        code => return Err(QueryError::InternalServerError { code, reason }),
    }

    if response.body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|source| QueryError::Decode { source })
}
