//! The transport seam between the [`Client`](crate::Client) and the network.
//!
//! A [`Transport`] performs exactly one HTTP call and reports the raw status,
//! headers and body. It does not interpret statuses; that is the job of
//! [`decode_response`](crate::clients::decode_response).
//!
//! [`ReqwestTransport`] is the default implementation. Tests and embedders can
//! supply their own implementation through
//! [`Client::with_transport`](crate::Client::with_transport).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;

/// Performs one HTTP call.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends `request` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::CallFailed`] if the request could not be sent
    /// or the response could not be read.
    async fn invoke(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client using rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unavailable`] if the HTTP client cannot be
    /// initialized (e.g., the TLS backend fails to load).
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Unavailable {
            reason: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn invoke(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
