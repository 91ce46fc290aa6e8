//! The Manager webservice client.
//!
//! [`Client`] owns the credential and the service URL, and turns one
//! `(verb, url, data)` triple into a decoded JSON body or a typed
//! [`QueryError`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::errors::QueryError;
use crate::clients::form;
use crate::clients::http_request::{redacted_headers, HttpMethod, HttpRequest};
use crate::clients::http_response::decode_response;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::ManagerConfig;
use crate::rest::Resource;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client of the Manager webservice.
///
/// The client handles:
/// - The `Authorization: Bearer` header built from the access token
/// - Per-request options such as `localized_numbers=1`
/// - Form encoding of request data
/// - Mapping HTTP statuses to [`QueryError`] and decoding JSON bodies
///
/// Resources hold the client through an [`Arc`]; use [`Client::root`] to
/// start navigating.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use keyyo_manager::{AccessToken, Client, ManagerConfig};
///
/// let config = ManagerConfig::builder()
///     .access_token(AccessToken::new("token")?)
///     .build()?;
/// let client = Arc::new(Client::new(config)?);
///
/// let mut service = client.root().member("services", "33123456789");
/// println!("{}", service.get("csi").await?);
/// ```
pub struct Client {
    config: ManagerConfig,
    transport: Arc<dyn Transport>,
    default_headers: HashMap<String, String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("default_headers", &redacted_headers(&self.default_headers))
            .finish()
    }
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client using the default [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] if the HTTP client cannot be initialized.
    pub fn new(config: ManagerConfig) -> Result<Self, QueryError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client that sends its requests through `transport`.
    #[must_use]
    pub fn with_transport(config: ManagerConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Keyyo Manager Rust Client v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );

        Self {
            config,
            transport,
            default_headers,
        }
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub const fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Returns the default headers sent with every query.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the versioned root URL of the service.
    #[must_use]
    pub fn service_url(&self) -> String {
        self.config.service_url()
    }

    /// Returns the singular resource at the service root, from which every
    /// other resource is reached by navigation.
    #[must_use]
    pub fn root(self: &Arc<Self>) -> Resource {
        Resource::new(Arc::clone(self), self.service_url(), false)
    }

    /// Calls the webservice and returns its decoded body.
    ///
    /// `data` is form-encoded as the body of POST and PUT queries and ignored
    /// otherwise. An empty 200 body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] if the call cannot complete,
    /// [`QueryError::Forbidden`], [`QueryError::NotFound`] or
    /// [`QueryError::InternalServerError`] for a non-200 status, and
    /// [`QueryError::Decode`] if the body is not valid JSON.
    pub async fn query(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&Map<String, Value>>,
    ) -> Result<Value, QueryError> {
        let url = self.apply_query_options(url);

        let mut request = HttpRequest::new(method, url.as_str());
        request.headers.clone_from(&self.default_headers);
        if method.has_body() {
            request = request.with_form_body(data.map(form::encode).unwrap_or_default());
        }

        tracing::debug!("Sending {} request to {}", method, url);

        let response = self.transport.invoke(request).await?;

        if !response.is_ok() {
            tracing::warn!(
                "Manager query {} {} failed with status {}, reason: {}",
                method,
                url,
                response.code,
                response.status_reason().unwrap_or("none")
            );
        }

        decode_response(&response)
    }

    /// Appends the configured per-request options as GET parameters.
    fn apply_query_options(&self, url: &str) -> String {
        let mut options = Vec::new();
        if self.config.localized_numbers() {
            options.push("localized_numbers=1");
        }

        if options.is_empty() {
            return url.to_string();
        }

        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}{}", options.join("&"))
    }
}
