//! Configuration types for the Keyyo Manager client.
//!
//! # Overview
//!
//! - [`ManagerConfig`]: the settings a [`Client`](crate::Client) is built from
//! - [`ManagerConfigBuilder`]: a builder for [`ManagerConfig`]
//! - [`AccessToken`]: a validated OAuth2 access token with masked debug output
//! - [`BaseUrl`]: a validated webservice root URL
//! - [`ApiVersion`]: the Manager API version to target
//!
//! # Example
//!
//! ```rust
//! use keyyo_manager::{AccessToken, ApiVersion, ManagerConfig};
//!
//! let config = ManagerConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .api_version(ApiVersion::V1_0)
//!     .localized_numbers(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.service_url(), "https://api.keyyo.com/manager/1.0");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, BaseUrl};
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a Manager [`Client`](crate::Client).
///
/// `ManagerConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    access_token: AccessToken,
    api_version: ApiVersion,
    base_url: BaseUrl,
    localized_numbers: bool,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ManagerConfig {
    /// Creates a new builder for constructing a `ManagerConfig`.
    #[must_use]
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the webservice root URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns whether numbers should be returned in localized format.
    #[must_use]
    pub const fn localized_numbers(&self) -> bool {
        self.localized_numbers
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout handed to the transport, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the versioned root URL of the service, e.g.
    /// `https://api.keyyo.com/manager/1.0`.
    #[must_use]
    pub fn service_url(&self) -> String {
        format!("{}/{}", self.base_url, self.api_version)
    }
}

// Verify ManagerConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ManagerConfig>();
};

/// Builder for constructing [`ManagerConfig`] instances.
///
/// `access_token` is required. Defaults:
///
/// - `api_version`: [`ApiVersion::latest()`]
/// - `base_url`: [`BaseUrl::DEFAULT`]
/// - `localized_numbers`: `false`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None`
#[derive(Debug, Default)]
pub struct ManagerConfigBuilder {
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    base_url: Option<BaseUrl>,
    localized_numbers: Option<bool>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ManagerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the webservice root URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Asks the service to format numbers in localized form on every query.
    #[must_use]
    pub const fn localized_numbers(mut self, enabled: bool) -> Self {
        self.localized_numbers = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout used by the default transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ManagerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not set.
    pub fn build(self) -> Result<ManagerConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(ManagerConfig {
            access_token,
            api_version: self.api_version.unwrap_or_default(),
            base_url: self.base_url.unwrap_or_default(),
            localized_numbers: self.localized_numbers.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
