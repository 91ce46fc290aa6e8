//! # Keyyo Manager client
//!
//! A Rust client for the Keyyo Manager webservice, a HAL-style REST API
//! exposing services, profiles, CTI plugins and their settings as a tree of
//! resources.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`ManagerConfig`] and [`ManagerConfigBuilder`]
//! - A [`Client`] that authenticates with a bearer token, form-encodes request
//!   data and maps HTTP statuses to typed [`QueryError`]s
//! - A schema-less [`Resource`] that navigates by path segment, fetches itself
//!   lazily on first access and behaves either as a property bag or as an
//!   iterable, indexable collection
//!
//! ## Quick Start
//!
//! ```rust
//! use keyyo_manager::{AccessToken, ApiVersion, ManagerConfig};
//!
//! let config = ManagerConfig::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .api_version(ApiVersion::V1_0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.service_url(), "https://api.keyyo.com/manager/1.0");
//! ```
//!
//! ## Navigating Resources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use keyyo_manager::Client;
//! use serde_json::json;
//!
//! let client = Arc::new(Client::new(config)?);
//!
//! // Every service of the authenticated customer
//! let mut services = client.root().collection("services");
//! let mut members = services.members().await?;
//! while let Some(service) = members.next() {
//!     println!("{}", service?.get("csi").await?);
//! }
//!
//! // One profile of one service, navigated without any request
//! let mut profile = client.root().member("services", "33123456789").member("profiles", 4);
//!
//! // Write-through property update
//! profile.set("forward_unconditionally_number", "33198765432").await?;
//!
//! // Several properties at once
//! profile.update(&json!({"forward_delay": 10, "forward_to_voicemail": false})).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Fetch once**: a resource queries the server at most once until it is written
//! - **Typed failures**: server rejections ([`QueryError`]) are distinct from
//!   missing fields ([`ResourceError::NoSuchProperty`])

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use config::{AccessToken, ApiVersion, BaseUrl, ManagerConfig, ManagerConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    Client, HttpMethod, HttpRequest, HttpResponse, QueryError, ReqwestTransport, Transport,
    TransportError,
};

pub use rest::{Contents, Member, Members, Navigation, Resource, ResourceError, ResourceKind};
