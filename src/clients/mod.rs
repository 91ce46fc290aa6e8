//! HTTP plumbing for the Manager webservice.
//!
//! # Overview
//!
//! - [`Client`]: holds the credential and service URL and runs one query at a time
//! - [`Transport`]: the seam that performs one HTTP call ([`ReqwestTransport`] by default)
//! - [`HttpRequest`] / [`HttpResponse`]: the raw request and response exchanged with a transport
//! - [`decode_response`]: maps a raw response to a JSON body or a [`QueryError`]
//! - [`form`]: form encoding of request data
//!
//! # Example
//!
//! ```rust,ignore
//! use keyyo_manager::{AccessToken, Client, HttpMethod, ManagerConfig};
//!
//! let config = ManagerConfig::builder()
//!     .access_token(AccessToken::new("token")?)
//!     .build()?;
//! let client = Client::new(config)?;
//!
//! let url = format!("{}/services/33123456789", client.service_url());
//! let body = client.query(HttpMethod::Get, &url, None).await?;
//! ```

mod errors;
pub mod form;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{QueryError, TransportError};
pub use http_client::{Client, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::{decode_response, HttpResponse, STATUS_REASON_HEADER};
pub use transport::{ReqwestTransport, Transport};
