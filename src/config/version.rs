//! Manager API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Version of the remote Manager webservice.
///
/// The version is the first path segment after the base URL, so a client
/// configured for `1.0` talks to `https://api.keyyo.com/manager/1.0`.
///
/// # Example
///
/// ```rust
/// use keyyo_manager::ApiVersion;
///
/// let version: ApiVersion = "1.0".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1_0);
/// assert_eq!(version.to_string(), "1.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Manager API version 1.0.
    V1_0,
    /// Any other version segment.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1_0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1_0 => f.write_str("1.0"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');

        match s {
            "1.0" => Ok(Self::V1_0),
            "" => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
            _ if s.contains(['/', '?', '#', ' ']) => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}
