//! Error types for resource operations.

use std::fmt;

use thiserror::Error;

use crate::clients::QueryError;

/// Whether a resource is a collection or a singular entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// An enumerable list of member resources.
    Collection,
    /// A flat property bag.
    Singular,
}

impl ResourceKind {
    /// Returns the kind matching an `is_collection` flag.
    #[must_use]
    pub const fn from_is_collection(is_collection: bool) -> Self {
        if is_collection {
            Self::Collection
        } else {
            Self::Singular
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => f.write_str("collection"),
            Self::Singular => f.write_str("singular resource"),
        }
    }
}

/// Error returned by [`Resource`](crate::rest::Resource) operations.
///
/// Failures of the underlying query are wrapped unmodified in
/// [`ResourceError::Query`], so "the server rejected the call" is always
/// distinguishable from "the server's answer lacks this field".
///
/// # Example
///
/// ```rust
/// use keyyo_manager::rest::ResourceError;
///
/// let error = ResourceError::NoSuchProperty { name: "token".to_string() };
/// assert_eq!(error.to_string(), "No such property: token");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The fetched representation has no property with this name.
    #[error("No such property: {name}")]
    NoSuchProperty {
        /// The requested property name.
        name: String,
    },

    /// The operation is not defined for this kind of resource.
    #[error("Cannot {operation} on a {kind}")]
    InvalidOperation {
        /// The attempted operation.
        operation: &'static str,
        /// The kind of the resource it was attempted on.
        kind: ResourceKind,
    },

    /// A representation that must identify itself has no `_links.self.href`.
    #[error("Response from {url} has no self link")]
    MissingSelfLink {
        /// URL of the resource whose response or member lacked the link.
        url: String,
    },

    /// No collection member exists at this index.
    #[error("No member at index {index}")]
    NoSuchMember {
        /// The requested index.
        index: usize,
    },

    /// Fields passed to a write operation do not serialize to a JSON object.
    #[error("Invalid fields: {reason}")]
    InvalidFields {
        /// Why the fields were rejected.
        reason: String,
    },

    /// The underlying webservice query failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ResourceError {
    /// Returns the underlying query error, if this failure came from the server
    /// or the transport.
    #[must_use]
    pub const fn as_query_error(&self) -> Option<&QueryError> {
        match self {
            Self::Query(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_operation_message_names_kind() {
        let error = ResourceError::InvalidOperation {
            operation: "create",
            kind: ResourceKind::Singular,
        };
        assert_eq!(error.to_string(), "Cannot create on a singular resource");
    }

    #[test]
    fn test_query_error_is_transparent() {
        let error: ResourceError = QueryError::Forbidden {
            reason: Some("protected".to_string()),
        }
        .into();

        assert_eq!(error.to_string(), "Forbidden access: protected");
        assert!(matches!(
            error.as_query_error(),
            Some(QueryError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_missing_property_is_not_a_query_error() {
        let error = ResourceError::NoSuchProperty {
            name: "csi".to_string(),
        };
        assert!(error.as_query_error().is_none());
    }

    #[test]
    fn test_resource_kind_from_flag() {
        assert_eq!(ResourceKind::from_is_collection(true), ResourceKind::Collection);
        assert_eq!(ResourceKind::from_is_collection(false), ResourceKind::Singular);
    }
}
