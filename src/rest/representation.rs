//! Decoding of HAL representations.
//!
//! A singular resource is a JSON object whose metadata keys start with `_`:
//!
//! ```json
//! {
//!     "_links": {"self": {"href": "https://api.keyyo.com/manager/1.0/services/33123456789"}},
//!     "_resource_type": "service",
//!     "csi": "33123456789"
//! }
//! ```
//!
//! A collection embeds its members under `_embedded`, grouped by relation:
//!
//! ```json
//! {"_embedded": {"profiles": [{"_links": {...}, "id": 1}, {"_links": {...}, "id": 2}]}}
//! ```

use serde_json::{Map, Value};

/// Prefix marking metadata keys.
pub const METADATA_PREFIX: char = '_';

/// Key holding the links of a representation.
pub const LINKS_KEY: &str = "_links";

/// Key holding the type tag of a representation.
pub const RESOURCE_TYPE_KEY: &str = "_resource_type";

/// Key holding the embedded members of a collection.
pub const EMBEDDED_KEY: &str = "_embedded";

/// Returns `true` if `key` names server metadata rather than a property.
#[must_use]
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

/// Returns `contents` without its metadata keys.
///
/// Anything other than a JSON object (including `null`) has no properties.
#[must_use]
pub fn filter_properties(contents: &Value) -> Map<String, Value> {
    contents.as_object().map_or_else(Map::new, |object| {
        object
            .iter()
            .filter(|(key, _)| !is_metadata_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    })
}

/// Returns the `_links.self.href` of a representation.
#[must_use]
pub fn self_href(contents: &Value) -> Option<&str> {
    contents
        .get(LINKS_KEY)?
        .get("self")?
        .get("href")?
        .as_str()
}

/// Returns the `_resource_type` tag of a representation.
#[must_use]
pub fn resource_type(contents: &Value) -> Option<&str> {
    contents.get(RESOURCE_TYPE_KEY)?.as_str()
}

/// Flattens the embedded members of a collection representation.
///
/// Members are returned relation by relation, in response order. A relation
/// holding a single object instead of an array contributes that object. The
/// relation names themselves are discarded.
#[must_use]
pub fn flatten_embedded(contents: Value) -> Vec<Value> {
    let Value::Object(mut object) = contents else {
        return Vec::new();
    };

    let Some(Value::Object(relations)) = object.remove(EMBEDDED_KEY) else {
        return Vec::new();
    };

    relations
        .into_iter()
        .flat_map(|(_, members)| match members {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_properties_removes_metadata() {
        let contents = json!({
            "_links": {"self": {"href": "https://x.tld/services/33123456789"}},
            "_resource_type": "service",
            "csi": "33123456789"
        });

        let properties = filter_properties(&contents);

        assert_eq!(Value::Object(properties), json!({"csi": "33123456789"}));
    }

    #[test]
    fn test_filter_properties_of_null_is_empty() {
        assert!(filter_properties(&Value::Null).is_empty());
    }

    #[test]
    fn test_self_href_and_resource_type() {
        let contents = json!({
            "_links": {"self": {"href": "https://x.tld/csi_token/abc"}},
            "_resource_type": "csi_token"
        });

        assert_eq!(self_href(&contents), Some("https://x.tld/csi_token/abc"));
        assert_eq!(resource_type(&contents), Some("csi_token"));
    }

    #[test]
    fn test_self_href_missing() {
        assert!(self_href(&json!({"_links": {}})).is_none());
        assert!(self_href(&Value::Null).is_none());
    }

    #[test]
    fn test_flatten_embedded_preserves_relation_then_member_order() {
        let contents = json!({
            "_links": {"self": {"href": "https://x.tld/profiles"}},
            "_embedded": {
                "profiles": [{"id": 1}, {"id": 2}],
                "default_profile": [{"id": "default"}],
                "forced": {"id": 3}
            }
        });

        let members = flatten_embedded(contents);

        assert_eq!(
            members,
            vec![
                json!({"id": 1}),
                json!({"id": 2}),
                json!({"id": "default"}),
                json!({"id": 3})
            ]
        );
    }

    #[test]
    fn test_flatten_embedded_without_embedding_is_empty() {
        assert!(flatten_embedded(json!({"_links": {}})).is_empty());
        assert!(flatten_embedded(Value::Null).is_empty());
    }
}
