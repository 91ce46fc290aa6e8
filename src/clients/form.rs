//! Form encoding of JSON objects.
//!
//! Produces `application/x-www-form-urlencoded` strings the way the Manager
//! webservice expects them: nested objects and arrays are flattened into
//! bracketed keys, booleans are sent as `1`/`0` and `null` values are left out.
//!
//! ```rust
//! use keyyo_manager::clients::form;
//! use serde_json::json;
//!
//! let data = json!({
//!     "forced": true,
//!     "domain_masks": ["*.domain.com", "domain2.com"],
//! });
//!
//! assert_eq!(
//!     form::encode(data.as_object().unwrap()),
//!     "forced=1&domain_masks[0]=%2A.domain.com&domain_masks[1]=domain2.com"
//! );
//! ```

use serde_json::{Map, Value};

/// Encodes every entry of `data` into a form string.
#[must_use]
pub fn encode(data: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    for (key, value) in data {
        push_pairs(&mut pairs, urlencoding::encode(key).into_owned(), value);
    }
    pairs.join("&")
}

/// Normalizes a scalar to its wire form: booleans become `1`/`0`.
///
/// Returns `None` for `null`, arrays and objects.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn push_pairs(pairs: &mut Vec<String>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(map) => {
            for (sub_key, item) in map {
                push_pairs(pairs, format!("{key}[{}]", urlencoding::encode(sub_key)), item);
            }
        }
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                pairs.push(format!("{key}={}", urlencoding::encode(&text)));
            }
        }
    }
}
