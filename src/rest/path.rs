//! URL arithmetic for resource navigation.
//!
//! Navigating from a resource never performs I/O: it only derives the child's
//! URL and whether the child is a collection.
//!
//! | Navigation | Child URL | Collection |
//! |---|---|---|
//! | [`Navigation::Collection`] | `{url}/{segment}` | yes |
//! | [`Navigation::Filtered`] | `{url}/{segment}/?filters[k]=v` | yes |
//! | [`Navigation::Member`] | `{url}/{segment}/{id}` | no |
//!
//! # Example
//!
//! ```rust
//! use keyyo_manager::rest::{child_url, Navigation};
//!
//! let (url, is_collection) = child_url("https://x.tld/1.0", "services", &Navigation::from("33123456789"));
//! assert_eq!(url, "https://x.tld/1.0/services/33123456789");
//! assert!(!is_collection);
//! ```

use serde_json::{Map, Value};

use crate::clients::form;

/// The optional argument of a navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Navigation {
    /// No argument: the child is the whole collection.
    #[default]
    Collection,
    /// Filter pairs: the child is the collection restricted by `filters`.
    Filtered(Map<String, Value>),
    /// A scalar identifier: the child is one member of the collection.
    Member(String),
}

impl From<&str> for Navigation {
    fn from(id: &str) -> Self {
        Self::Member(id.to_string())
    }
}

impl From<String> for Navigation {
    fn from(id: String) -> Self {
        Self::Member(id)
    }
}

impl From<Map<String, Value>> for Navigation {
    fn from(filters: Map<String, Value>) -> Self {
        Self::Filtered(filters)
    }
}

impl<T: Into<Self>> From<Option<T>> for Navigation {
    fn from(arg: Option<T>) -> Self {
        arg.map_or(Self::Collection, Into::into)
    }
}

macro_rules! navigation_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Navigation {
                fn from(id: $t) -> Self {
                    Self::Member(id.to_string())
                }
            }
        )*
    };
}

navigation_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Derives the URL of the child reached from `parent` through `segment`.
///
/// Returns the child URL and whether the child is a collection. An empty
/// filter map navigates to the plain collection.
#[must_use]
pub fn child_url(parent: &str, segment: &str, navigation: &Navigation) -> (String, bool) {
    let url = format!("{parent}/{segment}");

    match navigation {
        Navigation::Collection => (url, true),
        Navigation::Filtered(filters) if filters.is_empty() => (url, true),
        Navigation::Filtered(filters) => {
            let mut wrapped = Map::new();
            wrapped.insert("filters".to_string(), Value::Object(filters.clone()));
            (format!("{url}/?{}", form::encode(&wrapped)), true)
        }
        Navigation::Member(id) => (format!("{url}/{}", urlencoding::encode(id)), false),
    }
}
