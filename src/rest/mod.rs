//! Navigable HAL resources.
//!
//! - **[`Resource`]**: the lazily fetched proxy for one remote entity or collection
//! - **[`Navigation`]** and [`child_url`]: URL arithmetic for navigation steps
//! - **[`representation`]**: decoding of HAL contents (properties, self links, embedded members)
//! - **[`ResourceError`]**: failures of resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! let service = client.root().member("services", "33123456789");
//!
//! let mut default_profile = service.member("profiles", "default");
//! let mut all_profiles = service.collection("profiles");
//! let mut forced_profiles = service.filtered("profiles", filters);
//!
//! println!("{} profiles", all_profiles.count().await?);
//! ```

mod errors;
mod path;
pub mod representation;
mod resource;

pub use errors::{ResourceError, ResourceKind};
pub use path::{child_url, Navigation};
pub use resource::{Contents, Member, Members, Resource};
