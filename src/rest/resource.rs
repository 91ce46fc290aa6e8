//! The navigable, lazily fetched [`Resource`].
//!
//! A `Resource` is a proxy for one remote entity or collection. It is created
//! without any I/O, fetches its representation with a single GET the first
//! time data is needed, and keeps that representation for the rest of its
//! life. Writes (`set`, `update`, `delete`) replace the cached representation
//! with the server's answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use keyyo_manager::{AccessToken, Client, ManagerConfig};
//! use serde_json::json;
//!
//! let client = Arc::new(Client::new(
//!     ManagerConfig::builder().access_token(AccessToken::new("token")?).build()?,
//! )?);
//!
//! // Navigation is pure URL arithmetic
//! let service = client.root().member("services", "33123456789");
//! let mut profile = service.member("profiles", 4);
//!
//! // First read fetches, later reads hit the cache
//! println!("{}", profile.get("forward_delay").await?);
//!
//! // Write-through update
//! profile.set("forced", true).await?;
//!
//! // Iterate a collection
//! let mut plugins = service.collection("cti_plugins");
//! let mut members = plugins.members().await?;
//! while let Some(plugin) = members.next() {
//!     let plugin = plugin?;
//!     println!("{} enabled: {}", plugin.get("name").await?, plugin.get("enabled").await?);
//! }
//!
//! // Create a member of a collection
//! let token = service
//!     .collection("csi_token")
//!     .create(&json!({"domain_masks": ["*.domain.com", "domain2.com"]}))
//!     .await?;
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::{Client, HttpMethod};
use crate::rest::errors::{ResourceError, ResourceKind};
use crate::rest::path::{child_url, Navigation};
use crate::rest::representation::{filter_properties, flatten_embedded, resource_type, self_href};

/// Cached representation of a fetched resource.
#[derive(Debug)]
enum Representation {
    Singular {
        contents: Value,
        properties: Map<String, Value>,
    },
    Collection {
        members: Vec<Member>,
    },
}

impl Representation {
    fn from_contents(is_collection: bool, contents: Value) -> Self {
        if is_collection {
            Self::Collection {
                members: flatten_embedded(contents)
                    .into_iter()
                    .map(Member::Raw)
                    .collect(),
            }
        } else {
            let properties = filter_properties(&contents);
            Self::Singular {
                contents,
                properties,
            }
        }
    }
}

/// One slot of a collection.
///
/// Slots start as the raw embedded representation and are promoted in place
/// to a [`Resource`] the first time they are read through
/// [`Resource::at`], [`Resource::next_member`] or [`Resource::members`].
#[derive(Debug)]
pub enum Member {
    /// The embedded representation as decoded from the collection response.
    Raw(Value),
    /// The promoted resource.
    Resource(Resource),
}

impl Member {
    /// Returns the representation of this slot: the embedded JSON for a raw
    /// slot, the cached contents for a promoted one.
    #[must_use]
    pub fn contents(&self) -> Option<&Value> {
        match self {
            Self::Raw(contents) => Some(contents),
            Self::Resource(resource) => match &resource.representation {
                Some(Representation::Singular { contents, .. }) => Some(contents),
                _ => None,
            },
        }
    }

    /// Returns the promoted resource, if this slot has been read already.
    #[must_use]
    pub const fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Raw(_) => None,
        }
    }

    /// Promotes a raw slot to a singular resource built from its self link.
    fn promote(
        &mut self,
        client: &Arc<Client>,
        parent_url: &str,
    ) -> Result<&mut Resource, ResourceError> {
        if let Self::Raw(contents) = self {
            let url = self_href(contents)
                .ok_or_else(|| ResourceError::MissingSelfLink {
                    url: parent_url.to_string(),
                })?
                .to_string();
            tracing::debug!("Promoting member of {} to resource {}", parent_url, url);

            let resource = Resource::from_contents(
                Arc::clone(client),
                url,
                false,
                std::mem::take(contents),
            );
            *self = Self::Resource(resource);
        }

        match self {
            Self::Resource(resource) => Ok(resource),
            Self::Raw(_) => Err(ResourceError::MissingSelfLink {
                url: parent_url.to_string(),
            }),
        }
    }
}

/// The contents of a fetched resource, see [`Resource::contents`].
#[derive(Debug, Clone, Copy)]
pub enum Contents<'a> {
    /// The JSON representation of a singular resource.
    Singular(&'a Value),
    /// The member slots of a collection, in response order.
    Collection(&'a [Member]),
}

impl<'a> Contents<'a> {
    /// Returns the representation of a singular resource.
    #[must_use]
    pub const fn as_value(&self) -> Option<&'a Value> {
        match self {
            Self::Singular(contents) => Some(contents),
            Self::Collection(_) => None,
        }
    }

    /// Returns the member slots of a collection.
    #[must_use]
    pub const fn as_members(&self) -> Option<&'a [Member]> {
        match self {
            Self::Collection(members) => Some(members),
            Self::Singular(_) => None,
        }
    }
}

/// A remote resource or collection of the Manager webservice.
///
/// The kind (collection or singular) is fixed at construction. All accessors
/// go through one lazy-fetch step, so only the first of them pays for the
/// network round trip.
#[derive(Debug)]
pub struct Resource {
    client: Arc<Client>,
    url: String,
    is_collection: bool,
    representation: Option<Representation>,
    cursor: usize,
}

impl Resource {
    /// Creates an unfetched resource.
    #[must_use]
    pub fn new(client: Arc<Client>, url: impl Into<String>, is_collection: bool) -> Self {
        Self {
            client,
            url: url.into(),
            is_collection,
            representation: None,
            cursor: 0,
        }
    }

    /// Creates a resource that is already fetched from `contents`.
    #[must_use]
    pub fn from_contents(
        client: Arc<Client>,
        url: impl Into<String>,
        is_collection: bool,
        contents: Value,
    ) -> Self {
        let mut resource = Self::new(client, url, is_collection);
        resource.load(contents);
        resource
    }

    /// Returns the absolute URL of this resource.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns `true` if this resource is a collection.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.is_collection
    }

    /// Returns the kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        ResourceKind::from_is_collection(self.is_collection)
    }

    /// Returns `true` once the representation has been fetched or supplied.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        self.representation.is_some()
    }

    /// Returns the client this resource queries through.
    #[must_use]
    pub const fn client(&self) -> &Arc<Client> {
        &self.client
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Returns the child reached through `segment`, without any I/O.
    ///
    /// See [`Navigation`] for how the argument selects the child's URL and kind.
    /// A member id is percent-encoded as one path segment, so `"a/b"` becomes
    /// `a%2Fb`; chain navigation steps to reach deeper paths.
    #[must_use]
    pub fn navigate(&self, segment: &str, navigation: impl Into<Navigation>) -> Self {
        let (url, is_collection) = child_url(&self.url, segment, &navigation.into());
        Self::new(Arc::clone(&self.client), url, is_collection)
    }

    /// Returns the collection at `{url}/{segment}`.
    #[must_use]
    pub fn collection(&self, segment: &str) -> Self {
        self.navigate(segment, Navigation::Collection)
    }

    /// Returns the singular resource at `{url}/{segment}/{id}`.
    ///
    /// `id` is percent-encoded: `member("parameters", "a/b")` targets
    /// `{url}/parameters/a%2Fb`, not a nested path.
    #[must_use]
    pub fn member(&self, segment: &str, id: impl fmt::Display) -> Self {
        self.navigate(segment, Navigation::Member(id.to_string()))
    }

    /// Returns the collection at `{url}/{segment}` restricted by `filters`.
    #[must_use]
    pub fn filtered(&self, segment: &str, filters: Map<String, Value>) -> Self {
        self.navigate(segment, Navigation::Filtered(filters))
    }

    // ------------------------------------------------------------------
    // Lazy fetch
    // ------------------------------------------------------------------

    /// Fetches the representation if it is not cached yet.
    async fn ensure_fetched(&mut self) -> Result<&mut Representation, ResourceError> {
        let representation = match self.representation.take() {
            Some(representation) => representation,
            None => {
                tracing::debug!("Fetching resource {}", self.url);
                let contents = self.client.query(HttpMethod::Get, &self.url, None).await?;
                Representation::from_contents(self.is_collection, contents)
            }
        };
        Ok(self.representation.insert(representation))
    }

    /// Replaces the cached representation with `contents`.
    fn load(&mut self, contents: Value) {
        self.representation = Some(Representation::from_contents(self.is_collection, contents));
        self.cursor = 0;
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Returns the property `name` of a singular resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoSuchProperty`] if the representation has no
    /// such property, [`ResourceError::InvalidOperation`] on a collection, or
    /// [`ResourceError::Query`] if the fetch fails.
    pub async fn get(&mut self, name: &str) -> Result<&Value, ResourceError> {
        match self.ensure_fetched().await? {
            Representation::Singular { properties, .. } => {
                properties
                    .get(name)
                    .ok_or_else(|| ResourceError::NoSuchProperty {
                        name: name.to_string(),
                    })
            }
            Representation::Collection { .. } => Err(ResourceError::InvalidOperation {
                operation: "read a property",
                kind: ResourceKind::Collection,
            }),
        }
    }

    /// Sets one property by issuing an immediate partial [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ResourceError> {
        let mut fields = Map::new();
        fields.insert(name.to_string(), value.into());
        self.update(&fields).await
    }

    /// Returns the properties of a singular resource (its contents without
    /// metadata keys), or `None` for a collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Query`] if the fetch fails.
    pub async fn properties(&mut self) -> Result<Option<&Map<String, Value>>, ResourceError> {
        Ok(match self.ensure_fetched().await? {
            Representation::Singular { properties, .. } => Some(properties),
            Representation::Collection { .. } => None,
        })
    }

    /// Returns the fetched contents.
    ///
    /// A singular resource yields its full representation, metadata included.
    /// A collection yields its ordered member slots, flattened from
    /// `_embedded`; reading them does not promote anything.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Query`] if the fetch fails.
    pub async fn contents(&mut self) -> Result<Contents<'_>, ResourceError> {
        Ok(match self.ensure_fetched().await? {
            Representation::Singular { contents, .. } => Contents::Singular(contents),
            Representation::Collection { members } => Contents::Collection(members),
        })
    }

    /// Returns the `_resource_type` tag of the cached representation.
    ///
    /// This never fetches: it returns `None` until the resource is fetched.
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        match &self.representation {
            Some(Representation::Singular { contents, .. }) => resource_type(contents),
            _ => None,
        }
    }

    /// Returns the `_links.self.href` of the cached representation.
    ///
    /// This never fetches: it returns `None` until the resource is fetched.
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        match &self.representation {
            Some(Representation::Singular { contents, .. }) => self_href(contents),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Creates a member of this collection and returns it, already fetched
    /// from the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidOperation`] on a singular resource,
    /// [`ResourceError::InvalidFields`] if `fields` is not an object,
    /// [`ResourceError::MissingSelfLink`] if the response does not identify the
    /// new member, or [`ResourceError::Query`] if the query fails.
    pub async fn create<T: Serialize + ?Sized>(&self, fields: &T) -> Result<Self, ResourceError> {
        if !self.is_collection {
            return Err(ResourceError::InvalidOperation {
                operation: "create",
                kind: ResourceKind::Singular,
            });
        }

        let fields = to_fields(fields)?;
        let contents = self
            .client
            .query(HttpMethod::Post, &self.url, Some(&fields))
            .await?;

        let url = self_href(&contents)
            .ok_or_else(|| ResourceError::MissingSelfLink {
                url: self.url.clone(),
            })?
            .to_string();

        Ok(Self::from_contents(Arc::clone(&self.client), url, false, contents))
    }

    /// Updates this resource with `fields` and replaces the cached
    /// representation with the response.
    ///
    /// Collections are updated with PUT, singular resources with POST.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidFields`] if `fields` is not an object or
    /// [`ResourceError::Query`] if the query fails.
    pub async fn update<T: Serialize + ?Sized>(&mut self, fields: &T) -> Result<(), ResourceError> {
        let fields = to_fields(fields)?;
        let method = if self.is_collection {
            HttpMethod::Put
        } else {
            HttpMethod::Post
        };

        let contents = self.client.query(method, &self.url, Some(&fields)).await?;
        self.load(contents);
        Ok(())
    }

    /// Deletes this resource (every member, for a collection) and replaces the
    /// cached representation with the possibly empty response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Query`] with the server's failure, e.g. when the
    /// resource is protected or already deleted.
    pub async fn delete(&mut self) -> Result<(), ResourceError> {
        let contents = self.client.query(HttpMethod::Delete, &self.url, None).await?;
        self.load(contents);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Collection members
    // ------------------------------------------------------------------

    /// Returns the number of members.
    ///
    /// A singular resource has no members.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Query`] if the fetch fails.
    pub async fn count(&mut self) -> Result<usize, ResourceError> {
        Ok(match self.ensure_fetched().await? {
            Representation::Collection { members } => members.len(),
            Representation::Singular { .. } => 0,
        })
    }

    /// Returns `true` if a member exists at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Query`] if the fetch fails.
    pub async fn contains(&mut self, index: usize) -> Result<bool, ResourceError> {
        Ok(index < self.count().await?)
    }

    /// Returns the member at `index`, promoting it to a resource on first read.
    ///
    /// Reading the same index again returns the same resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoSuchMember`] if there is no member at
    /// `index`, [`ResourceError::MissingSelfLink`] if the member cannot be
    /// promoted, or [`ResourceError::Query`] if the fetch fails.
    pub async fn at(&mut self, index: usize) -> Result<&mut Self, ResourceError> {
        let client = Arc::clone(&self.client);
        let url = self.url.clone();
        match self.ensure_fetched().await? {
            Representation::Collection { members } => members
                .get_mut(index)
                .ok_or(ResourceError::NoSuchMember { index })?
                .promote(&client, &url),
            Representation::Singular { .. } => Err(ResourceError::NoSuchMember { index }),
        }
    }

    /// Replaces the member at `index`, or appends when `index` equals the
    /// current count.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidOperation`] on a singular resource,
    /// [`ResourceError::NoSuchMember`] if `index` is past the end, or
    /// [`ResourceError::Query`] if the fetch fails.
    pub async fn set_member(&mut self, index: usize, contents: Value) -> Result<(), ResourceError> {
        let members = self.collection_slots("set a member").await?;
        match index.cmp(&members.len()) {
            std::cmp::Ordering::Less => members[index] = Member::Raw(contents),
            std::cmp::Ordering::Equal => members.push(Member::Raw(contents)),
            std::cmp::Ordering::Greater => return Err(ResourceError::NoSuchMember { index }),
        }
        Ok(())
    }

    /// Removes and returns the member at `index`; later members shift down.
    ///
    /// This only changes the local cache, nothing is sent to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidOperation`] on a singular resource,
    /// [`ResourceError::NoSuchMember`] if there is no member at `index`, or
    /// [`ResourceError::Query`] if the fetch fails.
    pub async fn remove_member(&mut self, index: usize) -> Result<Member, ResourceError> {
        let members = self.collection_slots("remove a member").await?;
        if index >= members.len() {
            return Err(ResourceError::NoSuchMember { index });
        }
        let removed = members.remove(index);
        if self.cursor > index {
            self.cursor -= 1;
        }
        Ok(removed)
    }

    async fn collection_slots(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut Vec<Member>, ResourceError> {
        match self.ensure_fetched().await? {
            Representation::Collection { members } => Ok(members),
            Representation::Singular { .. } => Err(ResourceError::InvalidOperation {
                operation,
                kind: ResourceKind::Singular,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Moves the iteration cursor back to the first member.
    ///
    /// The cached representation is kept; nothing is refetched.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Returns the index the next call to [`next_member`](Self::next_member)
    /// will read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the member under the cursor and advances it, or `None` once
    /// every member has been visited.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if the member cannot be
    /// promoted, or [`ResourceError::Query`] if the fetch fails.
    pub async fn next_member(&mut self) -> Result<Option<&mut Self>, ResourceError> {
        let index = self.cursor;
        if !self.contains(index).await? {
            return Ok(None);
        }
        self.cursor += 1;
        self.at(index).await.map(Some)
    }

    /// Returns an iterator over the members, promoting each slot as it is
    /// visited.
    ///
    /// The iterator borrows the resource; it does not move the
    /// [`next_member`](Self::next_member) cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Query`] if the fetch fails.
    pub async fn members(&mut self) -> Result<Members<'_>, ResourceError> {
        self.ensure_fetched().await?;

        let slots = match &mut self.representation {
            Some(Representation::Collection { members }) => members.iter_mut(),
            _ => <&mut [Member]>::default().iter_mut(),
        };

        Ok(Members {
            client: &self.client,
            parent_url: &self.url,
            slots,
        })
    }
}

/// Iterator over the members of a collection, see [`Resource::members`].
#[derive(Debug)]
pub struct Members<'a> {
    client: &'a Arc<Client>,
    parent_url: &'a str,
    slots: std::slice::IterMut<'a, Member>,
}

impl<'a> Iterator for Members<'a> {
    type Item = Result<&'a mut Resource, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .next()
            .map(|slot| slot.promote(self.client, self.parent_url))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl ExactSizeIterator for Members<'_> {}

fn to_fields<T: Serialize + ?Sized>(fields: &T) -> Result<Map<String, Value>, ResourceError> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(ResourceError::InvalidFields {
            reason: format!("expected a JSON object, got {other}"),
        }),
        Err(e) => Err(ResourceError::InvalidFields {
            reason: e.to_string(),
        }),
    }
}
