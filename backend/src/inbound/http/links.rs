//! Hypermedia decoration for user views.
//!
//! The domain hands back plain [`UserView`] values; this module wraps them in
//! `_links` / `_embedded` envelopes with absolute hrefs. Decoration is pure:
//! the base URL is resolved once from the request and passed in.

use actix_web::HttpRequest;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{UserId, UserView};

/// Route template for the user collection.
pub const USERS_PATH: &str = "/api/users";
/// Route template for a single user.
pub const USER_PATH: &str = "/api/users/{id}";

/// Absolute route templates anchored at the request's scheme and host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplates {
    base: String,
}

impl RouteTemplates {
    /// Anchor templates at an explicit base such as `http://localhost:8080`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    /// Anchor templates at the scheme and host the client used.
    #[must_use]
    pub fn from_request(req: &HttpRequest) -> Self {
        let info = req.connection_info();
        Self::new(format!("{}://{}", info.scheme(), info.host()))
    }

    /// Absolute href of the user collection.
    #[must_use]
    pub fn collection_href(&self) -> String {
        format!("{}{USERS_PATH}", self.base)
    }

    /// Absolute href of one user.
    #[must_use]
    pub fn resource_href(&self, id: UserId) -> String {
        format!("{}{}", self.base, USER_PATH.replace("{id}", &id.to_string()))
    }
}

/// A single link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    /// Absolute URL.
    #[schema(example = "http://localhost:8080/api/users/1")]
    pub href: String,
}

impl Link {
    fn to(href: String) -> Self {
        Self { href }
    }
}

/// Links attached to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    self_link: Link,
    #[serde(rename = "all-users")]
    all_users: Link,
}

/// Links attached to the user collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    self_link: Link,
}

/// User representation with hypermedia links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserResource {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    /// Display name.
    #[schema(example = "Ivan Sidorov")]
    pub name: String,
    /// Contact email address.
    #[schema(example = "ivan@example.com")]
    pub email: String,
    #[serde(rename = "_links")]
    links: ResourceLinks,
}

impl UserResource {
    /// Absolute self href, used for the `Location` header.
    #[must_use]
    pub fn self_href(&self) -> &str {
        self.links.self_link.href.as_str()
    }
}

/// Embedded users within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EmbeddedUsers {
    #[serde(rename = "userDTOList")]
    users: Vec<UserResource>,
}

/// User collection with hypermedia links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserCollection {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedUsers,
    #[serde(rename = "_links")]
    links: CollectionLinks,
}

impl UserCollection {
    /// Embedded resources in store order.
    #[must_use]
    pub fn users(&self) -> &[UserResource] {
        &self.embedded.users
    }
}

/// Link decoration entry points.
pub struct UserLinks;

impl UserLinks {
    /// Attach `self` and `all-users` links to a view.
    #[must_use]
    pub fn resource(view: UserView, templates: &RouteTemplates) -> UserResource {
        let UserView { id, name, email } = view;
        UserResource {
            id,
            name,
            email,
            links: ResourceLinks {
                self_link: Link::to(templates.resource_href(id)),
                all_users: Link::to(templates.collection_href()),
            },
        }
    }

    /// Embed decorated views and attach the collection `self` link.
    #[must_use]
    pub fn collection(views: Vec<UserView>, templates: &RouteTemplates) -> UserCollection {
        UserCollection {
            embedded: EmbeddedUsers {
                users: views
                    .into_iter()
                    .map(|view| Self::resource(view, templates))
                    .collect(),
            },
            links: CollectionLinks {
                self_link: Link::to(templates.collection_href()),
            },
        }
    }
}
