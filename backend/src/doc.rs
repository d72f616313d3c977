//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users endpoints and the schema wrappers that keep
//! domain types free of utoipa derives. The document backs Swagger UI in
//! debug builds and is exported by the `openapi-dump` binary.

use crate::inbound::http::links::{
    CollectionLinks, EmbeddedUsers, Link, ResourceLinks, UserCollection, UserResource,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::validation::UserRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "Create, list, update and delete users with hypermedia links."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        UserRequest,
        UserResource,
        UserCollection,
        EmbeddedUsers,
        ResourceLinks,
        CollectionLinks,
        Link,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;
