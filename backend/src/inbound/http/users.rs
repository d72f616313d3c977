//! Users API handlers.
//!
//! ```text
//! POST   /api/users        {"name":"Ivan Sidorov","email":"ivan@example.com"}
//! GET    /api/users
//! PUT    /api/users/{id}   {"name":"Updated","email":"updated@example.com"}
//! DELETE /api/users/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::links::{RouteTemplates, UserCollection, UserLinks, UserResource};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{UserRequest, validate_user_request};

fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::invalid_request("user id must be a positive integer"))
}

/// Register user routes and their extractor error handlers under `/api`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_service::inbound::http::users::configure;
///
/// let app = App::new().service(web::scope("/api").configure(configure));
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(create_user)
        .service(list_users)
        .service(update_user)
        .service(delete_user);
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResource,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = validate_user_request(payload.into_inner()).map_err(Error::from)?;
    let view = state.users.create_user(draft).await?;
    let resource = UserLinks::resource(view, &RouteTemplates::from_request(&req));
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, resource.self_href().to_owned()))
        .json(resource))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UserCollection),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<UserCollection>> {
    let views = state.users.list_users().await?;
    Ok(web::Json(UserLinks::collection(
        views,
        &RouteTemplates::from_request(&req),
    )))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResource),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResource>> {
    let id = parse_user_id(path.into_inner())?;
    let draft = validate_user_request(payload.into_inner()).map_err(Error::from)?;
    let view = state.users.update_user(id, draft).await?;
    Ok(web::Json(UserLinks::resource(
        view,
        &RouteTemplates::from_request(&req),
    )))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    state.users.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
