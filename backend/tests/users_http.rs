//! End-to-end HTTP contract tests for the users API over the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use user_service::Trace;
use user_service::domain::{TRACE_ID_HEADER, UserService};
use user_service::inbound::http::state::HttpState;
use user_service::inbound::http::users::configure;
use user_service::outbound::memory::InMemoryUserRepository;

fn app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
    App::new()
        .app_data(web::Data::new(HttpState::new(users)))
        .wrap(Trace)
        .service(web::scope("/api").configure(configure))
}

fn request(method: &str, uri: &str) -> actix_test::TestRequest {
    let builder = match method {
        "POST" => actix_test::TestRequest::post(),
        "PUT" => actix_test::TestRequest::put(),
        "DELETE" => actix_test::TestRequest::delete(),
        _ => actix_test::TestRequest::get(),
    };
    builder.uri(uri).insert_header(("host", "localhost:8080"))
}

fn listed_users(body: &Value) -> Vec<Value> {
    body["_embedded"]["userDTOList"]
        .as_array()
        .cloned()
        .expect("collection embeds a member array")
}

#[actix_web::test]
async fn full_lifecycle_for_a_single_user() {
    let app = actix_test::init_service(app()).await;

    let created = actix_test::call_service(
        &app,
        request("POST", "/api/users")
            .set_json(json!({ "name": "Ivan Sidorov", "email": "ivan@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(created).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Ivan Sidorov");
    assert_eq!(created["email"], "ivan@example.com");

    let updated = actix_test::call_service(
        &app,
        request("PUT", "/api/users/1")
            .set_json(json!({ "name": "Updated", "email": "updated@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(updated).await;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Updated");
    assert_eq!(updated["email"], "updated@example.com");

    let deleted =
        actix_test::call_service(&app, request("DELETE", "/api/users/1").to_request()).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed = actix_test::call_service(&app, request("GET", "/api/users").to_request()).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Value = actix_test::read_body_json(listed).await;
    assert!(listed_users(&listed).is_empty());

    let missing = actix_test::call_service(
        &app,
        request("PUT", "/api/users/1")
            .set_json(json!({ "name": "Again", "email": "again@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let missing: Value = actix_test::read_body_json(missing).await;
    assert_eq!(missing["code"], "not_found");
    assert_eq!(missing["details"]["id"], 1);
}

#[actix_web::test]
async fn update_round_trip_keeps_a_single_record() {
    let app = actix_test::init_service(app()).await;

    let created = actix_test::call_service(
        &app,
        request("POST", "/api/users")
            .set_json(json!({ "name": "First", "email": "first@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let updated = actix_test::call_service(
        &app,
        request("PUT", "/api/users/1")
            .set_json(json!({ "name": "Second", "email": "second@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let listed = actix_test::call_service(&app, request("GET", "/api/users").to_request()).await;
    let listed: Value = actix_test::read_body_json(listed).await;
    let users = listed_users(&listed);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[0]["name"], "Second");
    assert_eq!(users[0]["email"], "second@example.com");
    assert_eq!(
        listed["_links"]["self"]["href"],
        "http://localhost:8080/api/users"
    );
}

#[actix_web::test]
async fn listing_preserves_creation_order() {
    let app = actix_test::init_service(app()).await;

    for (name, email) in [
        ("Ivan", "ivan@example.com"),
        ("Olga", "olga@example.com"),
        ("Petr", "petr@example.com"),
    ] {
        let response = actix_test::call_service(
            &app,
            request("POST", "/api/users")
                .set_json(json!({ "name": name, "email": email }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = actix_test::call_service(&app, request("GET", "/api/users").to_request()).await;
    let listed: Value = actix_test::read_body_json(listed).await;
    let names: Vec<&str> = listed["_embedded"]["userDTOList"]
        .as_array()
        .expect("member array")
        .iter()
        .filter_map(|user| user["name"].as_str())
        .collect();
    assert_eq!(names, ["Ivan", "Olga", "Petr"]);
}

#[actix_web::test]
async fn collection_members_carry_their_own_links() {
    let app = actix_test::init_service(app()).await;

    let created = actix_test::call_service(
        &app,
        request("POST", "/api/users")
            .set_json(json!({ "name": "Ivan Sidorov", "email": "ivan@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = actix_test::call_service(&app, request("GET", "/api/users").to_request()).await;
    let listed: Value = actix_test::read_body_json(listed).await;
    let member = &listed["_embedded"]["userDTOList"][0];
    assert_eq!(member["id"], 1);
    assert_eq!(
        member["_links"]["self"]["href"],
        "http://localhost:8080/api/users/1"
    );
    assert_eq!(
        member["_links"]["all-users"]["href"],
        "http://localhost:8080/api/users"
    );
}

#[actix_web::test]
async fn validation_failure_carries_trace_id_matching_header() {
    let app = actix_test::init_service(app()).await;

    let response = actix_test::call_service(
        &app,
        request("POST", "/api/users")
            .set_json(json!({ "name": "  ", "email": "not-an-email" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"], header.as_str());
    assert_eq!(body["details"]["name"], "Name is required");
    assert_eq!(body["details"]["email"], "Invalid email format");
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = actix_test::init_service(app()).await;

    let listed = actix_test::call_service(&app, request("GET", "/api/users").to_request()).await;
    assert!(listed.headers().contains_key(TRACE_ID_HEADER));

    let deleted =
        actix_test::call_service(&app, request("DELETE", "/api/users/42").to_request()).await;
    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
    assert!(deleted.headers().contains_key(TRACE_ID_HEADER));
}
