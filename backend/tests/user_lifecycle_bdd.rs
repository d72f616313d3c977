//! Behavioural tests for the user lifecycle through the user service.
//!
//! Steps are synchronous and drive the async service through a Tokio runtime
//! owned by the world. The store is the in-memory adapter, so every scenario
//! starts from a fresh, empty store with ids counting from 1.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;
use user_service::domain::ports::UserManagement;
use user_service::domain::{Error, ErrorCode, UserDraft, UserId, UserService, UserView};
use user_service::outbound::memory::InMemoryUserRepository;

struct LifecycleWorld {
    runtime: Runtime,
    service: RefCell<Arc<dyn UserManagement>>,
    last_user: RefCell<Option<UserView>>,
    last_error: RefCell<Option<Error>>,
}

impl LifecycleWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("create runtime"),
            service: RefCell::new(fresh_service()),
            last_user: RefCell::new(None),
            last_error: RefCell::new(None),
        }
    }

    fn service(&self) -> Arc<dyn UserManagement> {
        Arc::clone(&self.service.borrow())
    }

    fn record(&self, result: Result<Option<UserView>, Error>) {
        match result {
            Ok(user) => {
                *self.last_user.borrow_mut() = user;
                *self.last_error.borrow_mut() = None;
            }
            Err(error) => *self.last_error.borrow_mut() = Some(error),
        }
    }

    fn list(&self) -> Vec<UserView> {
        let service = self.service();
        self.runtime
            .block_on(async move { service.list_users().await })
            .expect("list users")
    }
}

fn fresh_service() -> Arc<dyn UserManagement> {
    Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())))
}

fn draft(name: &str, email: &str) -> UserDraft {
    UserDraft::try_from_strings(name, email).expect("valid draft")
}

fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("positive id")
}

#[fixture]
fn world() -> LifecycleWorld {
    LifecycleWorld::new()
}

#[given("an empty user store")]
fn an_empty_user_store(world: &LifecycleWorld) {
    *world.service.borrow_mut() = fresh_service();
    assert!(world.list().is_empty());
}

#[when("a user named \"{name}\" with email \"{email}\" is created")]
fn a_user_is_created(world: &LifecycleWorld, name: String, email: String) {
    let service = world.service();
    let draft = draft(&name, &email);
    let result = world
        .runtime
        .block_on(async move { service.create_user(draft).await });
    world.record(result.map(Some));
}

#[when("user {id} is updated to name \"{name}\" and email \"{email}\"")]
fn a_user_is_updated(world: &LifecycleWorld, id: i64, name: String, email: String) {
    let service = world.service();
    let draft = draft(&name, &email);
    let result = world
        .runtime
        .block_on(async move { service.update_user(user_id(id), draft).await });
    world.record(result.map(Some));
}

#[when("user {id} is deleted")]
fn a_user_is_deleted(world: &LifecycleWorld, id: i64) {
    let service = world.service();
    let result = world
        .runtime
        .block_on(async move { service.delete_user(user_id(id)).await });
    world.record(result.map(|()| None));
}

#[then("the last user has id {id}, name \"{name}\" and email \"{email}\"")]
fn the_last_user_matches(world: &LifecycleWorld, id: i64, name: String, email: String) {
    assert!(
        world.last_error.borrow().is_none(),
        "unexpected error: {:?}",
        world.last_error.borrow()
    );
    let last = world.last_user.borrow();
    let user = last.as_ref().expect("a user was returned");
    assert_eq!(user.id.get(), id);
    assert_eq!(user.name, name);
    assert_eq!(user.email, email);
}

#[then("the user list is empty")]
fn the_user_list_is_empty(world: &LifecycleWorld) {
    assert!(world.list().is_empty());
}

#[then("the user list contains {count} users")]
fn the_user_list_contains(world: &LifecycleWorld, count: usize) {
    assert_eq!(world.list().len(), count);
}

#[then("the listed user {id} has name \"{name}\" and email \"{email}\"")]
fn the_listed_user_matches(world: &LifecycleWorld, id: i64, name: String, email: String) {
    let users = world.list();
    let user = users
        .iter()
        .find(|user| user.id.get() == id)
        .expect("user is listed");
    assert_eq!(user.name, name);
    assert_eq!(user.email, email);
}

#[then("the operation fails with not found")]
fn the_operation_fails_with_not_found(world: &LifecycleWorld) {
    let error = world.last_error.borrow();
    let error = error.as_ref().expect("an error was recorded");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[scenario(
    path = "tests/features/user_lifecycle.feature",
    name = "A user is created, updated and deleted"
)]
fn a_user_is_created_updated_and_deleted(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_lifecycle.feature",
    name = "Listing reflects every created user"
)]
fn listing_reflects_every_created_user(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_lifecycle.feature",
    name = "Deleting an unknown user is rejected"
)]
fn deleting_an_unknown_user_is_rejected(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_lifecycle.feature",
    name = "An update round-trip leaves a single record"
)]
fn an_update_round_trip_leaves_a_single_record(world: LifecycleWorld) {
    drop(world);
}
