//! Integration tests for the Diesel-backed user repository.
//!
//! These run against a real PostgreSQL instance named by
//! `USER_SERVICE_TEST_DATABASE_URL`. When the variable is unset the tests
//! print a skip marker and return. Tests share one database, so they are
//! serialised and each starts from an empty `users` table.

use std::sync::{Mutex, MutexGuard, PoisonError};

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use rstest::rstest;
use tokio::runtime::Runtime;
use user_service::domain::ports::{UserPersistenceError, UserRepository};
use user_service::domain::{EmailAddress, NewUser, User, UserId, UserName};
use user_service::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

const DATABASE_URL_ENV: &str = "USER_SERVICE_TEST_DATABASE_URL";

static DATABASE_LOCK: Mutex<()> = Mutex::new(());

struct Harness {
    runtime: Runtime,
    repository: DieselUserRepository,
    _guard: MutexGuard<'static, ()>,
}

fn harness() -> Option<Harness> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-DATABASE: {DATABASE_URL_ENV} is not set");
        return None;
    };
    let guard = DATABASE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    run_pending_migrations(&url).expect("apply migrations");
    let mut conn = PgConnection::establish(&url).expect("connect for reset");
    diesel::sql_query("TRUNCATE users RESTART IDENTITY")
        .execute(&mut conn)
        .expect("truncate users");

    let runtime = Runtime::new().expect("create runtime");
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(2)))
        .expect("build pool");
    Some(Harness {
        runtime,
        repository: DieselUserRepository::new(pool),
        _guard: guard,
    })
}

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: UserName::new(name).expect("valid name"),
        email: EmailAddress::new(email).expect("valid email"),
    }
}

fn id(raw: i64) -> UserId {
    UserId::new(raw).expect("positive id")
}

#[rstest]
fn insert_assigns_sequential_ids_and_round_trips() {
    let Some(h) = harness() else { return };

    let first = h
        .runtime
        .block_on(h.repository.insert(&new_user("Ivan Sidorov", "ivan@example.com")))
        .expect("insert first");
    let second = h
        .runtime
        .block_on(h.repository.insert(&new_user("Olga", "olga@example.com")))
        .expect("insert second");

    assert_eq!(first.id(), id(1));
    assert_eq!(second.id(), id(2));

    let found = h
        .runtime
        .block_on(h.repository.find_by_id(id(1)))
        .expect("find");
    assert_eq!(found, Some(first));
}

#[rstest]
fn find_all_returns_users_in_id_order() {
    let Some(h) = harness() else { return };

    for (name, email) in [("C", "c@example.com"), ("A", "a@example.com")] {
        h.runtime
            .block_on(h.repository.insert(&new_user(name, email)))
            .expect("insert");
    }

    let users = h
        .runtime
        .block_on(h.repository.find_all())
        .expect("find all");
    let ids: Vec<i64> = users.iter().map(|user| user.id().get()).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(users[0].name().as_ref(), "C");
}

#[rstest]
fn save_overwrites_existing_row_and_reports_missing_rows() {
    let Some(h) = harness() else { return };

    let created = h
        .runtime
        .block_on(h.repository.insert(&new_user("First", "first@example.com")))
        .expect("insert");
    let changed = User::try_from_parts(created.id().get(), "Second", "second@example.com")
        .expect("valid user");

    let saved = h
        .runtime
        .block_on(h.repository.save(&changed))
        .expect("save");
    assert_eq!(saved, changed);
    assert_eq!(
        h.runtime
            .block_on(h.repository.find_all())
            .expect("find all")
            .len(),
        1
    );

    let ghost = User::try_from_parts(99, "Ghost", "ghost@example.com").expect("valid user");
    let error = h
        .runtime
        .block_on(h.repository.save(&ghost))
        .expect_err("missing row");
    assert_eq!(error, UserPersistenceError::missing(id(99)));
}

#[rstest]
fn delete_reports_whether_a_row_was_removed() {
    let Some(h) = harness() else { return };

    let created = h
        .runtime
        .block_on(h.repository.insert(&new_user("Ivan", "ivan@example.com")))
        .expect("insert");

    assert!(
        h.runtime
            .block_on(h.repository.delete_by_id(created.id()))
            .expect("delete existing")
    );
    assert!(
        !h.runtime
            .block_on(h.repository.delete_by_id(created.id()))
            .expect("delete again")
    );
    assert_eq!(
        h.runtime
            .block_on(h.repository.find_by_id(created.id()))
            .expect("find"),
        None
    );
}
