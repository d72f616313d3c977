//! Driving port for user management use-cases.
//!
//! Inbound adapters depend on this trait rather than on the service type so
//! handlers can be exercised with doubles and the persistence choice stays in
//! server wiring.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId, UserView};

/// Create, list, update and delete users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Persist a new user and return its view.
    async fn create_user(&self, draft: UserDraft) -> Result<UserView, Error>;

    /// Return every user in store order; empty when none exist.
    async fn list_users(&self) -> Result<Vec<UserView>, Error>;

    /// Replace name and email of an existing user.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when `id` is unknown.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<UserView, Error>;

    /// Remove a user.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when `id` is unknown.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
