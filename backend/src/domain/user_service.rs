//! User management domain service.
//!
//! Implements the [`UserManagement`] driving port over any
//! [`UserRepository`]. Inputs arrive as [`UserDraft`] values, so field
//! validation has already happened by construction.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{UserManagement, UserPersistenceError, UserRepository};
use crate::domain::{Error, NewUser, UserDraft, UserId, UserView};

/// User service implementing the driving port.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn user_not_found(id: i64) -> Error {
    Error::not_found(format!("user {id} not found")).with_details(json!({ "id": id }))
}

pub(crate) fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Missing { id } => user_not_found(id),
    }
}

#[async_trait]
impl<R> UserManagement for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<UserView, Error> {
        let user = self
            .repository
            .insert(&NewUser::from(draft))
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(UserView::from(user))
    }

    async fn list_users(&self) -> Result<Vec<UserView>, Error> {
        let users = self
            .repository
            .find_all()
            .await
            .map_err(map_persistence_error)?;
        debug!(count = users.len(), "users listed");
        Ok(users.into_iter().map(UserView::from).collect())
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<UserView, Error> {
        let Some(mut user) = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
        else {
            return Err(user_not_found(id.get()));
        };

        user.apply(draft);
        let saved = self
            .repository
            .save(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %saved.id(), "user updated");
        Ok(UserView::from(saved))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if !removed {
            return Err(user_not_found(id.get()));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
