//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A save targeted a record that no longer exists.
        Missing { id: i64 } => "user {id} does not exist",
    }
}

/// Keyed storage for user records.
///
/// The store owns persisted records and assigns identifiers. Callers get
/// fresh copies from every read; no handle outlives a call.
///
/// Concurrent writes to the same id are not coordinated here. Whatever
/// isolation the backing store provides is the only protection against lost
/// updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new record and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite an existing record.
    ///
    /// Returns [`UserPersistenceError::Missing`] when no record carries the
    /// user's identifier; saves never create records.
    async fn save(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every record in ascending identifier order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Remove a record, reporting whether one existed.
    async fn delete_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
