//! Process-local user store.
//!
//! Backs the service when no database URL is configured and serves as the
//! store for HTTP and behaviour tests. Identifiers are assigned sequentially
//! from 1 and never reused within a process.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[derive(Debug)]
struct Records {
    next_id: i64,
    users: BTreeMap<UserId, User>,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            next_id: 1,
            users: BTreeMap::new(),
        }
    }
}

/// In-memory implementation of the [`UserRepository`] port.
///
/// # Examples
/// ```
/// use user_service::outbound::memory::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::new();
/// # let _ = repo;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Records>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, UserPersistenceError> {
        self.records
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        let id = UserId::new(records.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        records.next_id = records
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let created = User::from_new(id, user.clone());
        records.users.insert(id, created.clone());
        Ok(created)
    }

    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        match records.users.get_mut(&user.id()) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user.clone())
            }
            None => Err(UserPersistenceError::missing(user.id().get())),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }
}
