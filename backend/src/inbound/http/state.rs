//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving port, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::UserManagement;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User management use-cases.
    pub users: Arc<dyn UserManagement>,
}

impl HttpState {
    /// Bundle the user management port.
    pub fn new(users: Arc<dyn UserManagement>) -> Self {
        Self { users }
    }
}
