//! Builders for HTTP state backed by the configured user store.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use user_service::domain::UserService;
use user_service::domain::ports::UserManagement;
use user_service::inbound::http::state::HttpState;
use user_service::outbound::memory::InMemoryUserRepository;
use user_service::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the user management port, preferring PostgreSQL when a pool is
/// configured and falling back to the in-memory store otherwise.
fn build_user_management(config: &ServerConfig) -> Arc<dyn UserManagement> {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "user store selected");
            Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
                pool.clone(),
            ))))
        }
        None => {
            info!(store = "memory", "user store selected");
            Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())))
        }
    }
}

/// Build shared HTTP state from the server configuration.
///
/// The in-memory store is created once here and shared by every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_user_management(config)))
}
