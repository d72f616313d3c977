//! HTTP inbound adapter exposing the users REST endpoints.

pub mod error;
pub mod links;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
