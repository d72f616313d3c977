//! User service library modules.
//!
//! Hexagonal layout: [`domain`] holds the user model, ports and service;
//! [`inbound`] adapts HTTP onto the driving port; [`outbound`] provides the
//! PostgreSQL and in-memory stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
