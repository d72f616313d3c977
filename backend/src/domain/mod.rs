//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed user entities and the use-cases that act
//! on them, independent of HTTP and storage. Adapters reach the domain
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier.
//! - User, UserDraft, UserView and value types: the user model.
//! - UserService: the user management use-cases.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, User, UserDraft, UserId, UserName, UserValidationError, UserView,
};
pub use self::user_service::UserService;
