//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When the
//! migrations change, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// User records.
    ///
    /// `id` is a `BIGSERIAL`, so the database assigns identifiers on insert.
    users (id) {
        /// Primary key, assigned sequentially.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}
