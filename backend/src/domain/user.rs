//! User data model.
//!
//! Three shapes of the same entity live here:
//! - [`UserDraft`]: validated caller input with no identity.
//! - [`NewUser`] / [`User`]: the storage record before and after the store
//!   assigns an identifier.
//! - [`UserView`]: the outward projection handed to adapters.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors raised by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifiers are assigned by the store and are always positive.
    NonPositiveId {
        /// Rejected raw value.
        value: i64,
    },
    /// The name was blank.
    BlankName,
    /// The email was blank.
    BlankEmail,
    /// The email did not match the accepted address syntax.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => {
                write!(f, "user id must be a positive integer, got {value}")
            }
            Self::BlankName => write!(f, "Name is required"),
            Self::BlankEmail => write!(f, "Email is required"),
            Self::InvalidEmail => write!(f, "Invalid email format"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::UserId;
    ///
    /// assert!(UserId::new(1).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Non-blank user name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a name. Surrounding whitespace is preserved.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+",
            r"(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an email address.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{EmailAddress, UserValidationError};
    ///
    /// assert!(EmailAddress::new("ivan@example.com").is_ok());
    /// assert_eq!(
    ///     EmailAddress::new("invalid-email"),
    ///     Err(UserValidationError::InvalidEmail)
    /// );
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::BlankEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validated create/update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Requested name.
    pub name: UserName,
    /// Requested email.
    pub email: EmailAddress,
}

impl UserDraft {
    /// Build a draft from raw strings, validating both fields.
    ///
    /// Reports the first failing field only; the HTTP boundary collects every
    /// field error before reaching this point.
    pub fn try_from_strings(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
        })
    }
}

/// User record that the store has not yet assigned an identifier to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Name to persist.
    pub name: UserName,
    /// Email to persist.
    pub email: EmailAddress,
}

impl From<UserDraft> for NewUser {
    fn from(value: UserDraft) -> Self {
        let UserDraft { name, email } = value;
        Self { name, email }
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` is store-assigned and never changes.
/// - `name` is non-blank and `email` is a valid address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
}

impl User {
    /// Assemble a user from validated components.
    #[must_use]
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Attach a store-assigned identifier to a new record.
    #[must_use]
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser { name, email } = new_user;
        Self::new(id, name, email)
    }

    /// Fallible constructor from raw parts, used by adapters reading rows.
    pub fn try_from_parts(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            UserName::new(name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Current name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Current email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Replace name and email with the draft's values, keeping the id.
    pub fn apply(&mut self, draft: UserDraft) {
        let UserDraft { name, email } = draft;
        self.name = name;
        self.email = email;
    }
}

/// Outward-facing projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Current name.
    pub name: String,
    /// Current email.
    pub email: String,
}

impl From<&User> for UserView {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            name: value.name.to_string(),
            email: value.email.to_string(),
        }
    }
}

impl From<User> for UserView {
    fn from(value: User) -> Self {
        let User { id, name, email } = value;
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
