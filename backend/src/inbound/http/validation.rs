//! Boundary validation for user create/update payloads.
//!
//! Every failing field is reported at once; the domain constructors only
//! ever see values that passed here.

use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{EmailAddress, Error, UserDraft, UserName, UserValidationError};

/// Message used for the envelope when field validation fails.
pub const VALIDATION_FAILED_MESSAGE: &str = "request validation failed";

/// Create/update request body.
///
/// Both fields are optional at the decoding stage so that a missing field is
/// reported alongside the other field errors instead of as a decode failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserRequest {
    /// Display name; must not be blank.
    #[schema(example = "Ivan Sidorov")]
    pub name: Option<String>,
    /// Contact email address.
    #[schema(example = "ivan@example.com")]
    pub email: Option<String>,
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName(&'static str);

impl FieldName {
    /// The `name` field.
    pub const NAME: Self = Self("name");
    /// The `email` field.
    pub const EMAIL: Self = Self("email");

    /// Wire name of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// One rejected field with its client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed.
    pub field: FieldName,
    /// Message shown to the client.
    pub message: String,
}

/// Every field error found in a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: FieldName, error: &UserValidationError) {
        self.0.push(FieldError {
            field,
            message: error.to_string(),
        });
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields in request order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message recorded for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: FieldName) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        let details: Map<String, Value> = errors
            .0
            .into_iter()
            .map(|error| (error.field.as_str().to_owned(), Value::String(error.message)))
            .collect();
        Error::invalid_request(VALIDATION_FAILED_MESSAGE).with_details(Value::Object(details))
    }
}

fn check<T>(
    raw: Option<String>,
    field: FieldName,
    missing: UserValidationError,
    construct: impl FnOnce(String) -> Result<T, UserValidationError>,
    errors: &mut FieldErrors,
) -> Option<T> {
    let result = match raw {
        Some(value) => construct(value),
        None => Err(missing),
    };
    result.map_err(|error| errors.push(field, &error)).ok()
}

/// Validate a request body, collecting every field error.
///
/// # Examples
/// ```
/// use user_service::inbound::http::validation::{FieldName, UserRequest, validate_user_request};
///
/// let errors = validate_user_request(UserRequest::default()).expect_err("both missing");
/// assert_eq!(errors.message_for(FieldName::NAME), Some("Name is required"));
/// assert_eq!(errors.message_for(FieldName::EMAIL), Some("Email is required"));
/// ```
pub fn validate_user_request(request: UserRequest) -> Result<UserDraft, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = check(
        request.name,
        FieldName::NAME,
        UserValidationError::BlankName,
        UserName::new,
        &mut errors,
    );
    let email = check(
        request.email,
        FieldName::EMAIL,
        UserValidationError::BlankEmail,
        EmailAddress::new,
        &mut errors,
    );

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(UserDraft { name, email }),
        _ => Err(errors),
    }
}
