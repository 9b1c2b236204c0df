//! Request body validation for the users API.
//!
//! Field problems are collected rather than short-circuited so clients see
//! every issue at once as `data: [{field, message}]` under a single
//! "Validation failed" error.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{Error, UserName, UserValidationError, ZipCode};

const VALIDATION_FAILED: &str = "Validation failed";
const EMPTY_UPDATE: &str = "At least one field (name or zipCode) must be provided for update";

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl From<UserValidationError> for FieldError {
    fn from(error: UserValidationError) -> Self {
        Self {
            field: error.field(),
            message: error.to_string(),
        }
    }
}

/// Build the 400 error for a non-empty list of field errors.
pub(crate) fn validation_failed(errors: &[FieldError]) -> Error {
    Error::invalid_request(VALIDATION_FAILED).with_details(json!(errors))
}

fn not_a_string(field: &'static str, label: &str) -> FieldError {
    FieldError {
        field,
        message: format!("{label} must be a string"),
    }
}

fn parse_name(raw: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<UserName> {
    match raw {
        None | Some(Value::Null) => {
            errors.push(UserValidationError::EmptyName.into());
            None
        }
        Some(Value::String(name)) => UserName::new(name.as_str())
            .map_err(|err| errors.push(err.into()))
            .ok(),
        Some(_) => {
            errors.push(not_a_string("name", "Name"));
            None
        }
    }
}

fn parse_zip_code(raw: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<ZipCode> {
    match raw {
        None | Some(Value::Null) => {
            errors.push(UserValidationError::EmptyZipCode.into());
            None
        }
        Some(Value::String(zip)) => ZipCode::new(zip.as_str())
            .map_err(|err| errors.push(err.into()))
            .ok(),
        Some(_) => {
            errors.push(not_a_string("zipCode", "Zip code"));
            None
        }
    }
}

fn is_absent(raw: Option<&Value>) -> bool {
    matches!(raw, None | Some(Value::Null))
}

/// Validate a create body. Both fields are required.
pub(crate) fn create_request(
    name: Option<&Value>,
    zip_code: Option<&Value>,
) -> Result<CreateUserRequest, Error> {
    let mut errors = Vec::new();
    let name = parse_name(name, &mut errors);
    let zip_code = parse_zip_code(zip_code, &mut errors);
    match (name, zip_code) {
        (Some(name), Some(zip_code)) if errors.is_empty() => {
            Ok(CreateUserRequest { name, zip_code })
        }
        _ => Err(validation_failed(&errors)),
    }
}

/// Validate an update body. At least one field must be present; each present
/// field must be valid.
pub(crate) fn update_request(
    name: Option<&Value>,
    zip_code: Option<&Value>,
) -> Result<UpdateUserRequest, Error> {
    if is_absent(name) && is_absent(zip_code) {
        return Err(Error::invalid_request(EMPTY_UPDATE));
    }

    let mut errors = Vec::new();
    let name = (!is_absent(name))
        .then(|| parse_name(name, &mut errors))
        .flatten();
    let zip_code = (!is_absent(zip_code))
        .then(|| parse_zip_code(zip_code, &mut errors))
        .flatten();
    if !errors.is_empty() {
        return Err(validation_failed(&errors));
    }
    UpdateUserRequest::new(name, zip_code)
}
