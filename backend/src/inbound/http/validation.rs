//! Shared validation helpers for inbound HTTP adapters.
//!
//! Mobile clients send numbers either as JSON numbers or as numeric strings,
//! so the numeric parsers here accept both. Every failure becomes an
//! `invalid_request` error whose details name the field and a stable code.

use serde_json::{Value, json};

use crate::domain::{AccountValidationError, Error, ScanValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_number_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a number"))
        .with_code(ErrorCode::InvalidNumber)
}

pub(crate) fn account_validation_error(err: &AccountValidationError) -> Error {
    let code = match err {
        AccountValidationError::EmptyField { .. } => ErrorCode::MissingField,
        _ => ErrorCode::InvalidValue,
    };
    ValidationError::new(err.field(), err.to_string()).with_code(code)
}

pub(crate) fn scan_validation_error(err: &ScanValidationError) -> Error {
    let code = match err {
        ScanValidationError::EmptyLabel => ErrorCode::MissingField,
        _ => ErrorCode::InvalidValue,
    };
    ValidationError::new(err.field(), err.to_string()).with_code(code)
}

/// Require a string field, treating blank text as missing.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an optional integer. Null, missing and blank strings are `None`.
pub(crate) fn parse_optional_i32(
    value: Option<Value>,
    field: FieldName,
) -> Result<Option<i32>, Error> {
    match value {
        None => Ok(None),
        Some(value) if is_absent(&value) => Ok(None),
        Some(value) => as_i32(&value)
            .map(Some)
            .ok_or_else(|| invalid_number_error(field)),
    }
}

/// Parse a required integer given as a number or numeric string.
pub(crate) fn parse_required_i32(value: Option<Value>, field: FieldName) -> Result<i32, Error> {
    parse_optional_i32(value, field)?.ok_or_else(|| missing_field_error(field))
}

/// Parse a required finite-or-not number given as a number or numeric
/// string. Range checks belong to the domain constructors.
pub(crate) fn parse_required_f64(value: Option<Value>, field: FieldName) -> Result<f64, Error> {
    match value {
        None => Err(missing_field_error(field)),
        Some(value) if is_absent(&value) => Err(missing_field_error(field)),
        Some(value) => as_f64(&value).ok_or_else(|| invalid_number_error(field)),
    }
}
