//! Status and shape checks
//!
//! Every check returns `SuiteError::Assertion` describing what was expected
//! and what the service actually sent.

use awc::http::StatusCode;
use serde_json::{Map, Value};

use crate::client::ApiResponse;
use crate::error::{SuiteError, SuiteResult};

pub fn status(response: &ApiResponse, expected: StatusCode) -> SuiteResult<()> {
    if response.status == expected {
        return Ok(());
    }

    Err(SuiteError::assertion(format!(
        "expected {} {} to return {}, got {} with body {}",
        response.method, response.url, expected, response.status, response.body
    )))
}

/// `value` must be a JSON object; `what` names it in the failure message
pub fn object<'a>(value: &'a Value, what: &str) -> SuiteResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| SuiteError::assertion(format!("expected {what} to be an object, got {value}")))
}

/// `value` must be an object carrying `key`
pub fn property<'a>(value: &'a Value, what: &str, key: &str) -> SuiteResult<&'a Value> {
    object(value, what)?.get(key).ok_or_else(|| {
        SuiteError::assertion(format!("expected {what} to have property '{key}', got {value}"))
    })
}

/// `value[key]` must be an array
pub fn array<'a>(value: &'a Value, what: &str, key: &str) -> SuiteResult<&'a Vec<Value>> {
    let field = property(value, what, key)?;

    field.as_array().ok_or_else(|| {
        SuiteError::assertion(format!("expected {what}.{key} to be an array, got {field}"))
    })
}

pub fn len_greater_than<T>(items: &[T], what: &str, min: usize) -> SuiteResult<()> {
    if items.len() > min {
        return Ok(());
    }

    Err(SuiteError::assertion(format!(
        "expected {what} to have more than {min} entries, got {}",
        items.len()
    )))
}

pub fn len_eq<T>(items: &[T], what: &str, expected: usize) -> SuiteResult<()> {
    if items.len() == expected {
        return Ok(());
    }

    Err(SuiteError::assertion(format!(
        "expected {what} to have exactly {expected} entries, got {}",
        items.len()
    )))
}

/// First element of a list that must not be empty
pub fn first<'a>(items: &'a [Value], what: &str) -> SuiteResult<&'a Value> {
    items
        .first()
        .ok_or_else(|| SuiteError::assertion(format!("expected {what} to be non-empty")))
}
