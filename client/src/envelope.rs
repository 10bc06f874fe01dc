//! Backend response envelope
//!
//! Successful responses look like `{ "success": true, "data": ... }`. Only this
//! top level is interpreted; `data` stays opaque.

use crate::error::ApiError;
use serde_json::Value;

/// Unwrap the envelope around a decoded response body.
///
/// - `success: true` yields `data` (or `null` when absent)
/// - `success: false` yields [`ApiError::Unsuccessful`] with the envelope
///   `message`
/// - a body without a boolean `success` key is returned unchanged
///
/// # Errors
///
/// Returns [`ApiError::Unsuccessful`] when the backend reports failure.
pub fn unwrap(body: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    match map.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(map.remove("data").unwrap_or(Value::Null)),
        Some(false) => Err(ApiError::Unsuccessful {
            message: message_of(&Value::Object(map)),
        }),
        None => Ok(Value::Object(map)),
    }
}

/// The `message` string of an error or envelope body, if any
#[must_use]
pub fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
