//! The `{success, data, message}` response envelope and the rules for
//! turning a response body into the caller's type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ClientError, ValidationError};

/// Wrapper every backend response is expected to follow.
///
/// ```json
/// { "success": true, "data": { "id": "b-1", "name": "Aurora" } }
/// { "success": false, "message": "Boat not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Resolves an empty response for a caller expecting `T`.
///
/// The void result is `T` deserialized from JSON `null`: `()`, `Option<_>`
/// and `IgnoredAny` accept it, anything else reports an empty body.
pub(crate) fn void<T: DeserializeOwned>() -> Result<T, ApiError> {
    serde_json::from_value(Value::Null).map_err(|_| ValidationError::EmptyBody.into())
}

/// Returns `true` when the headers alone announce an empty body.
pub(crate) fn declares_empty(content_length: Option<&str>) -> bool {
    content_length.is_some_and(|len| len.trim() == "0")
}

/// Unwraps a successful response body.
///
/// Blank bodies, whatever their declared content type, and bodies cut off
/// mid-document resolve to the void result. Any JSON that is not an envelope
/// with `success: true` fails with the body's `message`, or the generic
/// fallback.
pub(crate) fn unwrap_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return void();
    }

    let body: Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(e) if e.is_eof() => {
            tracing::debug!("Response body ended early; treating as empty");
            return void();
        }
        Err(e) => return Err(ValidationError::JsonParse(e).into()),
    };

    let envelope = match Envelope::<Value>::deserialize(&body) {
        Ok(envelope) if envelope.success => envelope,
        _ => return Err(ApiError::failure(readable(body.get("message")))),
    };

    match envelope.data {
        None | Some(Value::Null) => void(),
        Some(data) => serde_json::from_value(data)
            .map_err(|e| ValidationError::JsonParse(e).into()),
    }
}

/// Extracts a readable reason from an error response body.
///
/// Prefers a JSON `message`, then a JSON `error` (string, or object with a
/// `message`), then the raw text, then `HTTP error! status: <code>`.
/// Structured values such as validation-error maps are kept as JSON text.
pub(crate) fn error_message(status: u16, text: &str) -> String {
    if text.trim().is_empty() {
        return ClientError::status_fallback(status);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(json) => {
            let error = json.get("error");
            readable(json.get("message"))
                .or_else(|| readable(error.and_then(|e| e.get("message"))))
                .or_else(|| readable(error))
                .unwrap_or_else(|| ClientError::status_fallback(status))
        }
        Err(_) => text.to_string(),
    }
}

/// Renders a message-like JSON value. Strings are used as-is; objects and
/// arrays become their JSON text. Null and empty values yield `None`.
fn readable(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}
