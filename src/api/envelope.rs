//! Response envelope handling
//!
//! Every response from the prompt API is a JSON object carrying a status code
//! and a status message next to the actual payload fields:
//!
//! ```json
//! { "errorCode": 200, "errorMessage": null, "title": "...", "description": "..." }
//! ```
//!
//! A code of exactly `200` or `null` is a success. Anything else, including a
//! missing code field, is a failure.

use serde_json::{Map, Value};

use super::ApiError;

pub const STATUS_CODE_FIELD: &str = "errorCode";
pub const STATUS_MESSAGE_FIELD: &str = "errorMessage";
pub const SUCCESS_CODE: f64 = 200.0;
pub const FALLBACK_MESSAGE: &str = "API request failed";

/// Payload fields left after the status fields are stripped
pub type Payload = Map<String, Value>;

/// Check the envelope status and strip it, returning the remaining fields
pub fn extract_body(response: Value) -> Result<Payload, ApiError> {
    let Value::Object(mut body) = response else {
        return Err(ApiError::Malformed(
            "response body is not a JSON object".to_string(),
        ));
    };

    let code = body.remove(STATUS_CODE_FIELD);
    let message = body.remove(STATUS_MESSAGE_FIELD);

    match code {
        Some(Value::Null) => Ok(body),
        Some(ref value) if is_success(value) => Ok(body),
        other => Err(ApiError::Api {
            code: other.map(|value| value.to_string()),
            message: failure_message(message),
        }),
    }
}

fn is_success(code: &Value) -> bool {
    code.as_f64() == Some(SUCCESS_CODE)
}

fn failure_message(message: Option<Value>) -> String {
    match message {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Null) | Some(Value::String(_)) | Some(Value::Bool(false)) | None => {
            FALLBACK_MESSAGE.to_string()
        }
        Some(other) => other.to_string(),
    }
}
