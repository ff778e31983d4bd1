//! The backend's response envelope.
//!
//! Every endpoint answers with a JSON object carrying a boolean `success`, an
//! optional `message`, and endpoint-specific payload fields. Decoding turns
//! that into either a typed payload or a [`FetchError`], so page code never
//! looks at untyped JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{FetchError, is_auth_status};
use super::transport::RawResponse;

/// A typed response body.
pub trait ApiPayload: DeserializeOwned {
    /// Whether the body must carry `success: true`. When `false` a missing
    /// flag is accepted, but an explicit `success: false` still fails.
    const REQUIRES_SUCCESS_FLAG: bool = true;
}

/// A successfully decoded response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub message: Option<String>,
    pub payload: T,
}

fn body_message(body: Option<&Value>) -> Option<String> {
    body.and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// Classifies a raw response.
///
/// Order matters: authentication statuses win over everything, then other
/// HTTP statuses, then the payload-level flag, then the typed decode.
pub fn decode_response<T: ApiPayload>(response: &RawResponse) -> Result<Reply<T>, FetchError> {
    let parsed: Option<Value> = serde_json::from_str(&response.body).ok();
    let message = body_message(parsed.as_ref());

    if is_auth_status(response.status) {
        return Err(FetchError::unauthorized());
    }

    if !response.is_success() {
        let message = message.unwrap_or_else(|| format!("HTTP error {}", response.status));
        if response.status == 404 {
            return Err(FetchError::NotFound {
                entity: "resource".to_string(),
                message,
            });
        }
        return Err(FetchError::Status {
            status: response.status,
            message,
        });
    }

    let Some(value) = parsed else {
        return Err(FetchError::Decode("response body is not JSON".to_string()));
    };

    match value.get("success").and_then(Value::as_bool) {
        Some(true) => {}
        Some(false) => return Err(FetchError::Payload { message }),
        None if T::REQUIRES_SUCCESS_FLAG => {
            return Err(FetchError::Decode(
                "response is missing the success flag".to_string(),
            ));
        }
        None => {}
    }

    let payload = serde_json::from_value::<T>(value).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(Reply { message, payload })
}
