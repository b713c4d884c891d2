//! Response normalization shared by every transport call.

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::HttpResponse;
use crate::error::ClientError;

pub(crate) const MALFORMED_BODY: &str = "malformed response body";

/// Human-readable failure text carried by a server body, if any.
///
/// Prefers `error`, then `message`; blank strings are ignored.
#[must_use]
pub fn error_message(body: &Value) -> Option<&str> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
}

pub(crate) fn status_failed_message(status: u16) -> String {
    format!("request failed with status {status}")
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a failure status to a [`ClientError::Remote`], preferring the
/// server-supplied text.
pub(crate) fn remote_failure(response: &HttpResponse) -> ClientError {
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .as_ref()
        .and_then(error_message)
        .map_or_else(|| status_failed_message(response.status), str::to_owned);
    ClientError::Remote { status: response.status, message }
}

/// Decode a 2xx body into `T`, or normalize the failure.
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    if !is_success(response.status) {
        return Err(remote_failure(response));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::debug!(status = response.status, error = %e, "response body did not match schema");
        ClientError::Remote { status: response.status, message: MALFORMED_BODY.to_owned() }
    })
}

/// Decode an acknowledgement. An `error` key fails the call even on 2xx.
pub(crate) fn decode_ack(response: &HttpResponse) -> Result<Value, ClientError> {
    let body: Value = decode(response)?;
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(ClientError::Remote { status: response.status, message: message.to_owned() });
    }
    Ok(body)
}
