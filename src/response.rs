//! Response classification: status check, JSON parse, envelope unwrap.
//!
//! Every operation funnels its raw response through [`check_status`] and then
//! [`parse_json`]; the two site endpoints additionally unwrap their
//! double-encoded `data` field with [`parse_encoded_data`].

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;

use serde_json::Value;

use crate::error::ApiError;

/// Status and body text as delivered by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Pass 2xx responses through; turn anything else into an error.
///
/// A non-2xx body that is not valid JSON is reported as a parse failure,
/// not as an API error.
///
/// # Errors
///
/// [`ApiError::Api`] for a non-2xx status with a JSON body, otherwise
/// [`ApiError::ResponseParse`].
pub fn check_status(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let body = parse_json(&response.body)?;
    let message = match body.get("message") {
        Some(Value::String(message)) => message.clone(),
        None | Some(Value::Null) => request_failed_message(response.status),
        Some(other) => other.to_string(),
    };
    Err(ApiError::Api { status: response.status, message, body })
}

/// Parse a response body as JSON, unchanged.
///
/// # Errors
///
/// [`ApiError::ResponseParse`] if the body is not valid JSON.
pub fn parse_json(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(ApiError::response_parse)
}

/// Parse the JSON string carried in an envelope's `data` field.
///
/// # Errors
///
/// [`ApiError::EncodedData`] if `data` is missing, not a string, or not JSON.
pub fn parse_encoded_data(envelope: &Value) -> Result<Value, ApiError> {
    let Some(data) = envelope.get("data") else {
        return Err(ApiError::EncodedData("missing `data` field".to_owned()));
    };
    let Some(encoded) = data.as_str() else {
        return Err(ApiError::EncodedData(format!("`data` is not a string: {data}")));
    };
    serde_json::from_str(encoded).map_err(|e| ApiError::EncodedData(e.to_string()))
}
