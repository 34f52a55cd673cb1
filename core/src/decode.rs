//! Response decoding and the response envelope.
//!
//! # Design
//! Every call that gets a response back yields a `DetailedResponse`, whatever
//! its status. A 2xx body is decoded into the operation's result type. A
//! non-2xx body is kept as a `ServiceErrorBody` so callers can read the
//! service's own error detail. A body that cannot be decoded is the one case
//! that turns into an `Error`, and that error still carries status and
//! headers.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::http::{find_header, HttpResponse};

/// What an operation expects back in a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Decode the body as JSON into the result type.
    Json,
    /// No body is expected; any body is ignored.
    Empty,
}

/// Error detail returned by the service on a non-2xx status.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceErrorBody {
    pub message: String,
    pub json: Option<Value>,
    pub raw: String,
}

impl ServiceErrorBody {
    fn from_response(status: u16, body: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(body).into_owned();
        let json = serde_json::from_slice::<Value>(body).ok();
        let message = json
            .as_ref()
            .and_then(error_message)
            .or_else(|| (!raw.trim().is_empty()).then(|| raw.trim().to_string()))
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self { message, json, raw }
    }
}

/// Pull a human-readable message out of the service's error JSON.
fn error_message(value: &Value) -> Option<String> {
    let nested = value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("message"));
    nested
        .into_iter()
        .chain(
            ["error", "message", "errorMessage", "description"]
                .iter()
                .filter_map(|key| value.get(*key)),
        )
        .find_map(|v| v.as_str().map(str::to_string))
}

/// Decoded content of a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Parsed(T),
    Empty,
    ServiceError(ServiceErrorBody),
}

/// Status, headers and decoded payload of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub result: Payload<T>,
}

impl<T> DetailedResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The decoded result, if the call succeeded with a body.
    pub fn result(&self) -> Option<&T> {
        match &self.result {
            Payload::Parsed(value) => Some(value),
            _ => None,
        }
    }

    pub fn service_error(&self) -> Option<&ServiceErrorBody> {
        match &self.result {
            Payload::ServiceError(body) => Some(body),
            _ => None,
        }
    }

    /// Collapse into a plain `Result`, turning a non-2xx status into
    /// `Error::Service`.
    pub fn into_result(self) -> Result<Option<T>> {
        match self.result {
            Payload::Parsed(value) => Ok(Some(value)),
            Payload::Empty => Ok(None),
            Payload::ServiceError(body) => Err(Error::Service {
                status: self.status,
                message: body.message,
            }),
        }
    }
}

/// Decode a raw response into an envelope.
pub fn decode<T: DeserializeOwned>(
    response: HttpResponse,
    shape: ResponseShape,
) -> Result<DetailedResponse<T>> {
    let HttpResponse { status, headers, body } = response;

    if !(200..300).contains(&status) {
        let error = ServiceErrorBody::from_response(status, &body);
        debug!(status, message = %error.message, "service returned an error status");
        return Ok(DetailedResponse {
            status,
            headers,
            result: Payload::ServiceError(error),
        });
    }

    let result = match shape {
        ResponseShape::Empty => {
            if !body.is_empty() {
                debug!(status, len = body.len(), "ignoring body of a response with no expected content");
            }
            Payload::Empty
        }
        ResponseShape::Json if body.iter().all(u8::is_ascii_whitespace) => Payload::Empty,
        ResponseShape::Json => match serde_json::from_slice::<T>(&body) {
            Ok(value) => Payload::Parsed(value),
            Err(source) => {
                warn!(status, error = %source, "response body did not match the expected shape");
                return Err(Error::Decode { status, headers, source });
            }
        },
    };

    debug!(status, ?shape, "decoded response");
    Ok(DetailedResponse { status, headers, result })
}
