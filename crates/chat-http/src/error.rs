//! REST error types
//!
//! A failed call is either a transport problem (`Request`), a response the
//! platform rejected (`Api`) or a body that did not match the expected shape
//! (`Decode`).

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// `type` reported for framework-level failures (malformed JSON, unknown route)
pub const FRAMEWORK_ERROR: &str = "FrameworkError";

/// Error body returned by the platform on a non-2xx response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: u16,
    /// Error discriminator, e.g. `MissingPermission`
    pub kind: String,
    /// Seconds to wait before retrying, on rate limits
    pub retry_after: f64,
    pub error: String,
    pub max: u64,
    pub permission: String,
    pub operation: String,
    pub collection: String,
    pub location: String,
    pub with: String,
}

/// Wire shape before the `error` field is normalized
#[derive(Deserialize)]
struct RawApiError {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    retry_after: f64,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    max: u64,
    #[serde(default)]
    permission: String,
    #[serde(default)]
    operation: String,
    #[serde(default)]
    collection: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    with: String,
}

impl ApiError {
    /// Build from a response status and body
    ///
    /// A JSON body is decoded field by field. A framework-style `error`
    /// object (`{code, reason, description}`) becomes
    /// `"code reason: description"`. A body that is not JSON is kept as the
    /// error message.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self {
                status,
                ..Self::default()
            };
        }

        let raw: RawApiError = match serde_json::from_slice(body) {
            Ok(raw) => raw,
            Err(_) => {
                return Self {
                    status,
                    error: String::from_utf8_lossy(body).trim().to_string(),
                    ..Self::default()
                };
            }
        };

        let mut kind = raw.kind;
        let error = match raw.error {
            Some(Value::String(message)) => message,
            Some(Value::Object(framework)) => {
                kind = FRAMEWORK_ERROR.to_string();
                let code = framework.get("code").and_then(Value::as_i64).unwrap_or(0);
                let reason = framework
                    .get("reason")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let description = framework
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                format!("{code} {reason}: {description}")
            }
            _ => String::new(),
        };

        Self {
            status,
            kind,
            retry_after: raw.retry_after,
            error,
            max: raw.max,
            permission: raw.permission,
            operation: raw.operation,
            collection: raw.collection,
            location: raw.location,
            with: raw.with,
        }
    }

    /// Whether the platform asked us to slow down
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429 || self.retry_after > 0.0
    }

    fn details(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if !self.error.is_empty() {
            parts.push(self.error.clone());
        }
        if self.max > 0 {
            parts.push(format!("max: {}", self.max));
        }
        if !self.permission.is_empty() {
            parts.push(format!("permission: {}", self.permission));
        }
        if !self.operation.is_empty() {
            parts.push(format!("operation: {}", self.operation));
        }
        if !self.collection.is_empty() {
            parts.push(format!("collection: {}", self.collection));
        }
        if !self.location.is_empty() {
            parts.push(format!("in: {}", self.location));
        }
        if !self.with.is_empty() {
            parts.push(format!("with: {}", self.with));
        }
        parts
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.kind.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            self.kind.clone()
        };
        let details = self.details();
        if details.is_empty() {
            f.write_str(&kind)
        } else {
            write!(f, "{kind}: {}", details.join(", "))
        }
    }
}

impl std::error::Error for ApiError {}

/// REST layer error
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl HttpError {
    /// The platform's error body, if the server answered
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;
