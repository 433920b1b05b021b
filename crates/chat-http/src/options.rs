//! Per-request options

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use serde::Serialize;

use crate::error::{HttpError, HttpResult};

/// Request payload
pub enum RequestBody {
    /// Serialized JSON, sent with `Content-Type: application/json`
    Json(Vec<u8>),
    /// Raw bytes, sent as-is
    Raw(Vec<u8>),
    /// Multipart form, the content type carries the boundary
    Multipart(Form),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(bytes) => write!(f, "Json({} bytes)", bytes.len()),
            Self::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
            Self::Multipart(_) => f.write_str("Multipart"),
        }
    }
}

/// Knobs for a single call to [`HttpClient::request`](crate::HttpClient::request)
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub body: Option<RequestBody>,
    /// Extra headers; they win over the defaults except the credential
    pub headers: HeaderMap,
    /// Skip the credential header
    pub unauthenticated: bool,
    /// Do not add `Accept: application/json`
    pub manual_accept: bool,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` as the JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> HttpResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(HttpError::Encode)?;
        self.body = Some(RequestBody::Json(bytes));
        Ok(self)
    }

    #[must_use]
    pub fn raw(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Raw(bytes));
        self
    }

    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn unauthenticated(mut self) -> Self {
        self.unauthenticated = true;
        self
    }

    #[must_use]
    pub fn manual_accept(mut self) -> Self {
        self.manual_accept = true;
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}
