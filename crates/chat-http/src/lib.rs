//! # chat-http
//!
//! REST layer for the chat platform: a request engine that attaches the
//! credential and decodes platform errors, a representative set of typed
//! routes, and the file upload service.

pub mod api;
pub mod client;
pub mod error;
pub mod options;
pub mod route;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types at crate root
pub use api::{EditChannel, EditMessage, Reply, SendMessage};
pub use client::HttpClient;
pub use error::{ApiError, HttpError, HttpResult, FRAMEWORK_ERROR};
pub use options::{RequestBody, RequestOptions};
pub use reqwest::Method;
pub use route::Route;
pub use upload::{UploadConfig, UploadTag, UploadTagConfig};
