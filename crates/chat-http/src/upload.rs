//! File upload service
//!
//! Uploads go to a separate base URL (`ClientConfig::upload_url`). The
//! returned ID is what message, avatar and icon fields refer to.

use std::collections::HashMap;
use std::fmt;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::client::HttpClient;
use crate::error::HttpResult;
use crate::options::RequestOptions;
use crate::route::Route;

/// Bucket an upload is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadTag {
    Attachments,
    Avatars,
    Backgrounds,
    Icons,
    Banners,
    Emojis,
}

impl UploadTag {
    pub const ALL: [Self; 6] = [
        Self::Attachments,
        Self::Avatars,
        Self::Backgrounds,
        Self::Icons,
        Self::Banners,
        Self::Emojis,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attachments => "attachments",
            Self::Avatars => "avatars",
            Self::Backgrounds => "backgrounds",
            Self::Icons => "icons",
            Self::Banners => "banners",
            Self::Emojis => "emojis",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for UploadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limits for one tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadTagConfig {
    /// Maximum file size in bytes
    pub max_size: u64,
    pub use_ulid: bool,
    pub enabled: bool,
    #[serde(default)]
    pub serve_if_field_present: Vec<String>,
    #[serde(default)]
    pub restrict_content_type: Option<String>,
}

/// Upload service configuration, as returned by `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadConfig {
    /// Service version
    #[serde(rename = "autumn", default)]
    pub version: String,
    #[serde(default)]
    pub tags: HashMap<String, UploadTagConfig>,
    #[serde(default)]
    pub jpeg_quality: u8,
}

impl UploadConfig {
    pub fn tag(&self, tag: UploadTag) -> Option<&UploadTagConfig> {
        self.tags.get(tag.as_str())
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    id: String,
}

impl HttpClient {
    /// Fetch per-tag limits of the upload service
    pub async fn upload_config(&self) -> HttpResult<UploadConfig> {
        self.request_upload(&Route::upload_config(), RequestOptions::new())
            .await
    }

    /// Upload a file and return its ID
    pub async fn upload_file(
        &self,
        tag: UploadTag,
        filename: impl Into<String>,
        contents: Vec<u8>,
    ) -> HttpResult<String> {
        let filename = filename.into();
        let size = contents.len();
        let form = Form::new().part("file", Part::bytes(contents).file_name(filename.clone()));

        let response: UploadResponse = self
            .request_upload(&Route::upload(tag.as_str()), RequestOptions::new().multipart(form))
            .await?;
        tracing::debug!(tag = %tag, filename = %filename, size, id = %response.id, "file uploaded");
        Ok(response.id)
    }
}
