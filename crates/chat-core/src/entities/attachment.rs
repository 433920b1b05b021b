//! Attachment entity - a file stored on the asset server

use serde::{Deserialize, Serialize};

/// Uploaded file metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Asset ID (not a ULID)
    #[serde(rename = "_id")]
    pub id: String,
    /// Bucket the file lives in (attachments, avatars, icons, ...)
    pub tag: String,
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub reported: Option<bool>,
}

/// Cached projection of an attachment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptimizedAttachment {
    pub id: String,
    pub tag: String,
}

impl OptimizedAttachment {
    /// Relative path of the file on the asset server
    pub fn path(&self) -> String {
        format!("{}/{}", self.tag, self.id)
    }
}

impl From<&Attachment> for OptimizedAttachment {
    fn from(a: &Attachment) -> Self {
        Self {
            id: a.id.clone(),
            tag: a.tag.clone(),
        }
    }
}
