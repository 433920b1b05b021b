//! Request bodies for write routes

use chat_core::{ChannelClearField, Masquerade, Ulid};
use serde::Serialize;

/// Reference to a message being replied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub id: Ulid,
    /// Ping the author of the referenced message
    pub mention: bool,
}

/// Body of `POST /channels/{channel}/messages`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendMessage {
    /// Sent as the `Idempotency-Key` header rather than in the body
    #[serde(skip)]
    pub idempotency_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Upload IDs returned by [`HttpClient::upload_file`](crate::HttpClient::upload_file)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masquerade: Option<Masquerade>,
}

impl SendMessage {
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Reply to `message` without mentioning its author
    #[must_use]
    pub fn reply_to(mut self, message: Ulid) -> Self {
        self.replies.push(Reply {
            id: message,
            mention: false,
        });
        self
    }

    #[must_use]
    pub fn attach(mut self, upload_id: impl Into<String>) -> Self {
        self.attachments.push(upload_id.into());
        self
    }

    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Body of `PATCH /channels/{channel}/messages/{message}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Body of `PATCH /channels/{channel}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New group owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Ulid>,
    /// Upload ID of the new icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<ChannelClearField>,
}
