//! Message entity - a message posted in a channel

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, OptimizedAttachment};
use crate::traits::Cacheable;
use crate::value_objects::Ulid;

/// Embedded content (link preview, image, text embed)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Embed {
    /// Embed kind (Website, Image, Video, Text, None)
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub image: Option<serde_json::Value>,
    #[serde(default)]
    pub video: Option<serde_json::Value>,
    #[serde(default)]
    pub special: Option<serde_json::Value>,
}

/// Cached projection of an embed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptimizedEmbed {
    pub kind: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub colour: Option<String>,
}

impl From<&Embed> for OptimizedEmbed {
    fn from(e: &Embed) -> Self {
        Self {
            kind: e.kind.clone(),
            url: e.url.clone(),
            title: e.title.clone(),
            description: e.description.clone(),
            colour: e.colour.clone(),
        }
    }
}

/// Name and avatar override for a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Masquerade {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub colour: Option<String>,
}

/// Message as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Ulid,
    #[serde(default)]
    pub nonce: Option<String>,
    pub channel: Ulid,
    pub author: Ulid,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub system: Option<serde_json::Value>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub edited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub mentions: Vec<Ulid>,
    #[serde(default)]
    pub replies: Vec<Ulid>,
    /// Reactions keyed by emoji, listing reacting users
    #[serde(default)]
    pub reactions: HashMap<String, Vec<Ulid>>,
    #[serde(default)]
    pub masquerade: Option<Masquerade>,
}

impl Message {
    /// Message text, empty for system messages and attachment-only posts
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Cached projection of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedMessage {
    pub id: Ulid,
    pub channel: Ulid,
    pub author: Ulid,
    pub content: String,
    pub attachments: Vec<OptimizedAttachment>,
    pub embeds: Vec<OptimizedEmbed>,
    pub mentions: Vec<Ulid>,
    pub replies: Vec<Ulid>,
    pub edited: Option<DateTime<Utc>>,
}

impl OptimizedMessage {
    /// Apply a `MessageUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialMessage) {
        if let Some(content) = &data.content {
            self.content.clone_from(content);
        }
        if let Some(embeds) = &data.embeds {
            self.embeds = embeds.iter().map(Into::into).collect();
        }
        if let Some(edited) = data.edited {
            self.edited = Some(edited);
        }
    }

    /// Apply a `MessageAppend` patch (only embeds are appended)
    pub fn apply_append(&mut self, data: &PartialMessage) {
        if let Some(embeds) = &data.embeds {
            self.embeds.extend(embeds.iter().map(OptimizedEmbed::from));
        }
    }
}

impl From<&Message> for OptimizedMessage {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id.clone(),
            channel: m.channel.clone(),
            author: m.author.clone(),
            content: m.content.clone().unwrap_or_default(),
            attachments: m.attachments.iter().map(Into::into).collect(),
            embeds: m.embeds.iter().map(Into::into).collect(),
            mentions: m.mentions.clone(),
            replies: m.replies.clone(),
            edited: m.edited,
        }
    }
}

impl Cacheable for OptimizedMessage {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Changed message fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Option<Vec<Embed>>,
    #[serde(default)]
    pub edited: Option<DateTime<Utc>>,
}
