//! Webhook entity

use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, OptimizedAttachment};
use crate::traits::Cacheable;
use crate::value_objects::{Permissions, Ulid};

/// Webhook as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: Ulid,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<Attachment>,
    pub channel_id: Ulid,
    #[serde(default)]
    pub permissions: Permissions,
    /// Only present for the creator
    #[serde(default)]
    pub token: Option<String>,
}

/// Cached projection of a webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedWebhook {
    pub id: Ulid,
    pub name: String,
    pub avatar: Option<OptimizedAttachment>,
    pub channel_id: Ulid,
    pub permissions: Permissions,
}

impl OptimizedWebhook {
    /// Apply a `WebhookUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialWebhook, remove: &[WebhookClearField]) {
        if let Some(name) = data.name.as_deref().filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(avatar) = &data.avatar {
            self.avatar = Some(avatar.into());
        }
        if let Some(permissions) = data.permissions {
            self.permissions = permissions;
        }

        for field in remove {
            match field {
                WebhookClearField::Avatar => self.avatar = None,
                WebhookClearField::Unknown => {}
            }
        }
    }
}

impl From<&Webhook> for OptimizedWebhook {
    fn from(w: &Webhook) -> Self {
        Self {
            id: w.id.clone(),
            name: w.name.clone(),
            avatar: w.avatar.as_ref().map(Into::into),
            channel_id: w.channel_id.clone(),
            permissions: w.permissions,
        }
    }
}

impl Cacheable for OptimizedWebhook {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Changed webhook fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialWebhook {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<Attachment>,
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

/// Webhook fields that a patch can reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookClearField {
    Avatar,
    #[serde(other)]
    Unknown,
}
