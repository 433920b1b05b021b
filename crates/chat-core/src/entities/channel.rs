//! Channel entity - saved notes, DMs, groups, and server channels

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, OptimizedAttachment};
use crate::traits::Cacheable;
use crate::value_objects::{ChannelFlags, PermissionOverride, Permissions, Ulid};

/// Channel type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChannelType {
    /// Personal "saved messages" channel
    SavedMessages,
    /// Direct message between two users
    DirectMessage,
    /// Group DM
    Group,
    /// Server text channel
    #[default]
    TextChannel,
    /// Server voice channel
    VoiceChannel,
}

impl ChannelType {
    /// Whether this channel belongs to a server
    #[inline]
    #[must_use]
    pub fn is_server_channel(self) -> bool {
        matches!(self, Self::TextChannel | Self::VoiceChannel)
    }
}

/// Channel as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub channel_type: ChannelType,
    #[serde(default)]
    pub server: Option<Ulid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<Attachment>,
    #[serde(default)]
    pub owner: Option<Ulid>,
    /// Owner of a saved messages channel
    #[serde(default)]
    pub user: Option<Ulid>,
    #[serde(default)]
    pub recipients: Vec<Ulid>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub last_message_id: Option<Ulid>,
    /// Group DM permissions
    #[serde(default)]
    pub permissions: Option<Permissions>,
    #[serde(default)]
    pub default_permissions: Option<PermissionOverride>,
    #[serde(default)]
    pub role_permissions: HashMap<Ulid, PermissionOverride>,
}

/// Cached projection of a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedChannel {
    pub id: Ulid,
    pub channel_type: ChannelType,
    pub server: Option<Ulid>,
    pub name: String,
    /// Empty when no description is set
    pub description: String,
    pub icon: Option<OptimizedAttachment>,
    pub owner: Option<Ulid>,
    pub recipients: Vec<Ulid>,
    pub last_message_id: Option<Ulid>,
    pub permissions: Option<Permissions>,
    pub default_permissions: Option<PermissionOverride>,
    pub role_permissions: HashMap<Ulid, PermissionOverride>,
    pub flags: ChannelFlags,
}

impl OptimizedChannel {
    #[inline]
    pub fn is_nsfw(&self) -> bool {
        self.flags.contains(ChannelFlags::NSFW)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.flags.contains(ChannelFlags::ACTIVE)
    }

    /// Apply a `ChannelUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialChannel, clear: &[ChannelClearField]) {
        if let Some(name) = data.name.as_deref().filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(description) = &data.description {
            self.description.clone_from(description);
        }
        if let Some(icon) = &data.icon {
            self.icon = Some(icon.into());
        }
        if let Some(active) = data.active {
            self.flags.set(ChannelFlags::ACTIVE, active);
        }
        if let Some(nsfw) = data.nsfw {
            self.flags.set(ChannelFlags::NSFW, nsfw);
        }
        if let Some(permissions) = data.permissions {
            self.permissions = Some(permissions);
        }
        if let Some(default_permissions) = data.default_permissions {
            self.default_permissions = Some(default_permissions);
        }
        if let Some(role_permissions) = &data.role_permissions {
            self.role_permissions.clone_from(role_permissions);
        }
        if let Some(owner) = data.owner.as_ref().filter(|o| !o.is_empty()) {
            self.owner = Some(owner.clone());
        }
        if let Some(last_message_id) = &data.last_message_id {
            self.last_message_id = Some(last_message_id.clone());
        }

        for field in clear {
            match field {
                ChannelClearField::Description => self.description.clear(),
                ChannelClearField::Icon => self.icon = None,
                ChannelClearField::DefaultPermissions => self.default_permissions = None,
                ChannelClearField::Unknown => {}
            }
        }
    }

    /// Add a group recipient if not already present
    pub fn add_recipient(&mut self, user: &Ulid) {
        if !self.recipients.contains(user) {
            self.recipients.push(user.clone());
        }
    }

    /// Remove a group recipient
    pub fn remove_recipient(&mut self, user: &Ulid) {
        self.recipients.retain(|r| r != user);
    }
}

impl From<&Channel> for OptimizedChannel {
    fn from(c: &Channel) -> Self {
        let mut flags = ChannelFlags::empty();
        flags.set(ChannelFlags::ACTIVE, c.active);
        flags.set(ChannelFlags::NSFW, c.nsfw);

        Self {
            id: c.id.clone(),
            channel_type: c.channel_type,
            server: c.server.clone(),
            name: c.name.clone().unwrap_or_default(),
            description: c.description.clone().unwrap_or_default(),
            icon: c.icon.as_ref().map(Into::into),
            owner: c.owner.clone().or_else(|| c.user.clone()),
            recipients: c.recipients.clone(),
            last_message_id: c.last_message_id.clone(),
            permissions: c.permissions,
            default_permissions: c.default_permissions,
            role_permissions: c.role_permissions.clone(),
            flags,
        }
    }
}

impl Cacheable for OptimizedChannel {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Changed channel fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialChannel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<Ulid>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<Attachment>,
    #[serde(default)]
    pub nsfw: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub permissions: Option<Permissions>,
    #[serde(default)]
    pub role_permissions: Option<HashMap<Ulid, PermissionOverride>>,
    #[serde(default)]
    pub default_permissions: Option<PermissionOverride>,
    #[serde(default)]
    pub last_message_id: Option<Ulid>,
}

/// Channel fields that a patch can reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelClearField {
    Description,
    Icon,
    DefaultPermissions,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_channel() -> Channel {
        serde_json::from_value(serde_json::json!({
            "_id": "01H000000000000000CHANNEL1",
            "channel_type": "TextChannel",
            "server": "01H0000000000000000SERVER1",
            "name": "general",
            "description": "talk here",
            "nsfw": true,
            "active": true,
            "default_permissions": { "a": 0, "d": 4194304 }
        }))
        .unwrap()
    }

    #[test]
    fn test_optimized_channel_from_wire() {
        let cached = OptimizedChannel::from(&sample_channel());

        assert_eq!(cached.name, "general");
        assert!(cached.is_nsfw());
        assert!(cached.is_active());
        assert!(cached.channel_type.is_server_channel());
        assert!(cached.default_permissions.is_some());
    }

    #[test]
    fn test_patch_nsfw_keeps_active() {
        let mut cached = OptimizedChannel::from(&sample_channel());
        let patch = PartialChannel {
            nsfw: Some(false),
            ..Default::default()
        };
        cached.apply_patch(&patch, &[]);

        assert!(!cached.is_nsfw());
        assert!(cached.is_active());
    }

    #[test]
    fn test_patch_empty_name_is_ignored() {
        let mut cached = OptimizedChannel::from(&sample_channel());
        let patch = PartialChannel {
            name: Some(String::new()),
            ..Default::default()
        };
        cached.apply_patch(&patch, &[]);
        assert_eq!(cached.name, "general");
    }

    #[test]
    fn test_clear_fields() {
        let mut cached = OptimizedChannel::from(&sample_channel());
        cached.apply_patch(
            &PartialChannel::default(),
            &[
                ChannelClearField::Description,
                ChannelClearField::DefaultPermissions,
            ],
        );

        assert!(cached.description.is_empty());
        assert!(cached.default_permissions.is_none());
    }

    #[test]
    fn test_recipients() {
        let mut cached = OptimizedChannel::from(&sample_channel());
        let user = Ulid::from_raw("01H000000000000000000USER1");

        cached.add_recipient(&user);
        cached.add_recipient(&user);
        assert_eq!(cached.recipients.len(), 1);

        cached.remove_recipient(&user);
        assert!(cached.recipients.is_empty());
    }
}
