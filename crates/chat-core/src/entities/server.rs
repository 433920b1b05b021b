//! Server entity - a community with channels, roles and members

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, OptimizedAttachment};
use super::role::Role;
use crate::traits::Cacheable;
use crate::value_objects::{Permissions, ServerFlags, Ulid};

/// Channel category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub channels: Vec<Ulid>,
}

/// Channels where system messages are posted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemMessages {
    #[serde(default)]
    pub user_joined: Option<Ulid>,
    #[serde(default)]
    pub user_left: Option<Ulid>,
    #[serde(default)]
    pub user_kicked: Option<Ulid>,
    #[serde(default)]
    pub user_banned: Option<Ulid>,
}

/// Server as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub owner: Ulid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channels: Vec<Ulid>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub system_messages: Option<SystemMessages>,
    /// Roles keyed by role ID
    #[serde(default)]
    pub roles: HashMap<Ulid, Role>,
    #[serde(default)]
    pub default_permissions: Permissions,
    #[serde(default)]
    pub icon: Option<Attachment>,
    #[serde(default)]
    pub banner: Option<Attachment>,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub discoverable: bool,
}

/// Cached projection of a server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedServer {
    pub id: Ulid,
    pub owner: Ulid,
    pub name: String,
    /// Empty when no description is set
    pub description: String,
    pub channels: Vec<Ulid>,
    pub categories: Vec<Category>,
    pub system_messages: Option<SystemMessages>,
    pub default_permissions: Permissions,
    pub icon: Option<OptimizedAttachment>,
    pub banner: Option<OptimizedAttachment>,
    pub flags: ServerFlags,
}

impl OptimizedServer {
    /// Apply a `ServerUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialServer, clear: &[ServerClearField]) {
        if let Some(owner) = &data.owner {
            self.owner = owner.clone();
        }
        if let Some(name) = &data.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &data.description {
            self.description.clone_from(description);
        }
        if let Some(channels) = &data.channels {
            self.channels.clone_from(channels);
        }
        if let Some(categories) = &data.categories {
            self.categories.clone_from(categories);
        }
        if let Some(system_messages) = &data.system_messages {
            self.system_messages = Some(system_messages.clone());
        }
        if let Some(default_permissions) = data.default_permissions {
            self.default_permissions = default_permissions;
        }
        if let Some(icon) = &data.icon {
            self.icon = Some(icon.into());
        }
        if let Some(banner) = &data.banner {
            self.banner = Some(banner.into());
        }
        if let Some(analytics) = data.analytics {
            self.flags.set(ServerFlags::ANALYTICS, analytics);
        }
        if let Some(discoverable) = data.discoverable {
            self.flags.set(ServerFlags::DISCOVERABLE, discoverable);
        }
        if let Some(nsfw) = data.nsfw {
            self.flags.set(ServerFlags::NSFW, nsfw);
        }

        for field in clear {
            match field {
                ServerClearField::Description => self.description.clear(),
                ServerClearField::Categories => self.categories.clear(),
                ServerClearField::SystemMessages => self.system_messages = None,
                ServerClearField::Icon => self.icon = None,
                ServerClearField::Banner => self.banner = None,
                ServerClearField::Unknown => {}
            }
        }
    }
}

impl From<&Server> for OptimizedServer {
    fn from(s: &Server) -> Self {
        let mut flags = ServerFlags::empty();
        flags.set(ServerFlags::ANALYTICS, s.analytics);
        flags.set(ServerFlags::DISCOVERABLE, s.discoverable);
        flags.set(ServerFlags::NSFW, s.nsfw);

        Self {
            id: s.id.clone(),
            owner: s.owner.clone(),
            name: s.name.clone(),
            description: s.description.clone().unwrap_or_default(),
            channels: s.channels.clone(),
            categories: s.categories.clone().unwrap_or_default(),
            system_messages: s.system_messages.clone(),
            default_permissions: s.default_permissions,
            icon: s.icon.as_ref().map(Into::into),
            banner: s.banner.as_ref().map(Into::into),
            flags,
        }
    }
}

impl Cacheable for OptimizedServer {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Changed server fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialServer {
    #[serde(default)]
    pub owner: Option<Ulid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channels: Option<Vec<Ulid>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub system_messages: Option<SystemMessages>,
    #[serde(default)]
    pub default_permissions: Option<Permissions>,
    #[serde(default)]
    pub icon: Option<Attachment>,
    #[serde(default)]
    pub banner: Option<Attachment>,
    #[serde(default)]
    pub analytics: Option<bool>,
    #[serde(default)]
    pub discoverable: Option<bool>,
    #[serde(default)]
    pub nsfw: Option<bool>,
}

/// Server fields that a patch can reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerClearField {
    Description,
    Categories,
    SystemMessages,
    Icon,
    Banner,
    #[serde(other)]
    Unknown,
}
