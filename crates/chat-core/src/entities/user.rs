//! User entity - represents a platform account

use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, OptimizedAttachment};
use crate::traits::Cacheable;
use crate::value_objects::{Ulid, UserBits};

/// User presence indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Presence {
    Online,
    Idle,
    Focus,
    Busy,
    #[default]
    Invisible,
}

/// Relationship between the current user and another user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationshipStatus {
    #[default]
    None,
    /// This is the current user
    User,
    Friend,
    Outgoing,
    Incoming,
    Blocked,
    BlockedOther,
}

/// Entry of the current user's relationship list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "_id")]
    pub user_id: Ulid,
    pub status: RelationshipStatus,
}

/// Custom status
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserStatus {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub presence: Option<Presence>,
}

/// Profile page content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub background: Option<Attachment>,
}

/// Bot metadata attached to bot accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInformation {
    pub owner: Ulid,
}

/// User as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<Attachment>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub badges: u32,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub privileged: bool,
    #[serde(default)]
    pub bot: Option<BotInformation>,
    #[serde(default)]
    pub relationship: RelationshipStatus,
    #[serde(default)]
    pub online: bool,
}

impl User {
    /// Name shown in the interface
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}

/// Cached status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptimizedUserStatus {
    pub text: String,
    pub presence: Presence,
}

/// Cached profile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptimizedUserProfile {
    pub content: String,
    pub background: Option<OptimizedAttachment>,
}

/// Cached projection of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedUser {
    pub id: Ulid,
    pub username: String,
    pub discriminator: String,
    /// Empty when no display name is set
    pub display_name: String,
    pub avatar: Option<OptimizedAttachment>,
    pub relations: Vec<Relation>,
    pub status: Option<OptimizedUserStatus>,
    pub profile: Option<OptimizedUserProfile>,
    pub bot_owner: Option<Ulid>,
    pub relationship: RelationshipStatus,
    /// Badges, account flags, bot, privileged and online bits
    pub bits: UserBits,
}

impl OptimizedUser {
    #[inline]
    pub fn is_online(&self) -> bool {
        self.bits.is_online()
    }

    #[inline]
    pub fn badges(&self) -> u32 {
        self.bits.badges()
    }

    #[inline]
    pub fn flags(&self) -> u32 {
        self.bits.flags()
    }

    /// Apply a `UserUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialUser, clear: &[UserClearField]) {
        if let Some(badges) = data.badges {
            self.bits.update_badges(badges);
        }
        if let Some(flags) = data.flags {
            self.bits.update_flags(flags);
        }
        if let Some(online) = data.online {
            self.bits.set(UserBits::ONLINE, online);
        }
        if let Some(privileged) = data.privileged {
            self.bits.set(UserBits::PRIVILEGED, privileged);
        }
        if let Some(username) = &data.username {
            self.username.clone_from(username);
        }
        if let Some(discriminator) = &data.discriminator {
            self.discriminator.clone_from(discriminator);
        }
        if let Some(display_name) = &data.display_name {
            self.display_name.clone_from(display_name);
        }
        if let Some(avatar) = &data.avatar {
            self.avatar = Some(avatar.into());
        }
        if let Some(status) = &data.status {
            let cached = self.status.get_or_insert_with(OptimizedUserStatus::default);
            if let Some(presence) = status.presence {
                cached.presence = presence;
            }
            if let Some(text) = status.text.as_deref().filter(|t| !t.is_empty()) {
                cached.text = text.to_string();
            }
        }
        if let Some(profile) = &data.profile {
            let cached = self.profile.get_or_insert_with(OptimizedUserProfile::default);
            if let Some(content) = &profile.content {
                cached.content.clone_from(content);
            }
            if let Some(background) = &profile.background {
                cached.background = Some(background.into());
            }
        }
        if let Some(relations) = &data.relations {
            self.relations.clone_from(relations);
        }
        if let Some(relationship) = data.relationship {
            self.relationship = relationship;
        }

        for field in clear {
            match field {
                UserClearField::Avatar => self.avatar = None,
                UserClearField::StatusText => {
                    if let Some(status) = &mut self.status {
                        status.text.clear();
                    }
                }
                UserClearField::StatusPresence => {
                    if let Some(status) = &mut self.status {
                        status.presence = Presence::Invisible;
                    }
                }
                UserClearField::ProfileContent => {
                    if let Some(profile) = &mut self.profile {
                        profile.content.clear();
                    }
                }
                UserClearField::ProfileBackground => {
                    if let Some(profile) = &mut self.profile {
                        profile.background = None;
                    }
                }
                UserClearField::DisplayName => self.display_name.clear(),
                UserClearField::Unknown => {}
            }
        }
    }
}

impl From<&User> for OptimizedUser {
    fn from(u: &User) -> Self {
        let mut bits = UserBits::default();
        bits.update_badges(u.badges);
        bits.update_flags(u.flags);
        bits.set(UserBits::ONLINE, u.online);
        bits.set(UserBits::PRIVILEGED, u.privileged);
        bits.set(UserBits::BOT, u.bot.is_some());

        Self {
            id: u.id.clone(),
            username: u.username.clone(),
            discriminator: u.discriminator.clone(),
            display_name: u.display_name.clone().unwrap_or_default(),
            avatar: u.avatar.as_ref().map(Into::into),
            relations: u.relations.clone(),
            status: u.status.as_ref().map(|s| OptimizedUserStatus {
                text: s.text.clone().unwrap_or_default(),
                presence: s.presence.unwrap_or_default(),
            }),
            profile: u.profile.as_ref().map(|p| OptimizedUserProfile {
                content: p.content.clone().unwrap_or_default(),
                background: p.background.as_ref().map(Into::into),
            }),
            bot_owner: u.bot.as_ref().map(|b| b.owner.clone()),
            relationship: u.relationship,
            bits,
        }
    }
}

impl Cacheable for OptimizedUser {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Changed user fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<Attachment>,
    #[serde(default)]
    pub relations: Option<Vec<Relation>>,
    #[serde(default)]
    pub badges: Option<u32>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub flags: Option<u32>,
    #[serde(default)]
    pub privileged: Option<bool>,
    #[serde(default)]
    pub relationship: Option<RelationshipStatus>,
    #[serde(default)]
    pub online: Option<bool>,
}

/// User fields that a patch can reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserClearField {
    Avatar,
    StatusText,
    StatusPresence,
    ProfileContent,
    ProfileBackground,
    DisplayName,
    #[serde(other)]
    Unknown,
}
