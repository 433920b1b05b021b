//! Permission bitflags and per-role overrides
//!
//! Permissions are a 64-bit integer bitfield. Unknown bits sent by the server
//! are retained so that a patch never loses information.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Server and channel permission flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u64 {
        /// Manage the channel or channels on the server
        const MANAGE_CHANNEL        = 1 << 0;
        /// Manage the server
        const MANAGE_SERVER         = 1 << 1;
        /// Manage permissions on servers or channels
        const MANAGE_PERMISSIONS    = 1 << 2;
        /// Manage roles on server
        const MANAGE_ROLE           = 1 << 3;
        /// Manage emoji on servers
        const MANAGE_CUSTOMISATION  = 1 << 4;
        /// Kick other members below their ranking
        const KICK_MEMBERS          = 1 << 6;
        /// Ban other members below their ranking
        const BAN_MEMBERS           = 1 << 7;
        /// Timeout other members below their ranking
        const TIMEOUT_MEMBERS       = 1 << 8;
        /// Assign roles to members below their ranking
        const ASSIGN_ROLES          = 1 << 9;
        /// Change own nickname
        const CHANGE_NICKNAME       = 1 << 10;
        /// Change or remove other's nicknames below their ranking
        const MANAGE_NICKNAMES      = 1 << 11;
        /// Change own avatar
        const CHANGE_AVATAR         = 1 << 12;
        /// Remove other's avatars below their ranking
        const REMOVE_AVATARS        = 1 << 13;
        /// View a channel
        const VIEW_CHANNEL          = 1 << 20;
        /// Read a channel's past message history
        const READ_MESSAGE_HISTORY  = 1 << 21;
        /// Send a message in a channel
        const SEND_MESSAGE          = 1 << 22;
        /// Delete messages in a channel
        const MANAGE_MESSAGES       = 1 << 23;
        /// Manage webhook entries on a channel
        const MANAGE_WEBHOOKS       = 1 << 24;
        /// Create invites to this channel
        const INVITE_OTHERS         = 1 << 25;
        /// Send embedded content in this channel
        const SEND_EMBEDS           = 1 << 26;
        /// Send attachments and media in this channel
        const UPLOAD_FILES          = 1 << 27;
        /// Masquerade messages using custom nickname and avatar
        const MASQUERADE            = 1 << 28;
        /// React to messages with emojis
        const REACT                 = 1 << 29;
        /// Connect to a voice channel
        const CONNECT               = 1 << 30;
        /// Speak in a voice call
        const SPEAK                 = 1 << 31;
        /// Share video in a voice call
        const VIDEO                 = 1 << 32;
        /// Mute other members with lower ranking in a voice call
        const MUTE_MEMBERS          = 1 << 33;
        /// Deafen other members with lower ranking in a voice call
        const DEAFEN_MEMBERS        = 1 << 34;
        /// Move members between voice channels
        const MOVE_MEMBERS          = 1 << 35;

        /// Keep bits this client does not know about
        const _ = !0;
    }
}

impl Permissions {
    /// Check if the permission set contains every required permission
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(permission)
    }

    /// Check if the permission set has any of the given permissions
    #[inline]
    pub fn has_any(&self, permissions: Permissions) -> bool {
        self.intersects(permissions)
    }

    /// Combine permissions from multiple sources
    pub fn combine<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        sets.into_iter().fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// Parse from string representation (decimal number)
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.parse::<u64>().map(Permissions::from_bits_retain)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// Serialized as a plain integer, the way the platform sends it
impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value as u64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Permissions::parse(value).map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl From<u64> for Permissions {
    fn from(bits: u64) -> Self {
        Permissions::from_bits_retain(bits)
    }
}

impl From<Permissions> for u64 {
    fn from(perms: Permissions) -> Self {
        perms.bits()
    }
}

/// Allow/deny pair applied on top of a base permission set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PermissionOverride {
    /// Granted permissions
    #[serde(rename = "a", default)]
    pub allow: Permissions,
    /// Revoked permissions
    #[serde(rename = "d", default)]
    pub deny: Permissions,
}

impl PermissionOverride {
    #[must_use]
    pub const fn new(allow: Permissions, deny: Permissions) -> Self {
        Self { allow, deny }
    }

    /// Apply this override to a base permission set
    #[must_use]
    pub fn apply(&self, base: Permissions) -> Permissions {
        (base | self.allow) & !self.deny
    }
}
