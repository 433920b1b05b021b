//! Typed event payloads
//!
//! Frames that carry a full entity (`Message`, `ChannelCreate`, ...) are
//! published as the entity itself. The structs here cover the remaining
//! frames. Every struct ignores the `type` discriminator and any field it
//! does not know about.

use std::collections::HashMap;
use std::time::Duration;

use chat_core::{
    Channel, ChannelClearField, CustomEmoji, Member, MemberClearField, MemberId, PartialChannel,
    PartialMember, PartialMessage, PartialRole, PartialServer, PartialUser, PartialWebhook,
    ReactionEmoji, RelationshipStatus, RoleClearField, Server, ServerClearField, Ulid, User,
    UserClearField, WebhookClearField,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Connection
// ============================================================================

/// Initial state sent once the session is authenticated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadyEvent {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub emojis: Vec<CustomEmoji>,
}

/// The server accepted the credential
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthenticatedEvent;

/// Heartbeat acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PongEvent {
    #[serde(default)]
    pub data: Value,
    /// Round trip of the ping this pong answers, when known
    #[serde(skip)]
    pub latency: Option<Duration>,
}

/// Session lifecycle notification forwarded from the auth service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthEvent {
    pub event_type: String,
    /// Present on account creation
    #[serde(default)]
    pub account: Option<Value>,
    /// Present on session creation
    #[serde(default)]
    pub session: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Ulid>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub exclude_session_id: Option<String>,
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageUpdateEvent {
    pub id: Ulid,
    pub channel: Ulid,
    #[serde(default)]
    pub data: PartialMessage,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageAppendEvent {
    pub id: Ulid,
    pub channel: Ulid,
    #[serde(default)]
    pub append: PartialMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDeleteEvent {
    pub id: Ulid,
    pub channel: Ulid,
}

/// A user added or removed a reaction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageReactEvent {
    pub id: Ulid,
    pub channel_id: Ulid,
    pub user_id: Ulid,
    pub emoji_id: ReactionEmoji,
}

/// Every reaction with one emoji was removed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRemoveReactionEvent {
    pub id: Ulid,
    pub channel_id: Ulid,
    pub emoji_id: ReactionEmoji,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkDeleteMessageEvent {
    #[serde(alias = "channel")]
    pub channel_id: Ulid,
    #[serde(default)]
    pub ids: Vec<Ulid>,
}

// ============================================================================
// Channels
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelUpdateEvent {
    pub id: Ulid,
    #[serde(default)]
    pub data: PartialChannel,
    #[serde(default)]
    pub clear: Vec<ChannelClearField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelDeleteEvent {
    pub id: Ulid,
}

/// A user joined, left or started/stopped typing in a channel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelUserEvent {
    pub id: Ulid,
    pub user: Ulid,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelAckEvent {
    pub id: Ulid,
    pub user: Ulid,
    pub message_id: Ulid,
}

// ============================================================================
// Servers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerCreateEvent {
    pub id: Ulid,
    pub server: Server,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub emojis: Vec<CustomEmoji>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerUpdateEvent {
    pub id: Ulid,
    #[serde(default)]
    pub data: PartialServer,
    #[serde(default)]
    pub clear: Vec<ServerClearField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerDeleteEvent {
    pub id: Ulid,
}

/// A user joined or left a server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerMemberEvent {
    pub id: Ulid,
    pub user: Ulid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerMemberUpdateEvent {
    pub id: MemberId,
    #[serde(default)]
    pub data: PartialMember,
    #[serde(default)]
    pub clear: Vec<MemberClearField>,
}

/// Role created or changed
///
/// A patch that carries every required role field describes a new role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerRoleUpdateEvent {
    pub id: Ulid,
    pub role_id: Ulid,
    #[serde(default)]
    pub data: PartialRole,
    #[serde(default)]
    pub clear: Vec<RoleClearField>,
}

impl ServerRoleUpdateEvent {
    #[inline]
    pub fn is_created(&self) -> bool {
        self.data.as_created().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerRoleDeleteEvent {
    pub id: Ulid,
    pub role_id: Ulid,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserUpdateEvent {
    pub id: Ulid,
    #[serde(default)]
    pub data: PartialUser,
    #[serde(default)]
    pub clear: Vec<UserClearField>,
    #[serde(default)]
    pub event_id: Option<Ulid>,
}

/// Relationship with another user changed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRelationshipEvent {
    /// The current user
    pub id: Ulid,
    /// The other user, carrying the new relationship
    pub user: User,
}

impl UserRelationshipEvent {
    #[inline]
    pub fn status(&self) -> RelationshipStatus {
        self.user.relationship
    }
}

/// Settings changed on another session; values are `[timestamp, value]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserSettingsUpdateEvent {
    pub id: Ulid,
    #[serde(default)]
    pub update: HashMap<String, Value>,
}

/// Account was banned or deleted; clients should drop its data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserPlatformWipeEvent {
    pub user_id: Ulid,
    #[serde(default)]
    pub flags: u32,
}

// ============================================================================
// Emojis and webhooks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmojiDeleteEvent {
    pub id: Ulid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookUpdateEvent {
    pub id: Ulid,
    #[serde(default)]
    pub data: PartialWebhook,
    #[serde(default)]
    pub remove: Vec<WebhookClearField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookDeleteEvent {
    pub id: Ulid,
}
