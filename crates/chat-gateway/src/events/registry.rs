//! One channel per event kind

use chat_core::{Channel, CustomEmoji, Message, Webhook};
use serde_json::Value;

use super::channel::EventChannel;
use super::payloads::{
    AuthEvent, AuthenticatedEvent, BulkDeleteMessageEvent, ChannelAckEvent, ChannelDeleteEvent,
    ChannelUpdateEvent, ChannelUserEvent, EmojiDeleteEvent, MessageAppendEvent,
    MessageDeleteEvent, MessageReactEvent, MessageRemoveReactionEvent, MessageUpdateEvent,
    PongEvent, ReadyEvent, ServerCreateEvent, ServerDeleteEvent, ServerMemberEvent,
    ServerMemberUpdateEvent, ServerRoleDeleteEvent, ServerRoleUpdateEvent, ServerUpdateEvent,
    UserPlatformWipeEvent, UserRelationshipEvent, UserSettingsUpdateEvent, UserUpdateEvent,
    WebhookDeleteEvent, WebhookUpdateEvent,
};
use crate::error::ClientError;
use crate::protocol::ProtocolError;

/// Every event a client publishes
///
/// Subscribe with `events.message.listen(|m| ...)`. Cache-mutating kinds
/// are published after the cache reflects the frame.
#[derive(Debug, Default)]
pub struct Events {
    // Connection
    /// Every decoded frame, before dispatch
    pub raw: EventChannel<Value>,
    /// Transport failures and undecodable frames
    pub error: EventChannel<ClientError>,
    /// `Error` and `NotFound` frames
    pub protocol_error: EventChannel<ProtocolError>,
    pub authenticated: EventChannel<AuthenticatedEvent>,
    pub ready: EventChannel<ReadyEvent>,
    pub pong: EventChannel<PongEvent>,

    // Messages
    pub message: EventChannel<Message>,
    pub message_update: EventChannel<MessageUpdateEvent>,
    pub message_append: EventChannel<MessageAppendEvent>,
    pub message_delete: EventChannel<MessageDeleteEvent>,
    pub message_react: EventChannel<MessageReactEvent>,
    pub message_unreact: EventChannel<MessageReactEvent>,
    pub message_remove_reaction: EventChannel<MessageRemoveReactionEvent>,
    pub bulk_delete_message: EventChannel<BulkDeleteMessageEvent>,

    // Channels
    pub channel_create: EventChannel<Channel>,
    pub channel_update: EventChannel<ChannelUpdateEvent>,
    pub channel_delete: EventChannel<ChannelDeleteEvent>,
    pub channel_group_join: EventChannel<ChannelUserEvent>,
    pub channel_group_leave: EventChannel<ChannelUserEvent>,
    pub channel_start_typing: EventChannel<ChannelUserEvent>,
    pub channel_stop_typing: EventChannel<ChannelUserEvent>,
    pub channel_ack: EventChannel<ChannelAckEvent>,

    // Servers
    pub server_create: EventChannel<ServerCreateEvent>,
    pub server_update: EventChannel<ServerUpdateEvent>,
    pub server_delete: EventChannel<ServerDeleteEvent>,
    pub server_member_join: EventChannel<ServerMemberEvent>,
    pub server_member_leave: EventChannel<ServerMemberEvent>,
    pub server_member_update: EventChannel<ServerMemberUpdateEvent>,
    pub server_role_update: EventChannel<ServerRoleUpdateEvent>,
    pub server_role_delete: EventChannel<ServerRoleDeleteEvent>,

    // Users
    pub user_update: EventChannel<UserUpdateEvent>,
    pub user_relationship: EventChannel<UserRelationshipEvent>,
    pub user_settings_update: EventChannel<UserSettingsUpdateEvent>,
    pub user_platform_wipe: EventChannel<UserPlatformWipeEvent>,

    // Emojis and webhooks
    pub emoji_create: EventChannel<CustomEmoji>,
    pub emoji_delete: EventChannel<EmojiDeleteEvent>,
    pub webhook_create: EventChannel<Webhook>,
    pub webhook_update: EventChannel<WebhookUpdateEvent>,
    pub webhook_delete: EventChannel<WebhookDeleteEvent>,

    // Other
    /// Report created by the current user; passed through untyped
    pub report_create: EventChannel<Value>,
    pub auth: EventChannel<AuthEvent>,
}

impl Events {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
