//! Client events
//!
//! Typed payloads, the multicast channel and the per-kind registry.

mod channel;
mod payloads;
mod registry;

pub use channel::{EventChannel, Subscription};
pub use payloads::{
    AuthEvent, AuthenticatedEvent, BulkDeleteMessageEvent, ChannelAckEvent, ChannelDeleteEvent,
    ChannelUpdateEvent, ChannelUserEvent, EmojiDeleteEvent, MessageAppendEvent,
    MessageDeleteEvent, MessageReactEvent, MessageRemoveReactionEvent, MessageUpdateEvent,
    PongEvent, ReadyEvent, ServerCreateEvent, ServerDeleteEvent, ServerMemberEvent,
    ServerMemberUpdateEvent, ServerRoleDeleteEvent, ServerRoleUpdateEvent, ServerUpdateEvent,
    UserPlatformWipeEvent, UserRelationshipEvent, UserSettingsUpdateEvent, UserUpdateEvent,
    WebhookDeleteEvent, WebhookUpdateEvent,
};
pub use registry::Events;
