//! # chat-core
//!
//! Domain layer containing identifiers, bitfields, credentials, and the
//! entities exchanged with the chat platform.
//! This crate has zero dependencies on infrastructure (transport, HTTP, etc.).

pub mod entities;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Attachment, BotInformation, Category, Channel, ChannelClearField, ChannelType, CustomEmoji,
    Embed, EmojiParent, Masquerade, Member, MemberClearField, MemberId, Message,
    OptimizedAttachment, OptimizedChannel, OptimizedEmbed, OptimizedEmoji, OptimizedMember,
    OptimizedMessage, OptimizedRole, OptimizedServer, OptimizedUser, OptimizedUserProfile,
    OptimizedUserStatus, OptimizedWebhook, PartialChannel,
    PartialMember, PartialMessage, PartialRole, PartialServer, PartialUser, PartialWebhook,
    Presence, ReactionEmoji, Relation, RelationshipStatus, Role, RoleClearField, Server,
    ServerClearField, SystemMessages, User, UserClearField, UserProfile, UserStatus, Webhook,
    WebhookClearField,
};
pub use traits::Cacheable;
pub use value_objects::{
    mask_update, ChannelFlags, EmojiFlags, PermissionOverride, Permissions, RoleFlags,
    ServerFlags, Token, TokenKind, TokenKindParseError, Ulid, UlidParseError, UserBits, ULID_LEN,
};
