//! Domain entities
//!
//! Each entity has a wire shape (as sent by the server), a reduced
//! `Optimized*` projection kept in the cache, and, where the server sends
//! incremental updates, a `Partial*` patch plus the list of fields a patch
//! can reset.

mod attachment;
mod channel;
mod emoji;
mod member;
mod message;
mod role;
mod server;
mod user;
mod webhook;

pub use attachment::{Attachment, OptimizedAttachment};
pub use channel::{Channel, ChannelClearField, ChannelType, OptimizedChannel, PartialChannel};
pub use emoji::{CustomEmoji, EmojiParent, OptimizedEmoji, ReactionEmoji};
pub use member::{Member, MemberClearField, MemberId, OptimizedMember, PartialMember};
pub use message::{Embed, Masquerade, Message, OptimizedEmbed, OptimizedMessage, PartialMessage};
pub use role::{OptimizedRole, PartialRole, Role, RoleClearField};
pub use server::{Category, OptimizedServer, PartialServer, Server, ServerClearField, SystemMessages};
pub use user::{
    BotInformation, OptimizedUser, OptimizedUserProfile, OptimizedUserStatus, PartialUser,
    Presence, Relation, RelationshipStatus, User, UserClearField, UserProfile, UserStatus,
};
pub use webhook::{OptimizedWebhook, PartialWebhook, Webhook, WebhookClearField};
