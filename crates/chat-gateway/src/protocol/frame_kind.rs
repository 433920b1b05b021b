//! Inbound frame discriminators
//!
//! Every frame sent by the server carries its kind in the `type` field.

use std::fmt;

/// Known inbound frame kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    // Connection frames
    /// Request was rejected
    Error,
    /// Unknown ID referenced by the client; treated as an invalid session
    NotFound,
    /// Credential accepted
    Authenticated,
    /// Several frames batched in `v`
    Bulk,
    /// Heartbeat acknowledgement
    Pong,
    /// Initial state
    Ready,

    // Message frames
    Message,
    MessageUpdate,
    MessageAppend,
    MessageDelete,
    MessageReact,
    MessageUnreact,
    MessageRemoveReaction,
    BulkDeleteMessage,

    // Channel frames
    ChannelCreate,
    ChannelUpdate,
    ChannelDelete,
    ChannelGroupJoin,
    ChannelGroupLeave,
    ChannelStartTyping,
    ChannelStopTyping,
    ChannelAck,

    // Server frames
    ServerCreate,
    ServerUpdate,
    ServerDelete,
    ServerMemberJoin,
    ServerMemberUpdate,
    ServerMemberLeave,
    ServerRoleUpdate,
    ServerRoleDelete,

    // User frames
    UserUpdate,
    UserRelationship,
    UserSettingsUpdate,
    UserPlatformWipe,

    // Emoji and webhook frames
    EmojiCreate,
    EmojiDelete,
    WebhookCreate,
    WebhookUpdate,
    WebhookDelete,

    // Other frames
    ReportCreate,
    Auth,
}

impl FrameKind {
    /// Every known kind, in declaration order
    pub const ALL: [Self; 41] = [
        Self::Error,
        Self::NotFound,
        Self::Authenticated,
        Self::Bulk,
        Self::Pong,
        Self::Ready,
        Self::Message,
        Self::MessageUpdate,
        Self::MessageAppend,
        Self::MessageDelete,
        Self::MessageReact,
        Self::MessageUnreact,
        Self::MessageRemoveReaction,
        Self::BulkDeleteMessage,
        Self::ChannelCreate,
        Self::ChannelUpdate,
        Self::ChannelDelete,
        Self::ChannelGroupJoin,
        Self::ChannelGroupLeave,
        Self::ChannelStartTyping,
        Self::ChannelStopTyping,
        Self::ChannelAck,
        Self::ServerCreate,
        Self::ServerUpdate,
        Self::ServerDelete,
        Self::ServerMemberJoin,
        Self::ServerMemberUpdate,
        Self::ServerMemberLeave,
        Self::ServerRoleUpdate,
        Self::ServerRoleDelete,
        Self::UserUpdate,
        Self::UserRelationship,
        Self::UserSettingsUpdate,
        Self::UserPlatformWipe,
        Self::EmojiCreate,
        Self::EmojiDelete,
        Self::WebhookCreate,
        Self::WebhookUpdate,
        Self::WebhookDelete,
        Self::ReportCreate,
        Self::Auth,
    ];

    /// Get the wire name of the frame kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::NotFound => "NotFound",
            Self::Authenticated => "Authenticated",
            Self::Bulk => "Bulk",
            Self::Pong => "Pong",
            Self::Ready => "Ready",
            Self::Message => "Message",
            Self::MessageUpdate => "MessageUpdate",
            Self::MessageAppend => "MessageAppend",
            Self::MessageDelete => "MessageDelete",
            Self::MessageReact => "MessageReact",
            Self::MessageUnreact => "MessageUnreact",
            Self::MessageRemoveReaction => "MessageRemoveReaction",
            Self::BulkDeleteMessage => "BulkDeleteMessage",
            Self::ChannelCreate => "ChannelCreate",
            Self::ChannelUpdate => "ChannelUpdate",
            Self::ChannelDelete => "ChannelDelete",
            Self::ChannelGroupJoin => "ChannelGroupJoin",
            Self::ChannelGroupLeave => "ChannelGroupLeave",
            Self::ChannelStartTyping => "ChannelStartTyping",
            Self::ChannelStopTyping => "ChannelStopTyping",
            Self::ChannelAck => "ChannelAck",
            Self::ServerCreate => "ServerCreate",
            Self::ServerUpdate => "ServerUpdate",
            Self::ServerDelete => "ServerDelete",
            Self::ServerMemberJoin => "ServerMemberJoin",
            Self::ServerMemberUpdate => "ServerMemberUpdate",
            Self::ServerMemberLeave => "ServerMemberLeave",
            Self::ServerRoleUpdate => "ServerRoleUpdate",
            Self::ServerRoleDelete => "ServerRoleDelete",
            Self::UserUpdate => "UserUpdate",
            Self::UserRelationship => "UserRelationship",
            Self::UserSettingsUpdate => "UserSettingsUpdate",
            Self::UserPlatformWipe => "UserPlatformWipe",
            Self::EmojiCreate => "EmojiCreate",
            Self::EmojiDelete => "EmojiDelete",
            Self::WebhookCreate => "WebhookCreate",
            Self::WebhookUpdate => "WebhookUpdate",
            Self::WebhookDelete => "WebhookDelete",
            Self::ReportCreate => "ReportCreate",
            Self::Auth => "Auth",
        }
    }

    /// Parse a frame kind from its wire name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == s)
    }

    /// Whether a frame of this kind changes the cache
    #[must_use]
    pub const fn mutates_cache(self) -> bool {
        !matches!(
            self,
            Self::Error
                | Self::NotFound
                | Self::Authenticated
                | Self::Bulk
                | Self::Pong
                | Self::MessageReact
                | Self::MessageUnreact
                | Self::MessageRemoveReaction
                | Self::ChannelStartTyping
                | Self::ChannelStopTyping
                | Self::ChannelAck
                | Self::UserSettingsUpdate
                | Self::UserPlatformWipe
                | Self::ReportCreate
                | Self::Auth
        )
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FrameKind> for String {
    fn from(kind: FrameKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_kind_as_str() {
        assert_eq!(FrameKind::Ready.as_str(), "Ready");
        assert_eq!(FrameKind::BulkDeleteMessage.as_str(), "BulkDeleteMessage");
        assert_eq!(FrameKind::ServerRoleUpdate.as_str(), "ServerRoleUpdate");
    }

    #[test]
    fn test_frame_kind_from_str() {
        assert_eq!(FrameKind::from_str("Message"), Some(FrameKind::Message));
        assert_eq!(FrameKind::from_str("UserPlatformWipe"), Some(FrameKind::UserPlatformWipe));
        assert_eq!(FrameKind::from_str("message"), None);
        assert_eq!(FrameKind::from_str("VoiceChannelJoin"), None);
    }

    #[test]
    fn test_every_kind_round_trips_its_name() {
        for kind in FrameKind::ALL {
            assert_eq!(FrameKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_publish_only_kinds() {
        assert!(FrameKind::MessageUpdate.mutates_cache());
        assert!(FrameKind::ServerDelete.mutates_cache());
        assert!(!FrameKind::ChannelStartTyping.mutates_cache());
        assert!(!FrameKind::Auth.mutates_cache());
    }

    #[test]
    fn test_frame_kind_display() {
        assert_eq!(format!("{}", FrameKind::ChannelAck), "ChannelAck");
    }
}
