//! Outbound frames

use chat_core::Ulid;
use serde::{Deserialize, Serialize};

/// Frame sent by the client
///
/// Serialized as a flat object with the variant name in `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientFrame {
    /// Present the session credential
    Authenticate { token: String },
    /// Show the typing indicator in a channel
    BeginTyping { channel: Ulid },
    /// Clear the typing indicator in a channel
    EndTyping { channel: Ulid },
    /// Heartbeat; the server answers with `Pong` carrying the same data
    Ping { data: i64 },
}

impl ClientFrame {
    /// Wire name of the frame
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Authenticate { .. } => "Authenticate",
            Self::BeginTyping { .. } => "BeginTyping",
            Self::EndTyping { .. } => "EndTyping",
            Self::Ping { .. } => "Ping",
        }
    }

    /// Heartbeat frame
    #[must_use]
    pub const fn ping() -> Self {
        Self::Ping { data: 0 }
    }
}

impl std::fmt::Display for ClientFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the credential
        write!(f, "ClientFrame({})", self.name())
    }
}
