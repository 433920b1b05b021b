//! WebSocket close codes
//!
//! Standard codes the client sends or receives when a connection ends.

use serde::{Deserialize, Serialize};

/// WebSocket close codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum CloseCode {
    /// Orderly shutdown requested by either side
    Normal = 1000,
    /// Endpoint is going away (server restart, page navigation)
    GoingAway = 1001,
    /// Protocol violation
    ProtocolError = 1002,
    /// Frame type not accepted
    Unsupported = 1003,
    /// Connection dropped without a close frame
    Abnormal = 1006,
    /// Payload inconsistent with its type
    InvalidPayload = 1007,
    /// Generic policy violation
    PolicyViolation = 1008,
    /// Frame too large
    MessageTooBig = 1009,
    /// Server hit an unexpected condition
    InternalError = 1011,
    /// Server is restarting
    ServiceRestart = 1012,
    /// Server is overloaded, try again later
    TryAgainLater = 1013,
}

impl CloseCode {
    /// Create a `CloseCode` from a raw u16 value
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1000 => Some(Self::Normal),
            1001 => Some(Self::GoingAway),
            1002 => Some(Self::ProtocolError),
            1003 => Some(Self::Unsupported),
            1006 => Some(Self::Abnormal),
            1007 => Some(Self::InvalidPayload),
            1008 => Some(Self::PolicyViolation),
            1009 => Some(Self::MessageTooBig),
            1011 => Some(Self::InternalError),
            1012 => Some(Self::ServiceRestart),
            1013 => Some(Self::TryAgainLater),
            _ => None,
        }
    }

    /// Get the raw u16 value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Check if the client should attempt to reconnect after this close code
    ///
    /// The supervisor reconnects after every unexpected loss; this only
    /// feeds the log level.
    #[must_use]
    pub const fn should_reconnect(self) -> bool {
        !matches!(
            self,
            Self::Normal | Self::PolicyViolation | Self::Unsupported
        )
    }

    /// Get the description for this close code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Normal => "Normal closure",
            Self::GoingAway => "Endpoint going away",
            Self::ProtocolError => "Protocol error",
            Self::Unsupported => "Unsupported data",
            Self::Abnormal => "Abnormal closure",
            Self::InvalidPayload => "Invalid payload data",
            Self::PolicyViolation => "Policy violation",
            Self::MessageTooBig => "Message too big",
            Self::InternalError => "Internal server error",
            Self::ServiceRestart => "Service restart",
            Self::TryAgainLater => "Try again later",
        }
    }

    /// Get the name of this close code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::GoingAway => "GoingAway",
            Self::ProtocolError => "ProtocolError",
            Self::Unsupported => "Unsupported",
            Self::Abnormal => "Abnormal",
            Self::InvalidPayload => "InvalidPayload",
            Self::PolicyViolation => "PolicyViolation",
            Self::MessageTooBig => "MessageTooBig",
            Self::InternalError => "InternalError",
            Self::ServiceRestart => "ServiceRestart",
            Self::TryAgainLater => "TryAgainLater",
        }
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.as_u16(), self.description())
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.as_u16()
    }
}
