//! Connection lifecycle
//!
//! A pure state machine: `transition` never performs I/O, the client feeds
//! it events as they happen.

use std::fmt;

/// Lifecycle state of the gateway connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// No socket
    #[default]
    Disconnected,
    /// Dialing the gateway
    Connecting,
    /// Socket open, credential sent, waiting for `Ready`
    Authenticating,
    /// Initial state received
    Ready,
    /// Close requested by the caller
    Closing,
    /// Closed for good; no further reconnects
    Closed,
}

/// Things that move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionEvent {
    Dial,
    Dialed,
    Authenticated,
    ReadyReceived,
    TransportLost,
    CloseRequested,
    CloseSent,
}

impl ConnectionState {
    /// Next state after `event`
    ///
    /// Combinations that make no sense leave the state unchanged. `Closed`
    /// absorbs everything.
    #[must_use]
    pub const fn transition(self, event: ConnectionEvent) -> Self {
        use ConnectionEvent as E;

        match (self, event) {
            (Self::Closed, _) => Self::Closed,
            (_, E::CloseSent) => Self::Closed,
            (_, E::CloseRequested) => Self::Closing,
            (Self::Closing, _) => Self::Closing,
            (_, E::TransportLost) => Self::Disconnected,
            (Self::Disconnected, E::Dial) => Self::Connecting,
            (Self::Connecting, E::Dialed) => Self::Authenticating,
            (Self::Authenticating, E::Authenticated) => Self::Authenticating,
            (Self::Authenticating | Self::Ready, E::ReadyReceived) => Self::Ready,
            (state, _) => state,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Authenticating => "authenticating",
            Self::Ready => "ready",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }

    /// Whether a socket is (or is being) established
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Connecting | Self::Authenticating | Self::Ready)
    }

    /// Whether the caller asked to close
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
