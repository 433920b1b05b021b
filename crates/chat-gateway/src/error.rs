//! Client error types

use std::sync::Arc;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::protocol::{CloseCode, CodecError, FrameKind, ProtocolError};

/// WebSocket transport failure
///
/// Underlying errors are shared so the value can be published to several
/// listeners.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Dial or handshake failed
    #[error("Connect failed: {0}")]
    Connect(Arc<tungstenite::Error>),

    /// Writing a frame failed
    #[error("Send failed: {0}")]
    Send(Arc<tungstenite::Error>),

    /// Reading from the socket failed
    #[error("Receive failed: {0}")]
    Receive(Arc<tungstenite::Error>),

    /// The peer closed the connection or the stream ended
    #[error("Connection closed (code {code:?}): {reason}")]
    Closed { code: Option<u16>, reason: String },
}

impl TransportError {
    pub(crate) fn connect(err: tungstenite::Error) -> Self {
        Self::Connect(Arc::new(err))
    }

    pub(crate) fn send(err: tungstenite::Error) -> Self {
        Self::Send(Arc::new(err))
    }

    pub(crate) fn receive(err: tungstenite::Error) -> Self {
        Self::Receive(Arc::new(err))
    }

    /// Close code the peer sent, if known
    #[must_use]
    pub fn close_code(&self) -> Option<CloseCode> {
        match self {
            Self::Closed { code: Some(code), .. } => CloseCode::from_u16(*code),
            _ => None,
        }
    }
}

/// Gateway client error type
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Gateway URL is unusable
    #[error("Invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Server rejected the session or a request
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A frame did not match the shape expected for its kind
    #[error("Failed to decode {kind} frame: {message}")]
    Decode { kind: String, message: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Operation needs an open connection
    #[error("Not connected")]
    NotConnected,

    /// `open` was called while a connection is already running
    #[error("Connection already open")]
    AlreadyOpen,

    /// Client was closed
    #[error("Client closed")]
    Closed,
}

impl ClientError {
    pub(crate) fn decode(kind: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Decode {
            kind: kind.into(),
            message: err.to_string(),
        }
    }

    /// Whether the failure came from the socket itself
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether a `Ready` frame arrived but could not be decoded
    pub(crate) fn is_ready_decode(&self) -> bool {
        matches!(self, Self::Decode { kind, .. } if kind == FrameKind::Ready.as_str())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
