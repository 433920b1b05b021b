//! # chat-gateway
//!
//! Event stream client for the chat platform: connects over WebSocket,
//! authenticates, keeps the session alive, mirrors entities into the cache
//! and publishes typed events.

pub mod client;
pub mod connection;
pub mod error;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use connection::{ConnectionEvent, ConnectionState, Heartbeat};
pub use error::{ClientError, ClientResult, TransportError};
pub use events::{EventChannel, Events, ReadyEvent, Subscription};
pub use protocol::{
    ClientFrame, CloseCode, CodecError, FrameCodec, FrameKind, ProtocolError, ProtocolErrorKind,
    SerdeJsonCodec,
};
pub use transport::{BoxSink, BoxStream, Dialer, TungsteniteDialer};
