//! Socket dialing
//!
//! The client only sees boxed sink and stream halves, so tests can swap the
//! network for in-memory channels.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Sink, Stream, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use crate::error::TransportError;

/// Write half of a socket
pub type BoxSink = Pin<Box<dyn Sink<Message, Error = WsError> + Send>>;

/// Read half of a socket
pub type BoxStream = Pin<Box<dyn Stream<Item = Result<Message, WsError>> + Send>>;

/// Opens WebSocket connections
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Connect to `url` and return the split socket
    async fn dial(&self, url: &str) -> Result<(BoxSink, BoxStream), TransportError>;
}

/// Dialer backed by `tokio-tungstenite` (TLS through rustls)
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteDialer;

#[async_trait]
impl Dialer for TungsteniteDialer {
    async fn dial(&self, url: &str) -> Result<(BoxSink, BoxStream), TransportError> {
        let (stream, response) = connect_async(url).await.map_err(TransportError::connect)?;
        tracing::debug!(status = %response.status(), "websocket handshake complete");

        let (sink, stream) = stream.split();
        Ok((Box::pin(sink), Box::pin(stream)))
    }
}
