//! State shared by every frame handler

use std::sync::Arc;

use chat_cache::SharedEntityCache;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::connection::Connection;
use crate::error::ClientError;
use crate::events::Events;
use crate::protocol::FrameKind;

/// Everything a handler may touch
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub events: Arc<Events>,
    pub cache: SharedEntityCache,
    pub connection: Arc<Connection>,
}

impl HandlerContext {
    #[must_use]
    pub fn new(events: Arc<Events>, cache: SharedEntityCache, connection: Arc<Connection>) -> Self {
        Self {
            events,
            cache,
            connection,
        }
    }

    /// Decode a frame into its typed payload
    ///
    /// On failure the error is published on `events.error` and `None` is
    /// returned so the frame is skipped.
    pub fn decode<T: DeserializeOwned>(&self, kind: FrameKind, frame: Value) -> Option<T> {
        match serde_json::from_value(frame) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(%kind, error = %e, "dropping malformed frame");
                self.events.error.emit_async(ClientError::decode(kind.as_str(), &e));
                None
            }
        }
    }
}
