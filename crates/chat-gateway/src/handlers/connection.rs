//! Connection-level frames: Authenticated, Pong, Error

use serde_json::Value;

use super::HandlerContext;
use crate::connection::ConnectionEvent;
use crate::events::{AuthenticatedEvent, PongEvent};
use crate::protocol::{FrameKind, ProtocolError};

/// Handles frames about the session itself
pub struct ConnectionHandler;

impl ConnectionHandler {
    /// The server accepted the credential
    pub fn on_authenticated(ctx: &HandlerContext) {
        ctx.connection.apply(ConnectionEvent::Authenticated);
        tracing::debug!("session authenticated");
        ctx.events.authenticated.emit_async(AuthenticatedEvent);
    }

    /// Heartbeat acknowledgement
    pub fn on_pong(ctx: &HandlerContext, frame: Value) {
        let Some(mut pong) = ctx.decode::<PongEvent>(FrameKind::Pong, frame) else {
            return;
        };
        pong.latency = ctx.connection.record_pong();
        tracing::trace!(latency = ?pong.latency, "pong received");
        ctx.events.pong.emit_async(pong);
    }

    /// `Error` or `NotFound`
    pub fn on_error(ctx: &HandlerContext, frame: &Value) {
        let error = ProtocolError::from_frame(frame);
        tracing::warn!(error = %error, "server reported an error");
        ctx.events.protocol_error.emit_async(error);
    }
}
