//! Frame handlers
//!
//! Decodes inbound frames, applies their cache effect and publishes them.
//! For every cache-mutating frame the mutation completes before any
//! subscriber sees the event.

mod assets;
mod channels;
mod connection;
mod context;
mod messages;
mod ready;
mod servers;
mod users;

pub use assets::AssetHandler;
pub use channels::ChannelHandler;
pub use connection::ConnectionHandler;
pub use context::HandlerContext;
pub use messages::MessageHandler;
pub use ready::ReadyHandler;
pub use servers::ServerHandler;
pub use users::UserHandler;

use std::sync::Arc;

use serde_json::Value;

use crate::error::ClientError;
use crate::protocol::{FrameCodec, FrameKind};

/// Routes inbound frames to the handler for their kind
pub struct FrameDispatcher {
    ctx: HandlerContext,
    codec: Arc<dyn FrameCodec>,
}

impl FrameDispatcher {
    #[must_use]
    pub fn new(ctx: HandlerContext, codec: Arc<dyn FrameCodec>) -> Self {
        Self { ctx, codec }
    }

    /// Shared handler state
    pub fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    /// Decode and dispatch one text frame
    pub fn handle_text(&self, text: &str) {
        match self.codec.decode(text) {
            Ok(frame) => self.dispatch(frame),
            Err(e) => {
                tracing::debug!(error = %e, "dropping undecodable frame");
                self.ctx.events.error.emit_async(ClientError::Decode {
                    kind: String::from("frame"),
                    message: e.message,
                });
            }
        }
    }

    /// Dispatch one decoded frame
    pub fn dispatch(&self, frame: Value) {
        if self.ctx.events.raw.has_listeners() {
            self.ctx.events.raw.emit_async(frame.clone());
        }

        let Some(name) = frame.get("type").and_then(Value::as_str) else {
            tracing::warn!("frame without a type field");
            self.ctx.events.error.emit_async(ClientError::Decode {
                kind: String::from("frame"),
                message: String::from("missing type field"),
            });
            return;
        };
        let Some(kind) = FrameKind::from_str(name) else {
            tracing::warn!(kind = %name, "unknown frame type");
            return;
        };
        tracing::trace!(%kind, "dispatching frame");

        let ctx = &self.ctx;
        match kind {
            FrameKind::Error | FrameKind::NotFound => ConnectionHandler::on_error(ctx, &frame),
            FrameKind::Authenticated => ConnectionHandler::on_authenticated(ctx),
            FrameKind::Pong => ConnectionHandler::on_pong(ctx, frame),
            FrameKind::Bulk => self.dispatch_bulk(frame),
            FrameKind::Ready => ReadyHandler::handle(ctx, frame),

            FrameKind::Message => MessageHandler::on_create(ctx, frame),
            FrameKind::MessageUpdate => MessageHandler::on_update(ctx, frame),
            FrameKind::MessageAppend => MessageHandler::on_append(ctx, frame),
            FrameKind::MessageDelete => MessageHandler::on_delete(ctx, frame),
            FrameKind::MessageReact | FrameKind::MessageUnreact => {
                MessageHandler::on_react(ctx, kind, frame);
            }
            FrameKind::MessageRemoveReaction => MessageHandler::on_remove_reaction(ctx, frame),
            FrameKind::BulkDeleteMessage => MessageHandler::on_bulk_delete(ctx, frame),

            FrameKind::ChannelCreate => ChannelHandler::on_create(ctx, frame),
            FrameKind::ChannelUpdate => ChannelHandler::on_update(ctx, frame),
            FrameKind::ChannelDelete => ChannelHandler::on_delete(ctx, frame),
            FrameKind::ChannelGroupJoin | FrameKind::ChannelGroupLeave => {
                ChannelHandler::on_group_membership(ctx, kind, frame);
            }
            FrameKind::ChannelStartTyping | FrameKind::ChannelStopTyping => {
                ChannelHandler::on_typing(ctx, kind, frame);
            }
            FrameKind::ChannelAck => ChannelHandler::on_ack(ctx, frame),

            FrameKind::ServerCreate => ServerHandler::on_create(ctx, frame),
            FrameKind::ServerUpdate => ServerHandler::on_update(ctx, frame),
            FrameKind::ServerDelete => ServerHandler::on_delete(ctx, frame),
            FrameKind::ServerMemberJoin => ServerHandler::on_member_join(ctx, frame),
            FrameKind::ServerMemberUpdate => ServerHandler::on_member_update(ctx, frame),
            FrameKind::ServerMemberLeave => ServerHandler::on_member_leave(ctx, frame),
            FrameKind::ServerRoleUpdate => ServerHandler::on_role_update(ctx, frame),
            FrameKind::ServerRoleDelete => ServerHandler::on_role_delete(ctx, frame),

            FrameKind::UserUpdate => UserHandler::on_update(ctx, frame),
            FrameKind::UserRelationship => UserHandler::on_relationship(ctx, frame),
            FrameKind::UserSettingsUpdate => UserHandler::on_settings_update(ctx, frame),
            FrameKind::UserPlatformWipe => UserHandler::on_platform_wipe(ctx, frame),

            FrameKind::EmojiCreate => AssetHandler::on_emoji_create(ctx, frame),
            FrameKind::EmojiDelete => AssetHandler::on_emoji_delete(ctx, frame),
            FrameKind::WebhookCreate => AssetHandler::on_webhook_create(ctx, frame),
            FrameKind::WebhookUpdate => AssetHandler::on_webhook_update(ctx, frame),
            FrameKind::WebhookDelete => AssetHandler::on_webhook_delete(ctx, frame),

            FrameKind::ReportCreate => AssetHandler::on_report_create(ctx, frame),
            FrameKind::Auth => AssetHandler::on_auth(ctx, frame),
        }
    }

    /// Unpack a `Bulk` frame, dispatching each entry in order
    fn dispatch_bulk(&self, mut frame: Value) {
        match frame.get_mut("v").map(Value::take) {
            Some(Value::Array(frames)) => {
                for sub in frames {
                    self.dispatch(sub);
                }
            }
            _ => {
                self.ctx.events.error.emit_async(ClientError::Decode {
                    kind: FrameKind::Bulk.to_string(),
                    message: String::from("missing frame list"),
                });
            }
        }
    }
}

impl std::fmt::Debug for FrameDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDispatcher")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
