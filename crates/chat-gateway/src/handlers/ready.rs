//! Ready frame: initial cache population

use chat_core::{
    OptimizedChannel, OptimizedEmoji, OptimizedMember, OptimizedRole, OptimizedServer,
    OptimizedUser,
};
use serde_json::Value;

use super::HandlerContext;
use crate::connection::ConnectionEvent;
use crate::events::ReadyEvent;
use crate::protocol::FrameKind;

/// Handles the `Ready` frame
pub struct ReadyHandler;

impl ReadyHandler {
    pub fn handle(ctx: &HandlerContext, frame: Value) {
        let Some(ready) = ctx.decode::<ReadyEvent>(FrameKind::Ready, frame) else {
            return;
        };

        ctx.events.ready.emit_then_continue(ready, |ready| {
            Self::populate(ctx, ready);
            ctx.connection.apply(ConnectionEvent::ReadyReceived);
        });
    }

    fn populate(ctx: &HandlerContext, ready: &ReadyEvent) {
        let cache = &ctx.cache;
        {
            let mut users = cache.users().write();
            for user in &ready.users {
                users.set(OptimizedUser::from(user));
            }
        }
        {
            let mut servers = cache.servers().write();
            let mut roles = cache.roles().write();
            for server in &ready.servers {
                servers.set(OptimizedServer::from(server));
                for (id, role) in &server.roles {
                    roles.set(&server.id, OptimizedRole::from_wire(id.clone(), role));
                }
            }
        }
        {
            let mut channels = cache.channels().write();
            for channel in &ready.channels {
                channels.set(OptimizedChannel::from(channel));
            }
        }
        {
            let mut emojis = cache.emojis().write();
            for emoji in &ready.emojis {
                emojis.set(OptimizedEmoji::from(emoji));
            }
        }
        {
            let mut members = cache.members().write();
            for member in &ready.members {
                members.set(&member.id.server, OptimizedMember::from(member));
            }
        }

        tracing::info!(
            users = ready.users.len(),
            servers = ready.servers.len(),
            channels = ready.channels.len(),
            members = ready.members.len(),
            emojis = ready.emojis.len(),
            "ready"
        );
    }
}
