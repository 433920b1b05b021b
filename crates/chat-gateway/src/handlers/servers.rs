//! Server, member and role frames

use chat_core::{OptimizedChannel, OptimizedEmoji, OptimizedMember, OptimizedRole, OptimizedServer};
use chrono::Utc;
use serde_json::Value;

use super::HandlerContext;
use crate::events::{
    ServerCreateEvent, ServerDeleteEvent, ServerMemberEvent, ServerMemberUpdateEvent,
    ServerRoleDeleteEvent, ServerRoleUpdateEvent, ServerUpdateEvent,
};
use crate::protocol::FrameKind;

/// Handles server-scoped frames
pub struct ServerHandler;

impl ServerHandler {
    pub fn on_create(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerCreateEvent>(FrameKind::ServerCreate, frame) else {
            return;
        };
        ctx.events.server_create.emit_then_continue(event, |e| {
            let cache = &ctx.cache;
            cache.servers().write().set(OptimizedServer::from(&e.server));
            {
                let mut channels = cache.channels().write();
                for channel in &e.channels {
                    channels.set(OptimizedChannel::from(channel));
                }
            }
            {
                let mut emojis = cache.emojis().write();
                for emoji in &e.emojis {
                    emojis.set(OptimizedEmoji::from(emoji));
                }
            }
            let mut roles = cache.roles().write();
            for (id, role) in &e.server.roles {
                roles.set(&e.server.id, OptimizedRole::from_wire(id.clone(), role));
            }
        });
    }

    pub fn on_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerUpdateEvent>(FrameKind::ServerUpdate, frame) else {
            return;
        };
        ctx.events.server_update.emit_then_continue(event, |e| {
            ctx.cache
                .servers()
                .write()
                .partially_update(&e.id, |s| s.apply_patch(&e.data, &e.clear));
        });
    }

    /// Drops the server together with its roles and members
    pub fn on_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerDeleteEvent>(FrameKind::ServerDelete, frame) else {
            return;
        };
        ctx.events.server_delete.emit_then_continue(event, |e| {
            let roles = ctx.cache.roles().write().del_group(&e.id);
            let members = ctx.cache.members().write().del_group(&e.id);
            ctx.cache.servers().write().del(&e.id);
            tracing::debug!(server = %e.id, roles, members, "server removed from cache");
        });
    }

    pub fn on_member_join(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerMemberEvent>(FrameKind::ServerMemberJoin, frame) else {
            return;
        };
        ctx.events.server_member_join.emit_then_continue(event, |e| {
            let member = OptimizedMember::joined(e.id.clone(), e.user.clone(), Utc::now());
            ctx.cache.members().write().set(&e.id, member);
        });
    }

    pub fn on_member_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) =
            ctx.decode::<ServerMemberUpdateEvent>(FrameKind::ServerMemberUpdate, frame)
        else {
            return;
        };
        ctx.events.server_member_update.emit_then_continue(event, |e| {
            ctx.cache
                .members()
                .write()
                .partially_update(&e.id.server, &e.id.user, |m| m.apply_patch(&e.data, &e.clear));
        });
    }

    pub fn on_member_leave(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerMemberEvent>(FrameKind::ServerMemberLeave, frame)
        else {
            return;
        };
        ctx.events.server_member_leave.emit_then_continue(event, |e| {
            ctx.cache.members().write().del(&e.id, &e.user);
        });
    }

    /// Creates the role when the patch is complete, otherwise patches it
    pub fn on_role_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerRoleUpdateEvent>(FrameKind::ServerRoleUpdate, frame)
        else {
            return;
        };
        ctx.events.server_role_update.emit_then_continue(event, |e| {
            let mut roles = ctx.cache.roles().write();
            match e.data.as_created() {
                Some(role) => {
                    roles.set(&e.id, OptimizedRole::from_wire(e.role_id.clone(), &role));
                }
                None => {
                    roles.partially_update(&e.id, &e.role_id, |r| r.apply_patch(&e.data, &e.clear));
                }
            }
        });
    }

    pub fn on_role_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ServerRoleDeleteEvent>(FrameKind::ServerRoleDelete, frame)
        else {
            return;
        };
        ctx.events.server_role_delete.emit_then_continue(event, |e| {
            ctx.cache.roles().write().del(&e.id, &e.role_id);
        });
    }
}
