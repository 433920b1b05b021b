//! Channel frames

use chat_core::{Channel, OptimizedChannel};
use serde_json::Value;

use super::HandlerContext;
use crate::events::{ChannelAckEvent, ChannelDeleteEvent, ChannelUpdateEvent, ChannelUserEvent};
use crate::protocol::FrameKind;

/// Handles channel frames
pub struct ChannelHandler;

impl ChannelHandler {
    pub fn on_create(ctx: &HandlerContext, frame: Value) {
        let Some(channel) = ctx.decode::<Channel>(FrameKind::ChannelCreate, frame) else {
            return;
        };
        ctx.events.channel_create.emit_then_continue(channel, |c| {
            ctx.cache.channels().write().set(OptimizedChannel::from(c));
        });
    }

    pub fn on_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ChannelUpdateEvent>(FrameKind::ChannelUpdate, frame) else {
            return;
        };
        ctx.events.channel_update.emit_then_continue(event, |e| {
            ctx.cache
                .channels()
                .write()
                .partially_update(&e.id, |c| c.apply_patch(&e.data, &e.clear));
        });
    }

    /// Deleting a channel also drops its cached messages
    pub fn on_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<ChannelDeleteEvent>(FrameKind::ChannelDelete, frame) else {
            return;
        };
        ctx.events.channel_delete.emit_then_continue(event, |e| {
            ctx.cache.channels().write().del(&e.id);
            ctx.cache.messages().write().del_group(&e.id);
        });
    }

    /// `ChannelGroupJoin` / `ChannelGroupLeave`
    pub fn on_group_membership(ctx: &HandlerContext, kind: FrameKind, frame: Value) {
        let Some(event) = ctx.decode::<ChannelUserEvent>(kind, frame) else {
            return;
        };
        let joined = kind == FrameKind::ChannelGroupJoin;
        let channel = if joined {
            &ctx.events.channel_group_join
        } else {
            &ctx.events.channel_group_leave
        };
        channel.emit_then_continue(event, |e| {
            ctx.cache.channels().write().partially_update(&e.id, |c| {
                if joined {
                    c.add_recipient(&e.user);
                } else {
                    c.remove_recipient(&e.user);
                }
            });
        });
    }

    /// `ChannelStartTyping` / `ChannelStopTyping`
    pub fn on_typing(ctx: &HandlerContext, kind: FrameKind, frame: Value) {
        let Some(event) = ctx.decode::<ChannelUserEvent>(kind, frame) else {
            return;
        };
        if kind == FrameKind::ChannelStartTyping {
            ctx.events.channel_start_typing.emit_async(event);
        } else {
            ctx.events.channel_stop_typing.emit_async(event);
        }
    }

    pub fn on_ack(ctx: &HandlerContext, frame: Value) {
        if let Some(event) = ctx.decode::<ChannelAckEvent>(FrameKind::ChannelAck, frame) {
            ctx.events.channel_ack.emit_async(event);
        }
    }
}
