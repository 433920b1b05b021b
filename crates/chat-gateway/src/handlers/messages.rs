//! Message frames

use chat_core::{Message, OptimizedMessage};
use serde_json::Value;

use super::HandlerContext;
use crate::events::{
    BulkDeleteMessageEvent, MessageAppendEvent, MessageDeleteEvent, MessageReactEvent,
    MessageRemoveReactionEvent, MessageUpdateEvent,
};
use crate::protocol::FrameKind;

/// Handles message frames
pub struct MessageHandler;

impl MessageHandler {
    pub fn on_create(ctx: &HandlerContext, frame: Value) {
        let Some(message) = ctx.decode::<Message>(FrameKind::Message, frame) else {
            return;
        };
        ctx.events.message.emit_then_continue(message, |m| {
            ctx.cache.messages().write().set(&m.channel, OptimizedMessage::from(m));
        });
    }

    pub fn on_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<MessageUpdateEvent>(FrameKind::MessageUpdate, frame) else {
            return;
        };
        ctx.events.message_update.emit_then_continue(event, |e| {
            ctx.cache
                .messages()
                .write()
                .partially_update(&e.channel, &e.id, |m| m.apply_patch(&e.data));
        });
    }

    pub fn on_append(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<MessageAppendEvent>(FrameKind::MessageAppend, frame) else {
            return;
        };
        ctx.events.message_append.emit_then_continue(event, |e| {
            ctx.cache
                .messages()
                .write()
                .partially_update(&e.channel, &e.id, |m| m.apply_append(&e.append));
        });
    }

    pub fn on_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<MessageDeleteEvent>(FrameKind::MessageDelete, frame) else {
            return;
        };
        ctx.events.message_delete.emit_then_continue(event, |e| {
            ctx.cache.messages().write().del(&e.channel, &e.id);
        });
    }

    pub fn on_bulk_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) =
            ctx.decode::<BulkDeleteMessageEvent>(FrameKind::BulkDeleteMessage, frame)
        else {
            return;
        };
        ctx.events.bulk_delete_message.emit_then_continue(event, |e| {
            let mut messages = ctx.cache.messages().write();
            for id in &e.ids {
                messages.del(&e.channel_id, id);
            }
        });
    }

    pub fn on_react(ctx: &HandlerContext, kind: FrameKind, frame: Value) {
        let Some(event) = ctx.decode::<MessageReactEvent>(kind, frame) else {
            return;
        };
        if kind == FrameKind::MessageUnreact {
            ctx.events.message_unreact.emit_async(event);
        } else {
            ctx.events.message_react.emit_async(event);
        }
    }

    pub fn on_remove_reaction(ctx: &HandlerContext, frame: Value) {
        if let Some(event) =
            ctx.decode::<MessageRemoveReactionEvent>(FrameKind::MessageRemoveReaction, frame)
        {
            ctx.events.message_remove_reaction.emit_async(event);
        }
    }
}
