//! Emoji, webhook and pass-through frames

use chat_core::{CustomEmoji, OptimizedEmoji, OptimizedWebhook, Webhook};
use serde_json::Value;

use super::HandlerContext;
use crate::events::{AuthEvent, EmojiDeleteEvent, WebhookDeleteEvent, WebhookUpdateEvent};
use crate::protocol::FrameKind;

/// Handles emoji and webhook frames
pub struct AssetHandler;

impl AssetHandler {
    pub fn on_emoji_create(ctx: &HandlerContext, frame: Value) {
        let Some(emoji) = ctx.decode::<CustomEmoji>(FrameKind::EmojiCreate, frame) else {
            return;
        };
        ctx.events.emoji_create.emit_then_continue(emoji, |e| {
            ctx.cache.emojis().write().set(OptimizedEmoji::from(e));
        });
    }

    pub fn on_emoji_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<EmojiDeleteEvent>(FrameKind::EmojiDelete, frame) else {
            return;
        };
        ctx.events.emoji_delete.emit_then_continue(event, |e| {
            ctx.cache.emojis().write().del(&e.id);
        });
    }

    pub fn on_webhook_create(ctx: &HandlerContext, frame: Value) {
        let Some(webhook) = ctx.decode::<Webhook>(FrameKind::WebhookCreate, frame) else {
            return;
        };
        ctx.events.webhook_create.emit_then_continue(webhook, |w| {
            ctx.cache.webhooks().write().set(OptimizedWebhook::from(w));
        });
    }

    pub fn on_webhook_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<WebhookUpdateEvent>(FrameKind::WebhookUpdate, frame) else {
            return;
        };
        ctx.events.webhook_update.emit_then_continue(event, |e| {
            ctx.cache
                .webhooks()
                .write()
                .partially_update(&e.id, |w| w.apply_patch(&e.data, &e.remove));
        });
    }

    pub fn on_webhook_delete(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<WebhookDeleteEvent>(FrameKind::WebhookDelete, frame) else {
            return;
        };
        ctx.events.webhook_delete.emit_then_continue(event, |e| {
            ctx.cache.webhooks().write().del(&e.id);
        });
    }

    pub fn on_report_create(ctx: &HandlerContext, frame: Value) {
        ctx.events.report_create.emit_async(frame);
    }

    pub fn on_auth(ctx: &HandlerContext, frame: Value) {
        if let Some(event) = ctx.decode::<AuthEvent>(FrameKind::Auth, frame) {
            ctx.events.auth.emit_async(event);
        }
    }
}
