//! User frames

use serde_json::Value;

use super::HandlerContext;
use crate::events::{
    UserPlatformWipeEvent, UserRelationshipEvent, UserSettingsUpdateEvent, UserUpdateEvent,
};
use crate::protocol::FrameKind;

/// Handles user frames
pub struct UserHandler;

impl UserHandler {
    pub fn on_update(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<UserUpdateEvent>(FrameKind::UserUpdate, frame) else {
            return;
        };
        ctx.events.user_update.emit_then_continue(event, |e| {
            ctx.cache
                .users()
                .write()
                .partially_update(&e.id, |u| u.apply_patch(&e.data, &e.clear));
        });
    }

    /// Updates the relationship stored on the other user
    pub fn on_relationship(ctx: &HandlerContext, frame: Value) {
        let Some(event) = ctx.decode::<UserRelationshipEvent>(FrameKind::UserRelationship, frame)
        else {
            return;
        };
        ctx.events.user_relationship.emit_then_continue(event, |e| {
            let status = e.status();
            ctx.cache
                .users()
                .write()
                .partially_update(&e.user.id, |u| u.relationship = status);
        });
    }

    pub fn on_settings_update(ctx: &HandlerContext, frame: Value) {
        if let Some(event) =
            ctx.decode::<UserSettingsUpdateEvent>(FrameKind::UserSettingsUpdate, frame)
        {
            ctx.events.user_settings_update.emit_async(event);
        }
    }

    pub fn on_platform_wipe(ctx: &HandlerContext, frame: Value) {
        if let Some(event) =
            ctx.decode::<UserPlatformWipeEvent>(FrameKind::UserPlatformWipe, frame)
        {
            ctx.events.user_platform_wipe.emit_async(event);
        }
    }
}
