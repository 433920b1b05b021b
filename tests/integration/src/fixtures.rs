//! Wire frames and entities for integration tests

use serde_json::{json, Value};

pub const SELF_ID: &str = "01H00000000000000000SELF01";
pub const USER_ID: &str = "01H00000000000000000USER01";
pub const SERVER_ID: &str = "01H0000000000000000SERVER1";
pub const CHANNEL_ID: &str = "01H000000000000000CHANNEL1";

// ============================================================================
// Entities
// ============================================================================

pub fn user(id: &str, username: &str) -> Value {
    json!({ "_id": id, "username": username, "discriminator": "0001", "online": true })
}

pub fn server() -> Value {
    json!({
        "_id": SERVER_ID,
        "owner": SELF_ID,
        "name": "Test Server",
        "channels": [CHANNEL_ID],
        "roles": {}
    })
}

pub fn channel() -> Value {
    json!({
        "_id": CHANNEL_ID,
        "channel_type": "TextChannel",
        "server": SERVER_ID,
        "name": "general"
    })
}

pub fn member(user: &str) -> Value {
    json!({
        "_id": { "server": SERVER_ID, "user": user },
        "joined_at": "2024-01-01T00:00:00Z"
    })
}

pub fn message(id: &str, author: &str, content: &str) -> Value {
    json!({ "_id": id, "channel": CHANNEL_ID, "author": author, "content": content })
}

// ============================================================================
// Frames
// ============================================================================

pub fn authenticated() -> Value {
    json!({ "type": "Authenticated" })
}

/// Initial state: the bot and one other user sharing a server with one channel
pub fn ready() -> Value {
    json!({
        "type": "Ready",
        "users": [user(SELF_ID, "bot"), user(USER_ID, "alice")],
        "servers": [server()],
        "channels": [channel()],
        "members": [member(SELF_ID), member(USER_ID)],
        "emojis": []
    })
}

pub fn message_frame(id: &str, author: &str, content: &str) -> Value {
    let mut frame = message(id, author, content);
    frame["type"] = json!("Message");
    frame
}

pub fn message_update(id: &str, content: &str) -> Value {
    json!({
        "type": "MessageUpdate",
        "id": id,
        "channel": CHANNEL_ID,
        "data": { "content": content, "edited": "2024-01-01T00:00:00Z" }
    })
}

pub fn message_delete(id: &str) -> Value {
    json!({ "type": "MessageDelete", "id": id, "channel": CHANNEL_ID })
}

pub fn pong(data: &Value) -> Value {
    json!({ "type": "Pong", "data": data })
}
