//! Route table
//!
//! A route is an HTTP method plus a path relative to a service base URL.
//! Path parameters are identifiers or fixed tags, so they never need
//! escaping.

use std::fmt;

use chat_core::Ulid;
use reqwest::Method;

/// Method and path of one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Path without its leading slash, ready to join onto a base URL
    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn fetch_self() -> Self {
        Self::new(Method::GET, "/users/@me")
    }

    pub fn fetch_user(user: &Ulid) -> Self {
        Self::new(Method::GET, format!("/users/{user}"))
    }

    // ========================================================================
    // Channels
    // ========================================================================

    pub fn fetch_channel(channel: &Ulid) -> Self {
        Self::new(Method::GET, format!("/channels/{channel}"))
    }

    pub fn edit_channel(channel: &Ulid) -> Self {
        Self::new(Method::PATCH, format!("/channels/{channel}"))
    }

    /// Delete a server channel, leave a group or close a DM
    pub fn delete_channel(channel: &Ulid) -> Self {
        Self::new(Method::DELETE, format!("/channels/{channel}"))
    }

    // ========================================================================
    // Messages
    // ========================================================================

    pub fn send_message(channel: &Ulid) -> Self {
        Self::new(Method::POST, format!("/channels/{channel}/messages"))
    }

    pub fn fetch_message(channel: &Ulid, message: &Ulid) -> Self {
        Self::new(Method::GET, format!("/channels/{channel}/messages/{message}"))
    }

    pub fn edit_message(channel: &Ulid, message: &Ulid) -> Self {
        Self::new(
            Method::PATCH,
            format!("/channels/{channel}/messages/{message}"),
        )
    }

    pub fn delete_message(channel: &Ulid, message: &Ulid) -> Self {
        Self::new(
            Method::DELETE,
            format!("/channels/{channel}/messages/{message}"),
        )
    }

    // ========================================================================
    // Servers
    // ========================================================================

    pub fn fetch_server(server: &Ulid) -> Self {
        Self::new(Method::GET, format!("/servers/{server}"))
    }

    pub fn fetch_member(server: &Ulid, user: &Ulid) -> Self {
        Self::new(Method::GET, format!("/servers/{server}/members/{user}"))
    }

    // ========================================================================
    // Assets
    // ========================================================================

    pub fn fetch_emoji(emoji: &Ulid) -> Self {
        Self::new(Method::GET, format!("/custom/emoji/{emoji}"))
    }

    pub fn fetch_webhook(webhook: &Ulid) -> Self {
        Self::new(Method::GET, format!("/webhooks/{webhook}"))
    }

    // ========================================================================
    // Upload service
    // ========================================================================

    pub fn upload_config() -> Self {
        Self::new(Method::GET, "/")
    }

    pub fn upload(tag: &str) -> Self {
        Self::new(Method::POST, format!("/{tag}"))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
