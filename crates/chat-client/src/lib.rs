//! # chat-client
//!
//! One-stop crate for writing bots and clients: the event stream client
//! with its cache and event bus, plus the REST layer.
//!
//! ## Example
//!
//! ```ignore
//! use chat_client::{Client, ClientConfig, HttpClient, SendMessage};
//!
//! let config = ClientConfig::from_env()?;
//! let http = HttpClient::new(&config)?;
//! let client = Client::builder(config).build()?;
//!
//! client.events().message.listen(move |message| {
//!     println!("{}: {}", message.author, message.content());
//! });
//! client.open().await?;
//! ```

pub use chat_cache as cache;
pub use chat_common as common;
pub use chat_core as model;
pub use chat_gateway as gateway;
pub use chat_http as http;

pub use chat_cache::{EntityCache, EntityCacheConfig, SharedEntityCache};
pub use chat_common::{
    try_init_tracing, try_init_tracing_with_config, ClientConfig, ConfigError, LogFormat,
    TracingConfig,
};
pub use chat_core::{
    Channel, CustomEmoji, Member, Message, Permissions, Role, Server, Token, TokenKind, Ulid, User,
    Webhook,
};
pub use chat_gateway::{
    Client, ClientBuilder, ClientError, ClientFrame, ConnectionState, EventChannel, Events,
    ReadyEvent, Subscription,
};
pub use chat_http::{ApiError, HttpClient, HttpError, SendMessage, UploadTag};
