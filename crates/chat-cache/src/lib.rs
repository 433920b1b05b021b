//! # chat-cache
//!
//! In-memory, bounded, best-effort mirror of the entities seen on the event
//! stream.
//!
//! ## Features
//!
//! - **Keyed containers**: users, servers, channels, emojis and webhooks
//! - **Grouped containers**: messages by channel, members and roles by server
//! - **Capacity policy**: disabled, unlimited or bounded with arbitrary eviction
//! - **Admission predicates**: veto individual entities before insertion
//!
//! Nothing in this crate ever fails. A rejected insert, a missing key or an
//! update of an absent entity is simply a no-op.
//!
//! ## Example
//!
//! ```ignore
//! use chat_cache::{EntityCache, EntityCacheConfig};
//!
//! let cache = EntityCache::shared(EntityCacheConfig::unlimited());
//! cache.messages().write().set(&channel_id, message);
//!
//! if let Some(message) = cache.message(&channel_id, &message_id) {
//!     println!("{}", message.content);
//! }
//! ```

pub mod entity;
pub mod store;

// Re-export store types
pub use store::{
    Admission, CacheConfig, Capacity, GroupedAdmission, GroupedCache, GroupedCacheConfig,
    KeyedCache, UNLIMITED,
};

// Re-export entity cache types
pub use entity::{EntityCache, EntityCacheConfig, SharedEntityCache};
