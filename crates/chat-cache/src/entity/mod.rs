//! Entity cache facade.
//!
//! Holds one container per entity kind, each behind its own lock.

mod entity_cache;

pub use entity_cache::{EntityCache, EntityCacheConfig, SharedEntityCache};
